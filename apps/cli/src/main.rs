//! `handcursor`: detector landmarks in, gesture protocol lines out.
//!
//! ```text
//! handcursor                      # read detector JSON lines from stdin
//! handcursor <detector> [args..]  # spawn the detector and read its stdout
//! ```
//!
//! stdout carries protocol lines only; logs go to stderr.
//!
//! The exit status is zero only when the detector output ends. A failing
//! source and a consumer that closes stdout early both exit non-zero.

use std::io::{self, BufReader, Write};
use std::process::{Child, Command, Stdio};

use anyhow::{Context, Result};
use handcursor_application::{PipelineError, PipelineStats, PointerPipeline, SystemClock};
use handcursor_landmarks::{JsonLinesSource, LandmarkSource};
use handcursor_protocol::LineEmitter;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,handcursor=debug")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    match args.next() {
        Some(program) => {
            let rest: Vec<String> = args.collect();
            run_detector(&program, &rest)
        }
        None => {
            tracing::info!("reading landmark frames from stdin");
            let stdin = io::stdin();
            run(JsonLinesSource::new(stdin.lock()))
        }
    }
}

fn run_detector(program: &str, args: &[String]) -> Result<()> {
    tracing::info!(program, ?args, "starting detector");
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .spawn()
        .with_context(|| format!("failed to start detector `{program}`"))?;

    let stdout = child
        .stdout
        .take()
        .context("detector stdout was not captured")?;

    let result = run(JsonLinesSource::new(BufReader::new(stdout)));
    stop_detector(&mut child);
    result
}

fn run<S: LandmarkSource>(source: S) -> Result<()> {
    let stats = pump(source, LineEmitter::stdout())?;
    log_stats(&stats);
    Ok(())
}

/// Drive the pipeline from `source` into `emitter` until either side ends.
fn pump<S, W>(source: S, emitter: LineEmitter<W>) -> Result<PipelineStats>
where
    S: LandmarkSource,
    W: Write,
{
    let mut pipeline = PointerPipeline::new(source, emitter, SystemClock);

    match pipeline.run() {
        Ok(stats) => Ok(stats),
        Err(PipelineError::Emit(e)) if e.is_broken_pipe() => {
            log_stats(&pipeline.stats());
            Err(e).context("event consumer closed the stream")
        }
        Err(e) => {
            log_stats(&pipeline.stats());
            Err(e).context("gesture pipeline failed")
        }
    }
}

fn log_stats(stats: &PipelineStats) {
    tracing::info!(
        frames = stats.frames,
        hands = stats.hands,
        rejected_hands = stats.rejected_hands,
        events = stats.events,
        "done"
    );
}

fn stop_detector(child: &mut Child) {
    if let Err(e) = child.kill() {
        tracing::debug!("detector already exited: {}", e);
    }
    match child.wait() {
        Ok(status) => tracing::info!(%status, "detector stopped"),
        Err(e) => tracing::warn!("failed to reap detector: {}", e),
    }
}
