//! Frame sources feeding detected hands into the pipeline.

use std::collections::VecDeque;
use std::io::BufRead;

use serde::Deserialize;

use crate::hand::{Hand, LandmarkFrame};
use crate::{
    LandmarkError, Result, DEFAULT_FRAME_HEIGHT, DEFAULT_FRAME_WIDTH, MIN_DETECTION_SCORE,
};

/// Anything that produces landmark frames, one at a time.
///
/// `next_frame` blocks until the next frame is ready and returns `Ok(None)`
/// once the stream has ended.
pub trait LandmarkSource {
    fn next_frame(&mut self) -> Result<Option<LandmarkFrame>>;
}

impl<S: LandmarkSource + ?Sized> LandmarkSource for Box<S> {
    fn next_frame(&mut self) -> Result<Option<LandmarkFrame>> {
        (**self).next_frame()
    }
}

impl<S: LandmarkSource + ?Sized> LandmarkSource for &mut S {
    fn next_frame(&mut self) -> Result<Option<LandmarkFrame>> {
        (**self).next_frame()
    }
}

/// Replays a fixed list of frames. Used by tests and demos.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    frames: VecDeque<LandmarkFrame>,
}

impl ScriptedSource {
    pub fn new(frames: impl IntoIterator<Item = LandmarkFrame>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl LandmarkSource for ScriptedSource {
    fn next_frame(&mut self) -> Result<Option<LandmarkFrame>> {
        Ok(self.frames.pop_front())
    }
}

fn default_width() -> u32 {
    DEFAULT_FRAME_WIDTH
}

fn default_height() -> u32 {
    DEFAULT_FRAME_HEIGHT
}

/// One line of detector output.
#[derive(Debug, Deserialize)]
struct DetectionLine {
    #[serde(default = "default_width")]
    width: u32,
    #[serde(default = "default_height")]
    height: u32,
    #[serde(default)]
    hands: Vec<Hand>,
    #[serde(default)]
    error: Option<String>,
}

/// Reads newline-delimited JSON detection results, one frame per line.
///
/// Each line looks like:
///
/// ```text
/// {"width":1280,"height":720,"hands":[{"handedness":"Right","score":0.93,"landmarks":[{"x":0.51,"y":0.42,"z":-0.01}, ...]}]}
/// ```
///
/// A line carrying an `"error"` field is logged and yields an empty frame.
pub struct JsonLinesSource<R> {
    reader: R,
    buf: String,
    line: u64,
    min_score: f32,
}

impl<R: BufRead> JsonLinesSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: String::new(),
            line: 0,
            min_score: MIN_DETECTION_SCORE,
        }
    }

    /// Override the minimum detection score. Hands without a score are
    /// always kept.
    pub fn with_min_score(mut self, min_score: f32) -> Self {
        self.min_score = min_score;
        self
    }

    /// Number of lines consumed so far, blank lines included.
    pub fn lines_read(&self) -> u64 {
        self.line
    }
}

impl<R: BufRead> LandmarkSource for JsonLinesSource<R> {
    fn next_frame(&mut self) -> Result<Option<LandmarkFrame>> {
        loop {
            self.buf.clear();
            if self.reader.read_line(&mut self.buf)? == 0 {
                return Ok(None);
            }
            self.line += 1;

            let text = self.buf.trim();
            if text.is_empty() {
                continue;
            }

            let line = self.line;
            let parsed: DetectionLine = serde_json::from_str(text)
                .map_err(|source| LandmarkError::Malformed { line, source })?;

            if let Some(error) = parsed.error {
                tracing::warn!(line, "detector reported an error: {}", error);
                return Ok(Some(LandmarkFrame::with_size(
                    parsed.width,
                    parsed.height,
                    Vec::new(),
                )));
            }

            let min_score = self.min_score;
            let detected = parsed.hands.len();
            let hands: Vec<Hand> = parsed
                .hands
                .into_iter()
                .filter(|hand| hand.score.map_or(true, |score| score >= min_score))
                .collect();

            if hands.len() < detected {
                tracing::debug!(
                    line,
                    dropped = detected - hands.len(),
                    "dropped low-confidence hands"
                );
            }

            return Ok(Some(LandmarkFrame::with_size(
                parsed.width,
                parsed.height,
                hands,
            )));
        }
    }
}
