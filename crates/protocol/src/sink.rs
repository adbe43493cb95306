//! Event sinks: where classified events go.

use std::io::{self, Stdout, Write};

use handcursor_gesture::{GestureEvent, GestureKind};

use crate::codec::encode;
use crate::EmitError;

/// Receives classified events, one call per event.
///
/// Decouples the pipeline from the output stream so it can be driven in
/// tests without touching stdout.
pub trait EventSink {
    fn emit(&mut self, event: &GestureEvent) -> Result<(), EmitError>;
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn emit(&mut self, event: &GestureEvent) -> Result<(), EmitError> {
        (**self).emit(event)
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn emit(&mut self, event: &GestureEvent) -> Result<(), EmitError> {
        (**self).emit(event)
    }
}

/// Writes each event as one protocol line and flushes it immediately.
///
/// The consumer reads a live stream, so nothing is held back in a buffer
/// between events.
pub struct LineEmitter<W: Write> {
    writer: W,
    lines_written: u64,
}

impl LineEmitter<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> LineEmitter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            lines_written: 0,
        }
    }

    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> EventSink for LineEmitter<W> {
    fn emit(&mut self, event: &GestureEvent) -> Result<(), EmitError> {
        let line = encode(event);
        writeln!(self.writer, "{line}")?;
        self.writer.flush()?;
        self.lines_written += 1;
        tracing::trace!(hand = %event.hand, kind = %event.kind, "{}", line);
        Ok(())
    }
}

/// Captures events in memory for later inspection.
#[derive(Debug, Default)]
pub struct InMemorySink {
    events: Vec<GestureEvent>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[GestureEvent] {
        &self.events
    }

    pub fn kinds(&self) -> Vec<GestureKind> {
        self.events.iter().map(|e| e.kind).collect()
    }

    /// The captured events as protocol lines.
    pub fn lines(&self) -> Vec<String> {
        self.events.iter().map(encode).collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for InMemorySink {
    fn emit(&mut self, event: &GestureEvent) -> Result<(), EmitError> {
        self.events.push(*event);
        Ok(())
    }
}

/// Discards all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &GestureEvent) -> Result<(), EmitError> {
        Ok(())
    }
}
