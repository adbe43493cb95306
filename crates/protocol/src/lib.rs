//! Line protocol for gesture events.
//!
//! Every event is one line of ten space-separated fields:
//!
//! ```text
//! <code> <cx> <cy> <length:.2f> <x1> <y1> <z1:.4f> <x2> <y2> <z2:.4f>
//! ```
//!
//! `code` is [`GestureKind::code`](handcursor_gesture::GestureKind::code),
//! `cx cy` the pinch midpoint, `length` the pinch distance, and the two
//! triples are the thumb tip and index tip.
//!
//! Producers write through an [`EventSink`]; consumers read lines back with
//! [`decode_line`].

mod codec;
mod sink;

pub use codec::{decode_line, encode, WireEvent, FIELD_COUNT};
pub use sink::{EventSink, InMemorySink, LineEmitter, NullSink};

/// Errors parsing a protocol line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },
    #[error("unknown event code {0}")]
    UnknownCode(u8),
    #[error("invalid {field}: {value:?}")]
    InvalidField { field: &'static str, value: String },
}

/// Errors delivering an event downstream.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error("failed to write event: {0}")]
    Io(#[from] std::io::Error),
}

impl EmitError {
    /// The reader on the other end of the stream has gone away.
    pub fn is_broken_pipe(&self) -> bool {
        match self {
            Self::Io(e) => e.kind() == std::io::ErrorKind::BrokenPipe,
        }
    }
}

pub type Result<T> = std::result::Result<T, ProtocolError>;
