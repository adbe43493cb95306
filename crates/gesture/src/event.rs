//! Classified gesture events.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::pinch::PinchSample;

/// The five pointer events a hand can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GestureKind {
    /// Idle tracking, no gesture active.
    Position,
    /// A pinch has lasted long enough to become a hold.
    HoldStart,
    /// A hold is still in progress.
    Holding,
    /// A hold was released.
    HoldEnd,
    /// A short pinch was released.
    Click,
}

impl GestureKind {
    pub const ALL: [GestureKind; 5] = [
        Self::Position,
        Self::HoldStart,
        Self::Holding,
        Self::HoldEnd,
        Self::Click,
    ];

    /// Numeric code used on the wire. Downstream consumers depend on these values.
    pub fn code(self) -> u8 {
        match self {
            Self::Position => 1,
            Self::HoldStart => 2,
            Self::Holding => 3,
            Self::HoldEnd => 4,
            Self::Click => 5,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }

    /// Name used by consumers of the event stream.
    pub fn name(self) -> &'static str {
        match self {
            Self::Position => "position",
            Self::HoldStart => "startHold",
            Self::Holding => "holding",
            Self::HoldEnd => "endHold",
            Self::Click => "click",
        }
    }
}

impl fmt::Display for GestureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tracker-assigned identity of a hand. Never reused within a tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HandId(pub u64);

impl fmt::Display for HandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hand#{}", self.0)
    }
}

/// One classified event for one hand in one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureEvent {
    pub hand: HandId,
    pub kind: GestureKind,
    pub sample: PinchSample,
}

impl GestureEvent {
    pub fn new(hand: HandId, kind: GestureKind, sample: PinchSample) -> Self {
        Self { hand, kind, sample }
    }
}
