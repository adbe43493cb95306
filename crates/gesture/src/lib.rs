//! Pinch gesture classification for handcursor.
//!
//! Turns the per-frame distance between thumb tip and index tip into
//! discrete pointer events:
//!
//! - `Position`: idle tracking heartbeat while no gesture is active
//! - `Click`: pinch released within the hold threshold
//! - `HoldStart` / `Holding` / `HoldEnd`: a sustained pinch, announced once,
//!   repeated every frame, then closed once after release
//!
//! # Architecture
//!
//! ```text
//! pinch.rs   - PinchSample: distance + midpoint of thumb and index tips
//! state.rs   - GestureTrackState: per-hand click/hold state machine (pure)
//! tracker.rs - HandTracker: keeps one state per hand across frames
//! ```
//!
//! The state machine takes the current time as an argument and never reads a
//! clock itself, so sequences can be replayed with exact timings.

mod config;
pub mod constants;
mod event;
mod pinch;
mod state;
mod tracker;

pub use config::{GestureConfig, TrackerConfig};
pub use event::{GestureEvent, GestureKind, HandId};
pub use pinch::{measure_hand, pinch_sample, PinchSample, MIN_LANDMARKS};
pub use state::{classify, GestureTrackState};
pub use tracker::HandTracker;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PinchError {
    #[error("hand has {found} landmarks, at least {required} are needed")]
    TooFewLandmarks { found: usize, required: usize },
}

pub type Result<T> = std::result::Result<T, PinchError>;
