//! Hand landmark model for handcursor.
//!
//! Landmark detection is done by an external pre-trained model. This crate
//! describes what that model produces (hands made of normalized 3-D points),
//! converts those points to pixel space, and delivers frames to the rest of
//! the pipeline through the [`LandmarkSource`] trait.
//!
//! # Example
//!
//! ```ignore
//! use handcursor_landmarks::{JsonLinesSource, LandmarkSource};
//!
//! let mut source = JsonLinesSource::new(std::io::stdin().lock());
//! while let Some(frame) = source.next_frame()? {
//!     println!("{} hands", frame.hands.len());
//! }
//! ```

mod hand;
mod source;

pub use hand::{Hand, LandmarkFrame, LandmarkPoint, NormalizedLandmark};
pub use source::{JsonLinesSource, LandmarkSource, ScriptedSource};

/// Default capture width in pixels.
pub const DEFAULT_FRAME_WIDTH: u32 = 1280;

/// Default capture height in pixels.
pub const DEFAULT_FRAME_HEIGHT: u32 = 720;

/// Number of landmarks the hand model reports per hand.
pub const HAND_LANDMARK_COUNT: usize = 21;

/// Detections scored below this are discarded by the sources.
pub const MIN_DETECTION_SCORE: f32 = 0.7;

/// Landmark indices of the 21-point hand model used by the pinch metric.
pub mod indices {
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_FINGER_TIP: usize = 8;
}

#[derive(Debug, thiserror::Error)]
pub enum LandmarkError {
    #[error("failed to read detector output: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed detector output on line {line}: {source}")]
    Malformed {
        line: u64,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, LandmarkError>;
