//! Hands and landmark points.

use serde::{Deserialize, Serialize};

use crate::{DEFAULT_FRAME_HEIGHT, DEFAULT_FRAME_WIDTH};

/// A landmark as the detector reports it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NormalizedLandmark {
    /// X coordinate, 0.0 to 1.0 across the image width.
    pub x: f32,
    /// Y coordinate, 0.0 to 1.0 down the image height.
    pub y: f32,
    /// Depth relative to the wrist. Relative scale only, not metric.
    #[serde(default)]
    pub z: f32,
}

/// A landmark in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LandmarkPoint {
    /// Index of the landmark within its hand.
    pub id: usize,
    pub x: i32,
    pub y: i32,
    /// Normalized depth, carried through unchanged.
    pub z: f32,
}

impl LandmarkPoint {
    pub fn new(id: usize, x: i32, y: i32, z: f32) -> Self {
        Self { id, x, y, z }
    }

    /// Scale a normalized landmark to a `width` x `height` frame.
    ///
    /// Coordinates are truncated toward zero.
    pub fn from_normalized(
        id: usize,
        landmark: &NormalizedLandmark,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            id,
            x: (f64::from(landmark.x) * f64::from(width)) as i32,
            y: (f64::from(landmark.y) * f64::from(height)) as i32,
            z: landmark.z,
        }
    }
}

/// One detected hand in one frame.
///
/// Hands carry no identity across frames: the first hand of one frame is not
/// necessarily the first hand of the next.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Hand {
    pub landmarks: Vec<NormalizedLandmark>,
    /// "Left" or "Right", when the detector reports it.
    #[serde(default)]
    pub handedness: Option<String>,
    /// Detection confidence (0.0 to 1.0), when the detector reports it.
    #[serde(default)]
    pub score: Option<f32>,
}

impl Hand {
    pub fn new(landmarks: Vec<NormalizedLandmark>) -> Self {
        Self {
            landmarks,
            handedness: None,
            score: None,
        }
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    /// Landmark `id` in pixel space, if the hand has it.
    pub fn point(&self, id: usize, width: u32, height: u32) -> Option<LandmarkPoint> {
        self.landmarks
            .get(id)
            .map(|lm| LandmarkPoint::from_normalized(id, lm, width, height))
    }

    /// All landmarks in pixel space, in model order.
    pub fn to_pixels(&self, width: u32, height: u32) -> Vec<LandmarkPoint> {
        self.landmarks
            .iter()
            .enumerate()
            .map(|(id, lm)| LandmarkPoint::from_normalized(id, lm, width, height))
            .collect()
    }
}

/// The detector's output for a single captured frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandmarkFrame {
    pub width: u32,
    pub height: u32,
    pub hands: Vec<Hand>,
}

impl Default for LandmarkFrame {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl LandmarkFrame {
    /// A frame at the default 1280x720 capture size.
    pub fn new(hands: Vec<Hand>) -> Self {
        Self::with_size(DEFAULT_FRAME_WIDTH, DEFAULT_FRAME_HEIGHT, hands)
    }

    pub fn with_size(width: u32, height: u32, hands: Vec<Hand>) -> Self {
        Self {
            width,
            height,
            hands,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }
}
