//! Gesture and tracking thresholds.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    HOLD_THRESHOLD, PINCH_THRESHOLD_PX, TRACK_MATCH_RADIUS_PX, TRACK_MAX_MISSED_FRAMES,
};

/// Thresholds for the click/hold state machine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureConfig {
    /// Maximum thumb-to-index distance (pixels) that counts as a pinch.
    pub pinch_threshold_px: f64,
    /// Minimum pinch duration reported as a hold.
    pub hold_threshold: Duration,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            pinch_threshold_px: PINCH_THRESHOLD_PX,
            hold_threshold: HOLD_THRESHOLD,
        }
    }
}

impl GestureConfig {
    pub fn is_pinched(&self, distance: f64) -> bool {
        distance <= self.pinch_threshold_px
    }
}

/// Parameters for matching hands to tracks across frames.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Maximum midpoint movement (pixels) between frames for a hand to keep its track.
    pub match_radius_px: f64,
    /// Consecutive frames without a match before a track is dropped.
    pub max_missed_frames: u32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            match_radius_px: TRACK_MATCH_RADIUS_PX,
            max_missed_frames: TRACK_MAX_MISSED_FRAMES,
        }
    }
}
