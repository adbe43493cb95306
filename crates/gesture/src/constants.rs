use std::time::Duration;

/// Thumb-to-index distance (pixels) at or below which the fingers count as pinched.
pub const PINCH_THRESHOLD_PX: f64 = 100.0;

/// Continuous pinch time after which a pinch is a hold rather than a click.
pub const HOLD_THRESHOLD: Duration = Duration::from_millis(300);

/// Furthest a hand's pinch midpoint may move between frames and keep its track.
pub const TRACK_MATCH_RADIUS_PX: f64 = 200.0;

/// Frames a track survives without a matching hand before it is dropped.
pub const TRACK_MAX_MISSED_FRAMES: u32 = 15;
