//! Click/hold state machine for a single hand.

use std::time::Duration;

use crate::config::GestureConfig;
use crate::event::GestureKind;

/// Per-hand gesture state, threaded through one `update` per frame.
///
/// Timestamps are offsets from any fixed origin; only differences matter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GestureTrackState {
    /// Set while the fingers are pinched; holds the time the pinch began.
    press_started_at: Option<Duration>,
    /// Set once a hold has been announced, cleared when its end is reported.
    hold_announced: bool,
}

impl GestureTrackState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pressed(&self) -> bool {
        self.press_started_at.is_some()
    }

    pub fn press_started_at(&self) -> Option<Duration> {
        self.press_started_at
    }

    pub fn hold_announced(&self) -> bool {
        self.hold_announced
    }

    /// Advance the state by one frame and return the event for that frame.
    ///
    /// Returns `None` on the first frame of a pinch, while a pinch has not yet
    /// reached the hold threshold, and on the release frame of a pinch that
    /// lasted the hold threshold or longer. A hold's `HoldEnd` is reported on
    /// the frame after its release.
    pub fn update(
        &mut self,
        distance: f64,
        now: Duration,
        config: &GestureConfig,
    ) -> Option<GestureKind> {
        if config.is_pinched(distance) {
            let Some(started) = self.press_started_at else {
                self.press_started_at = Some(now);
                return None;
            };

            if self.hold_announced {
                return Some(GestureKind::Holding);
            }

            if now.saturating_sub(started) >= config.hold_threshold {
                self.hold_announced = true;
                return Some(GestureKind::HoldStart);
            }

            return None;
        }

        if let Some(started) = self.press_started_at.take() {
            let duration = now.saturating_sub(started);
            return (duration < config.hold_threshold).then_some(GestureKind::Click);
        }

        if self.hold_announced {
            self.hold_announced = false;
            return Some(GestureKind::HoldEnd);
        }

        Some(GestureKind::Position)
    }

    /// Forget any press or hold in progress.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Pure form of [`GestureTrackState::update`]: returns the event and the next state.
pub fn classify(
    state: GestureTrackState,
    distance: f64,
    now: Duration,
    config: &GestureConfig,
) -> (Option<GestureKind>, GestureTrackState) {
    let mut next = state;
    let kind = next.update(distance, now, config);
    (kind, next)
}
