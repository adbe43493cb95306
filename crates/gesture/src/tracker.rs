//! Keeps one gesture state per physical hand across frames.
//!
//! The detector gives hands no identity between frames, so hands are matched
//! to existing tracks by the distance between pinch midpoints.
//!
//! A track that goes unmatched for too long ends. If it ends in the middle of
//! a gesture, the press or hold is not silently forgotten:
//!
//! - when no hand is in view, the track is retired with its state intact, and
//!   the next lone hand to appear takes it over;
//! - otherwise a hold in progress is closed with a `HoldEnd` carrying the
//!   track's last sample.

use std::time::Duration;

use crate::config::{GestureConfig, TrackerConfig};
use crate::event::{GestureEvent, GestureKind, HandId};
use crate::pinch::PinchSample;
use crate::state::GestureTrackState;

#[derive(Debug, Clone)]
struct Track {
    id: HandId,
    /// Most recent sample matched to this track.
    last: PinchSample,
    state: GestureTrackState,
    /// Consecutive frames without a matching hand.
    missed: u32,
}

impl Track {
    fn midpoint(&self) -> (i32, i32) {
        self.last.midpoint()
    }

    fn mid_gesture(&self) -> bool {
        self.state.is_pressed() || self.state.hold_announced()
    }
}

/// Multi-hand front end for [`GestureTrackState`].
#[derive(Debug, Clone)]
pub struct HandTracker {
    gesture: GestureConfig,
    config: TrackerConfig,
    tracks: Vec<Track>,
    /// Tracks that ended mid-gesture while no hand was in view.
    retired: Vec<Track>,
    next_id: u64,
}

impl Default for HandTracker {
    fn default() -> Self {
        Self::new(GestureConfig::default(), TrackerConfig::default())
    }
}

impl HandTracker {
    pub fn new(gesture: GestureConfig, config: TrackerConfig) -> Self {
        Self {
            gesture,
            config,
            tracks: Vec::new(),
            retired: Vec::new(),
            next_id: 0,
        }
    }

    /// Number of live tracks. Retired tracks are not counted.
    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    pub fn track_ids(&self) -> Vec<HandId> {
        self.tracks.iter().map(|t| t.id).collect()
    }

    /// Gesture state of a live track.
    pub fn state(&self, id: HandId) -> Option<&GestureTrackState> {
        self.tracks.iter().find(|t| t.id == id).map(|t| &t.state)
    }

    /// Process one frame's pinch samples, in detector order.
    ///
    /// Returns at most one event per sample, in the same order, plus a
    /// `HoldEnd` for every track that ended during a hold. Those come before
    /// the sample events when a retired track is closed, and after them when
    /// a live track runs out of missed frames. An empty slice is a frame with
    /// no hands: every track ages by one frame.
    pub fn update(&mut self, samples: &[PinchSample], now: Duration) -> Vec<GestureEvent> {
        let mut events = Vec::with_capacity(samples.len());
        if !samples.is_empty() {
            self.settle_retired(samples, &mut events);
        }

        let assignment = self.match_samples(samples);

        for track in &mut self.tracks {
            track.missed = track.missed.saturating_add(1);
        }

        for (sample, slot) in samples.iter().zip(assignment) {
            let index = match slot {
                Some(index) => index,
                None => self.open_track(sample),
            };

            let track = &mut self.tracks[index];
            track.last = *sample;
            track.missed = 0;

            if let Some(kind) = track.state.update(sample.distance, now, &self.gesture) {
                if kind != GestureKind::Position && kind != GestureKind::Holding {
                    tracing::debug!(
                        hand = %track.id,
                        %kind,
                        distance = sample.distance,
                        "gesture"
                    );
                }
                events.push(GestureEvent::new(track.id, kind, *sample));
            }
        }

        let max_missed = self.config.max_missed_frames;
        let (live, expired): (Vec<Track>, Vec<Track>) = std::mem::take(&mut self.tracks)
            .into_iter()
            .partition(|track| track.missed <= max_missed);
        self.tracks = live;

        for track in expired {
            if samples.is_empty() && track.mid_gesture() {
                tracing::debug!(hand = %track.id, "hand lost mid-gesture, retiring track");
                self.retired.push(track);
            } else {
                end_track(track, &mut events);
            }
        }

        events
    }

    /// Drop every track, retired ones included.
    pub fn reset(&mut self) {
        self.tracks.clear();
        self.retired.clear();
    }

    /// Hand retired state to a lone returning hand, or end it.
    fn settle_retired(&mut self, samples: &[PinchSample], events: &mut Vec<GestureEvent>) {
        if self.retired.is_empty() {
            return;
        }

        if let [sample] = samples {
            if self.tracks.is_empty() {
                let midpoint = sample.midpoint();
                let nearest = self
                    .retired
                    .iter()
                    .enumerate()
                    .min_by(|(_, a), (_, b)| {
                        midpoint_distance(a.midpoint(), midpoint)
                            .total_cmp(&midpoint_distance(b.midpoint(), midpoint))
                    })
                    .map(|(index, _)| index);

                if let Some(index) = nearest {
                    let track = self.retired.swap_remove(index);
                    tracing::debug!(hand = %track.id, "hand back in view, resuming track");
                    self.tracks.push(track);
                }
            }
        }

        for track in self.retired.drain(..) {
            end_track(track, events);
        }
    }

    fn open_track(&mut self, sample: &PinchSample) -> usize {
        let id = HandId(self.next_id);
        self.next_id += 1;
        tracing::debug!(hand = %id, cx = sample.cx, cy = sample.cy, "new hand track");

        self.tracks.push(Track {
            id,
            last: *sample,
            state: GestureTrackState::new(),
            missed: 0,
        });
        self.tracks.len() - 1
    }

    /// Greedy nearest-midpoint assignment of samples to existing tracks.
    fn match_samples(&self, samples: &[PinchSample]) -> Vec<Option<usize>> {
        let mut assignment = vec![None; samples.len()];

        // A lone hand always continues a lone track.
        if self.tracks.len() == 1 && samples.len() == 1 {
            assignment[0] = Some(0);
            return assignment;
        }

        let mut pairs = Vec::new();
        for (track_index, track) in self.tracks.iter().enumerate() {
            for (sample_index, sample) in samples.iter().enumerate() {
                let distance = midpoint_distance(track.midpoint(), sample.midpoint());
                if distance <= self.config.match_radius_px {
                    pairs.push((distance, track_index, sample_index));
                }
            }
        }
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut taken = vec![false; self.tracks.len()];
        for (_, track_index, sample_index) in pairs {
            if taken[track_index] || assignment[sample_index].is_some() {
                continue;
            }
            taken[track_index] = true;
            assignment[sample_index] = Some(track_index);
        }

        assignment
    }
}

/// Close a track for good, ending its hold if one is open.
fn end_track(track: Track, events: &mut Vec<GestureEvent>) {
    if track.state.hold_announced() {
        tracing::debug!(hand = %track.id, "hand lost during a hold, ending it");
        events.push(GestureEvent::new(track.id, GestureKind::HoldEnd, track.last));
    } else {
        tracing::debug!(hand = %track.id, "hand lost, dropping track");
    }
}

fn midpoint_distance(a: (i32, i32), b: (i32, i32)) -> f64 {
    let dx = f64::from(a.0) - f64::from(b.0);
    let dy = f64::from(a.1) - f64::from(b.1);
    dx.hypot(dy)
}
