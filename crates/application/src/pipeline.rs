//! The per-frame processing loop.

use handcursor_gesture::{measure_hand, GestureConfig, GestureEvent, HandTracker, TrackerConfig};
use handcursor_landmarks::{LandmarkError, LandmarkFrame, LandmarkSource};
use handcursor_protocol::{EmitError, EventSink};
use serde::{Deserialize, Serialize};

use crate::clock::Clock;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("landmark source failed: {0}")]
    Source(#[from] LandmarkError),
    #[error("event output failed: {0}")]
    Emit(#[from] EmitError),
}

pub type Result<T> = std::result::Result<T, PipelineError>;

/// All tunables of the pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub gesture: GestureConfig,
    #[serde(default)]
    pub tracker: TrackerConfig,
}

/// Running totals since the pipeline was created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    pub frames: u64,
    /// Hands that produced a pinch sample.
    pub hands: u64,
    /// Hands rejected for missing landmarks.
    pub rejected_hands: u64,
    pub events: u64,
}

/// Pulls frames from a source, classifies every hand, and emits the events.
///
/// Single-threaded: each frame is handled to completion, events included,
/// before the next one is requested.
pub struct PointerPipeline<S, E, C> {
    source: S,
    sink: E,
    clock: C,
    tracker: HandTracker,
    stats: PipelineStats,
}

impl<S, E, C> PointerPipeline<S, E, C>
where
    S: LandmarkSource,
    E: EventSink,
    C: Clock,
{
    pub fn new(source: S, sink: E, clock: C) -> Self {
        Self::with_config(source, sink, clock, PipelineConfig::default())
    }

    pub fn with_config(source: S, sink: E, clock: C, config: PipelineConfig) -> Self {
        Self {
            source,
            sink,
            clock,
            tracker: HandTracker::new(config.gesture, config.tracker),
            stats: PipelineStats::default(),
        }
    }

    pub fn stats(&self) -> PipelineStats {
        self.stats
    }

    pub fn tracker(&self) -> &HandTracker {
        &self.tracker
    }

    pub fn sink(&self) -> &E {
        &self.sink
    }

    pub fn into_sink(self) -> E {
        self.sink
    }

    /// Classify one frame and emit its events.
    ///
    /// Hands with too few landmarks are skipped with a warning; the rest of
    /// the frame is still processed. A failed emit aborts the frame.
    pub fn process_frame(&mut self, frame: &LandmarkFrame) -> Result<Vec<GestureEvent>> {
        let now = self.clock.now();
        self.stats.frames += 1;

        let mut samples = Vec::with_capacity(frame.hands.len());
        for (slot, hand) in frame.hands.iter().enumerate() {
            match measure_hand(hand, frame.width, frame.height) {
                Ok(sample) => samples.push(sample),
                Err(e) => {
                    self.stats.rejected_hands += 1;
                    tracing::warn!(frame = self.stats.frames, slot, "skipping hand: {}", e);
                }
            }
        }
        self.stats.hands += samples.len() as u64;

        let events = self.tracker.update(&samples, now);
        for event in &events {
            self.sink.emit(event)?;
            self.stats.events += 1;
        }

        Ok(events)
    }

    /// Fetch and process the next frame. `Ok(None)` once the source has ended.
    pub fn step(&mut self) -> Result<Option<Vec<GestureEvent>>> {
        match self.source.next_frame()? {
            Some(frame) => self.process_frame(&frame).map(Some),
            None => Ok(None),
        }
    }

    /// Process frames until the source ends or a fatal error occurs.
    pub fn run(&mut self) -> Result<PipelineStats> {
        tracing::info!("gesture pipeline started");

        while self.step()?.is_some() {}

        tracing::info!(
            frames = self.stats.frames,
            events = self.stats.events,
            rejected_hands = self.stats.rejected_hands,
            "gesture pipeline stopped"
        );
        Ok(self.stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use handcursor_gesture::GestureKind;
    use handcursor_landmarks::{Hand, NormalizedLandmark, ScriptedSource, HAND_LANDMARK_COUNT};
    use handcursor_protocol::InMemorySink;
    use std::time::Duration;

    fn short_hand() -> Hand {
        Hand::new(vec![NormalizedLandmark::default(); 5])
    }

    fn open_hand() -> Hand {
        let mut landmarks = vec![NormalizedLandmark::default(); HAND_LANDMARK_COUNT];
        landmarks[4] = NormalizedLandmark { x: 0.25, y: 0.5, z: 0.0 };
        landmarks[8] = NormalizedLandmark { x: 0.5, y: 0.5, z: 0.0 };
        Hand::new(landmarks)
    }

    #[test]
    fn test_empty_frame_emits_nothing() {
        let clock = ManualClock::default();
        let mut pipeline =
            PointerPipeline::new(ScriptedSource::default(), InMemorySink::new(), &clock);

        let events = pipeline.process_frame(&LandmarkFrame::default()).unwrap();
        assert!(events.is_empty());
        assert_eq!(pipeline.stats().frames, 1);
        assert_eq!(pipeline.stats().events, 0);
    }

    #[test]
    fn test_malformed_hand_does_not_block_others() {
        let clock = ManualClock::default();
        let mut pipeline =
            PointerPipeline::new(ScriptedSource::default(), InMemorySink::new(), &clock);

        let frame = LandmarkFrame::with_size(800, 600, vec![short_hand(), open_hand()]);
        let events = pipeline.process_frame(&frame).unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, GestureKind::Position);
        assert_eq!(events[0].sample.distance, 200.0);
        assert_eq!(pipeline.stats().rejected_hands, 1);
        assert_eq!(pipeline.stats().hands, 1);
        assert_eq!(pipeline.sink().len(), 1);
    }

    #[test]
    fn test_run_until_source_ends() {
        let clock = ManualClock::new(Duration::from_secs(1));
        let source = ScriptedSource::new(vec![
            LandmarkFrame::new(vec![open_hand()]),
            LandmarkFrame::default(),
            LandmarkFrame::new(vec![open_hand()]),
        ]);
        let mut pipeline = PointerPipeline::new(source, InMemorySink::new(), &clock);

        let stats = pipeline.run().unwrap();
        assert_eq!(
            stats,
            PipelineStats {
                frames: 3,
                hands: 2,
                rejected_hands: 0,
                events: 2,
            }
        );
        assert!(pipeline.step().unwrap().is_none());
    }

    #[test]
    fn test_config_defaults_from_partial_json() {
        let json = r#"{"tracker": {"match_radius_px": 50.0, "max_missed_frames": 2}}"#;
        let config: PipelineConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.gesture, GestureConfig::default());
        assert_eq!(config.tracker.max_missed_frames, 2);
    }
}
