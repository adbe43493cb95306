//! Pinch metric: thumb-tip to index-tip distance and midpoint.

use handcursor_landmarks::indices::{INDEX_FINGER_TIP, THUMB_TIP};
use handcursor_landmarks::{Hand, LandmarkPoint};

use crate::{PinchError, Result};

/// Landmarks a hand must have for the index tip to be present.
pub const MIN_LANDMARKS: usize = INDEX_FINGER_TIP + 1;

/// The pinch signal derived from one hand in one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchSample {
    /// Euclidean pixel distance between the two tips.
    pub distance: f64,
    /// Midpoint x, in pixels.
    pub cx: i32,
    /// Midpoint y, in pixels.
    pub cy: i32,
    pub thumb: LandmarkPoint,
    pub index: LandmarkPoint,
}

impl PinchSample {
    pub fn from_points(thumb: LandmarkPoint, index: LandmarkPoint) -> Self {
        let dx = f64::from(index.x) - f64::from(thumb.x);
        let dy = f64::from(index.y) - f64::from(thumb.y);
        Self {
            distance: dx.hypot(dy),
            cx: half_sum(thumb.x, index.x),
            cy: half_sum(thumb.y, index.y),
            thumb,
            index,
        }
    }

    pub fn midpoint(&self) -> (i32, i32) {
        (self.cx, self.cy)
    }
}

/// Floor of `(a + b) / 2`, without overflowing.
fn half_sum(a: i32, b: i32) -> i32 {
    // The floored half of two i32 values always fits in an i32.
    (i64::from(a) + i64::from(b)).div_euclid(2) as i32
}

/// Measure the pinch from a hand's landmarks in pixel space.
///
/// `points` must be in model order; the thumb tip and index tip are looked up
/// by position.
pub fn pinch_sample(points: &[LandmarkPoint]) -> Result<PinchSample> {
    match (points.get(THUMB_TIP), points.get(INDEX_FINGER_TIP)) {
        (Some(thumb), Some(index)) => Ok(PinchSample::from_points(*thumb, *index)),
        _ => Err(PinchError::TooFewLandmarks {
            found: points.len(),
            required: MIN_LANDMARKS,
        }),
    }
}

/// Measure the pinch of a detected hand in a `width` x `height` frame.
pub fn measure_hand(hand: &Hand, width: u32, height: u32) -> Result<PinchSample> {
    match (
        hand.point(THUMB_TIP, width, height),
        hand.point(INDEX_FINGER_TIP, width, height),
    ) {
        (Some(thumb), Some(index)) => Ok(PinchSample::from_points(thumb, index)),
        _ => Err(PinchError::TooFewLandmarks {
            found: hand.len(),
            required: MIN_LANDMARKS,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use handcursor_landmarks::{NormalizedLandmark, HAND_LANDMARK_COUNT};

    fn points_with_tips(thumb: (i32, i32), index: (i32, i32)) -> Vec<LandmarkPoint> {
        (0..HAND_LANDMARK_COUNT)
            .map(|id| match id {
                THUMB_TIP => LandmarkPoint::new(id, thumb.0, thumb.1, -0.02),
                INDEX_FINGER_TIP => LandmarkPoint::new(id, index.0, index.1, -0.04),
                _ => LandmarkPoint::new(id, 0, 0, 0.0),
            })
            .collect()
    }

    #[test]
    fn test_distance_and_midpoint() {
        let sample = pinch_sample(&points_with_tips((100, 200), (130, 240))).unwrap();

        assert_eq!(sample.distance, 50.0);
        assert_eq!(sample.midpoint(), (115, 220));
        assert_eq!(sample.thumb.id, THUMB_TIP);
        assert_eq!(sample.index.id, INDEX_FINGER_TIP);
        assert_eq!(sample.index.z, -0.04);
    }

    #[test]
    fn test_midpoint_halves_downward() {
        let sample = pinch_sample(&points_with_tips((101, 10), (102, 13))).unwrap();
        assert_eq!(sample.midpoint(), (101, 11));

        let sample = pinch_sample(&points_with_tips((-3, 0), (0, 0))).unwrap();
        assert_eq!(sample.cx, -2);
    }

    #[test]
    fn test_exactly_nine_landmarks_is_enough() {
        let points = points_with_tips((0, 0), (3, 4));
        let sample = pinch_sample(&points[..MIN_LANDMARKS]).unwrap();
        assert_eq!(sample.distance, 5.0);
    }

    #[test]
    fn test_too_few_landmarks() {
        let points = points_with_tips((0, 0), (3, 4));
        let err = pinch_sample(&points[..8]).unwrap_err();
        assert_eq!(
            err,
            PinchError::TooFewLandmarks {
                found: 8,
                required: 9
            }
        );
        assert!(pinch_sample(&[]).is_err());
    }

    #[test]
    fn test_measure_hand() {
        let mut landmarks = vec![NormalizedLandmark::default(); HAND_LANDMARK_COUNT];
        landmarks[THUMB_TIP] = NormalizedLandmark { x: 0.25, y: 0.5, z: 0.0 };
        landmarks[INDEX_FINGER_TIP] = NormalizedLandmark { x: 0.5, y: 0.5, z: 0.0 };
        let hand = Hand::new(landmarks);

        let sample = measure_hand(&hand, 400, 100).unwrap();
        assert_eq!(sample.distance, 100.0);
        assert_eq!(sample.midpoint(), (150, 50));
    }

    #[test]
    fn test_measure_hand_rejects_short_hand() {
        let hand = Hand::new(vec![NormalizedLandmark::default(); 4]);
        assert!(matches!(
            measure_hand(&hand, 1280, 720),
            Err(PinchError::TooFewLandmarks { found: 4, .. })
        ));
    }
}
