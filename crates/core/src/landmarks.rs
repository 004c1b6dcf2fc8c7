//! Hand landmark vocabulary and per-hand keypoint frames.
//!
//! A detector (an external collaborator) produces one [`LandmarkFrame`] per
//! detected hand per processed video frame: an ordered sequence of named
//! keypoints with normalized coordinates. The frame is immutable and is
//! consumed synchronously by the gesture classifier.

use serde::{Deserialize, Serialize};

/// A single keypoint in normalized coordinates.
///
/// `x` and `y` lie in `[0, 1]` relative to the frame (smaller `y` is higher
/// on screen); `z` is depth in the detector's own unbounded unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance ignoring depth. Gesture geometry is judged in the
    /// image plane only.
    pub fn planar_distance(&self, other: Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// The fixed, ordered 21-keypoint vocabulary of one hand.
///
/// Discriminants are the positions within a [`LandmarkFrame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum HandLandmark {
    Wrist = 0,
    ThumbCmc = 1,
    ThumbMcp = 2,
    ThumbIp = 3,
    ThumbTip = 4,
    IndexFingerMcp = 5,
    IndexFingerPip = 6,
    IndexFingerDip = 7,
    IndexFingerTip = 8,
    MiddleFingerMcp = 9,
    MiddleFingerPip = 10,
    MiddleFingerDip = 11,
    MiddleFingerTip = 12,
    RingFingerMcp = 13,
    RingFingerPip = 14,
    RingFingerDip = 15,
    RingFingerTip = 16,
    PinkyMcp = 17,
    PinkyPip = 18,
    PinkyDip = 19,
    PinkyTip = 20,
}

impl HandLandmark {
    /// Number of keypoints in a complete frame.
    pub const COUNT: usize = 21;

    pub fn index(self) -> usize {
        self as usize
    }
}

/// One detected hand: keypoints ordered by [`HandLandmark`] discriminant.
///
/// A frame may be incomplete (a detector glitch, a partially occluded hand);
/// consumers must treat missing keypoints as a recoverable condition, which
/// is why [`LandmarkFrame::get`] returns an `Option`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LandmarkFrame {
    points: Vec<Point>,
}

impl LandmarkFrame {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Looks up a named keypoint, or `None` if the frame is too short.
    pub fn get(&self, landmark: HandLandmark) -> Option<Point> {
        self.points.get(landmark.index()).copied()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn is_complete(&self) -> bool {
        self.points.len() >= HandLandmark::COUNT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn get_returns_none_past_the_end() {
        let frame = LandmarkFrame::new(vec![Point::default(); 5]);
        assert!(frame.get(HandLandmark::Wrist).is_some());
        assert!(frame.get(HandLandmark::ThumbTip).is_some());
        assert!(frame.get(HandLandmark::IndexFingerMcp).is_none());
        assert!(frame.get(HandLandmark::PinkyTip).is_none());
    }

    #[test]
    fn completeness_requires_all_named_keypoints() {
        assert!(!LandmarkFrame::default().is_complete());
        assert!(!LandmarkFrame::new(vec![Point::default(); 20]).is_complete());
        assert!(LandmarkFrame::new(vec![Point::default(); 21]).is_complete());
    }

    #[test]
    fn planar_distance_ignores_depth() {
        let a = Point::new(0.3, 0.4, 0.0);
        let b = Point::new(0.3, 0.4, 5.0);
        assert_abs_diff_eq!(a.planar_distance(b), 0.0, epsilon = 1e-6);

        let c = Point::new(0.0, 0.0, 0.0);
        let d = Point::new(0.3, 0.4, -2.0);
        assert_abs_diff_eq!(c.planar_distance(d), 0.5, epsilon = 1e-6);
    }

    #[test]
    fn landmark_indices_match_the_detector_ordering() {
        assert_eq!(HandLandmark::Wrist.index(), 0);
        assert_eq!(HandLandmark::ThumbTip.index(), 4);
        assert_eq!(HandLandmark::IndexFingerMcp.index(), 5);
        assert_eq!(HandLandmark::IndexFingerTip.index(), 8);
        assert_eq!(HandLandmark::MiddleFingerTip.index(), 12);
        assert_eq!(HandLandmark::RingFingerTip.index(), 16);
        assert_eq!(HandLandmark::PinkyTip.index(), 20);
    }
}
