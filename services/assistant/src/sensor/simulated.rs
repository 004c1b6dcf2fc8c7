//! Simulated camera and hand detector.
//!
//! Stands in for the real capture stack the same way a simulated pipeline
//! stands in when no inference backend is available: the camera emits blank
//! frames at a fixed rate and the detector cycles through a sequence of
//! parametric hand poses with a little coordinate jitter, so the classifier
//! and debouncer see realistic, non-identical geometry.

use super::{CameraFrame, FrameError, FrameSource, HandDetector};
use async_trait::async_trait;
use attend_core::{HandLandmark, LandmarkFrame, Point};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

const FRAME_WIDTH: u32 = 640;
const FRAME_HEIGHT: u32 = 480;

/// Emits blank frames at the configured interval.
pub struct SimulatedCamera {
    interval: Duration,
}

impl SimulatedCamera {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Default for SimulatedCamera {
    fn default() -> Self {
        // Roughly 30 fps.
        Self::new(Duration::from_millis(33))
    }
}

#[async_trait]
impl FrameSource for SimulatedCamera {
    async fn next_frame(&mut self) -> Result<CameraFrame, FrameError> {
        tokio::time::sleep(self.interval).await;
        Ok(CameraFrame::blank(FRAME_WIDTH, FRAME_HEIGHT))
    }
}

/// The poses the simulated hand cycles through. The empty slot models
/// frames where no hand is in view.
const POSES: &[Option<[bool; 5]>] = &[
    Some([true, true, true, true, true]), // open palm
    None,
    Some([false, false, false, false, false]), // fist
    None,
    Some([false, true, false, false, false]), // raised index
    None,
];

/// Frames a pose is held before advancing.
const HOLD_FRAMES: u64 = 45;

pub struct SimulatedHands {
    frame_count: u64,
    rng: StdRng,
}

impl SimulatedHands {
    pub fn new() -> Self {
        Self {
            frame_count: 0,
            rng: StdRng::seed_from_u64(0x5eed),
        }
    }

    fn jitter(&mut self) -> f32 {
        self.rng.random_range(-0.004..0.004)
    }

    /// Builds a complete 21-point frame realizing the extension flags
    /// `[thumb, index, middle, ring, pinky]`.
    pub fn pose(&mut self, extended: [bool; 5]) -> LandmarkFrame {
        let mut points = vec![Point::new(0.5, 0.7, 0.0); HandLandmark::COUNT];

        let wrist = Point::new(0.5 + self.jitter(), 0.85 + self.jitter(), 0.0);
        points[HandLandmark::Wrist.index()] = wrist;
        points[HandLandmark::IndexFingerMcp.index()] =
            Point::new(0.46 + self.jitter(), 0.55 + self.jitter(), 0.0);

        let thumb_x = if extended[0] { 0.34 } else { 0.64 };
        points[HandLandmark::ThumbTip.index()] =
            Point::new(thumb_x + self.jitter(), 0.6 + self.jitter(), 0.0);

        let tips = [
            HandLandmark::IndexFingerTip,
            HandLandmark::MiddleFingerTip,
            HandLandmark::RingFingerTip,
            HandLandmark::PinkyTip,
        ];
        for (i, tip) in tips.into_iter().enumerate() {
            let x = 0.42 + 0.08 * i as f32;
            let y = if extended[i + 1] { 0.3 } else { 0.7 };
            points[tip.index()] = Point::new(x + self.jitter(), y + self.jitter(), 0.0);
        }

        LandmarkFrame::new(points)
    }
}

impl Default for SimulatedHands {
    fn default() -> Self {
        Self::new()
    }
}

impl HandDetector for SimulatedHands {
    fn detect(&mut self, _frame: &CameraFrame) -> Vec<LandmarkFrame> {
        let slot = (self.frame_count / HOLD_FRAMES) as usize % POSES.len();
        self.frame_count += 1;
        match POSES[slot] {
            Some(extended) => vec![self.pose(extended)],
            None => Vec::new(),
        }
    }
}
