//! Sensor-side collaborator traits.
//!
//! The capture loops treat every device and recognition engine as an opaque
//! service behind one of these traits:
//!
//! - [`SpeechCapture`]: microphone + speech-to-text, one phrase at a time.
//! - [`FrameSource`]: camera, one frame at a time.
//! - [`HandDetector`]: image frame to zero or more hand landmark sets.
//! - [`GestureDisplay`]: best-effort rendering of the annotated frame.
//!
//! Factories construct the collaborators inside the loop task, so a device
//! is acquired when its loop starts and released when the loop exits.

pub mod scripted;
pub mod simulated;

use async_trait::async_trait;
use attend_core::LandmarkFrame;
use std::sync::Arc;
use std::time::Duration;

/// Typed failures of one listen attempt.
#[derive(Debug, thiserror::Error)]
pub enum SpeechCaptureError {
    #[error("no speech detected within the listen window")]
    Timeout,
    #[error("could not understand audio")]
    Unintelligible,
    #[error("recognition service error: {0}")]
    Service(String),
}

/// Microphone plus speech-to-text engine, captured one bounded phrase at a
/// time. Both calls block only up to their given bounds, which is what
/// keeps cooperative cancellation responsive.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SpeechCapture: Send {
    /// Samples ambient noise so the next capture can set its energy
    /// threshold. Runs before every listen attempt.
    async fn calibrate(&mut self, ambient: Duration) -> anyhow::Result<()>;

    /// Captures one phrase: waits up to `timeout` for speech to start and
    /// records at most `phrase_limit` of it, returning the transcript.
    async fn capture_phrase(
        &mut self,
        timeout: Duration,
        phrase_limit: Duration,
    ) -> Result<String, SpeechCaptureError>;
}

/// One camera frame, RGB8 row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraFrame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl CameraFrame {
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 3],
        }
    }
}

/// Typed failures of one frame grab.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// Transient: this frame is lost, the next one may be fine.
    #[error("frame grab failed")]
    Grab,
    /// The device is gone; the vision loop exits its activity state.
    #[error("camera disconnected: {0}")]
    Disconnected(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FrameSource: Send {
    async fn next_frame(&mut self) -> Result<CameraFrame, FrameError>;
}

/// Opaque hand-landmark detector: frame in, zero or more hands out.
#[cfg_attr(test, mockall::automock)]
pub trait HandDetector: Send {
    fn detect(&mut self, frame: &CameraFrame) -> Vec<LandmarkFrame>;
}

/// Live display of the annotated frame. Rendering is best effort and must
/// not block the vision loop beyond the call itself.
#[cfg_attr(test, mockall::automock)]
pub trait GestureDisplay: Send {
    fn render(&mut self, frame: &CameraFrame, hands: &[LandmarkFrame]);
}

/// Discards every frame. Real windowing lives outside this crate.
pub struct NoopDisplay;

impl GestureDisplay for NoopDisplay {
    fn render(&mut self, _frame: &CameraFrame, _hands: &[LandmarkFrame]) {}
}

/// Everything the vision loop needs, bundled so one factory call acquires
/// the camera, detector and display together.
pub struct VisionRig {
    pub camera: Box<dyn FrameSource>,
    pub detector: Box<dyn HandDetector>,
    pub display: Box<dyn GestureDisplay>,
}

pub type SpeechCaptureFactory =
    Arc<dyn Fn() -> anyhow::Result<Box<dyn SpeechCapture>> + Send + Sync>;
pub type VisionRigFactory = Arc<dyn Fn() -> anyhow::Result<VisionRig> + Send + Sync>;
