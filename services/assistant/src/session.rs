//! Session lifecycle control.
//!
//! The [`SessionController`] owns the activity flags and the capture-loop
//! task handles. Starting a mode sets its flag and spawns the loop; stopping
//! clears the flag and lets the loop wind down at its next unit boundary —
//! there is no forced cancellation mid-unit. Shutdown is terminal and
//! idempotent: it pins both flags false and waits a bounded moment for the
//! vision loop to release its capture device before the process exits.

use crate::capture::{VoiceTiming, run_vision_loop, run_voice_loop};
use crate::config::Config;
use crate::sensor::{SpeechCaptureFactory, VisionRigFactory};
use crate::sink::OutputSink;
use crate::state::SessionState;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error};

/// How long `shutdown` waits for the vision loop to observe the flag and
/// release the camera.
const VISION_SHUTDOWN_BOUND: Duration = Duration::from_secs(1);

pub struct SessionController {
    state: Arc<SessionState>,
    sink: OutputSink,
    speech_factory: SpeechCaptureFactory,
    vision_factory: VisionRigFactory,
    voice_timing: VoiceTiming,
    gesture_cooldown: Duration,
    voice_task: Option<JoinHandle<()>>,
    vision_task: Option<JoinHandle<()>>,
    finished: bool,
}

impl SessionController {
    pub fn new(
        state: Arc<SessionState>,
        sink: OutputSink,
        speech_factory: SpeechCaptureFactory,
        vision_factory: VisionRigFactory,
        config: &Config,
    ) -> Self {
        Self {
            state,
            sink,
            speech_factory,
            vision_factory,
            voice_timing: VoiceTiming::from(config),
            gesture_cooldown: config.gesture_cooldown,
            voice_task: None,
            vision_task: None,
            finished: false,
        }
    }

    pub fn state(&self) -> Arc<SessionState> {
        self.state.clone()
    }

    /// Resolves once shutdown has been requested — by [`Self::shutdown`] or
    /// by a voice command from inside the voice loop.
    pub fn shutdown_signal(&self) -> watch::Receiver<bool> {
        self.state.shutdown_signal()
    }

    /// Starts the voice loop. A no-op while the loop is already running or
    /// after shutdown.
    pub async fn start_voice(&mut self) {
        if self.state.is_shutdown() || self.state.voice_active() {
            return;
        }
        self.state.set_voice_active(true);
        self.sink
            .say("Voice control activated. How can I help you?")
            .await;
        self.voice_task = Some(tokio::spawn(run_voice_loop(
            self.state.clone(),
            self.sink.clone(),
            self.speech_factory.clone(),
            self.voice_timing,
        )));
    }

    /// Requests the voice loop to stop at its next unit boundary. A no-op
    /// while the loop is inactive.
    pub async fn stop_voice(&mut self) {
        if !self.state.voice_active() {
            return;
        }
        self.state.set_voice_active(false);
        self.sink.say("Voice control deactivated.").await;
    }

    /// Starts the vision loop. A no-op while the loop is already running or
    /// after shutdown.
    pub async fn start_vision(&mut self) {
        if self.state.is_shutdown() || self.state.vision_active() {
            return;
        }
        self.state.set_vision_active(true);
        self.sink.say("Sign language recognition activated.").await;
        self.vision_task = Some(tokio::spawn(run_vision_loop(
            self.state.clone(),
            self.sink.clone(),
            self.vision_factory.clone(),
            self.gesture_cooldown,
        )));
    }

    /// Requests the vision loop to stop at its next frame boundary. A no-op
    /// while the loop is inactive.
    pub async fn stop_vision(&mut self) {
        if !self.state.vision_active() {
            return;
        }
        self.state.set_vision_active(false);
        self.sink.say("Sign language recognition deactivated.").await;
    }

    /// The keyboard-shortcut/UI surface: one trigger flips one mode.
    pub async fn toggle_voice(&mut self) {
        if self.state.voice_active() {
            self.stop_voice().await;
        } else {
            self.start_voice().await;
        }
    }

    pub async fn toggle_vision(&mut self) {
        if self.state.vision_active() {
            self.stop_vision().await;
        } else {
            self.start_vision().await;
        }
    }

    /// Terminal shutdown: pins both activity flags false, then waits up to
    /// [`VISION_SHUTDOWN_BOUND`] for the vision loop to exit and release the
    /// camera. A missed bound is logged and termination proceeds; the voice
    /// loop's blocking capture is already bounded by its listen timeout, so
    /// it is left to wind down on its own. Calling this twice has no
    /// additional effect.
    pub async fn shutdown(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;
        // The flag may already be set by a voice command; the bounded
        // cleanup below still has to run exactly once.
        self.state.request_shutdown();
        self.sink.log("Shutting down.").await;

        if let Some(handle) = self.vision_task.take() {
            if tokio::time::timeout(VISION_SHUTDOWN_BOUND, handle)
                .await
                .is_err()
            {
                error!("vision loop did not stop within the shutdown bound");
            }
        }
        if let Some(handle) = self.voice_task.take() {
            drop(handle);
            debug!("voice loop left to wind down within its capture bound");
        }
    }
}
