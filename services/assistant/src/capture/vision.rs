//! The vision capture loop: camera frames to debounced gesture events.

use crate::overlay;
use crate::sensor::{FrameError, VisionRigFactory};
use crate::sink::OutputSink;
use crate::state::SessionState;
use attend_core::{GestureDebouncer, classify};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Runs until the vision activity flag clears or shutdown is requested,
/// checking the flags only between frames. The camera is acquired here and
/// released when the loop returns, so a stopped loop frees the device.
///
/// A failed frame grab skips that frame silently; a disconnected camera is
/// surfaced once and drops the loop out of its activity state.
pub async fn run_vision_loop(
    state: Arc<SessionState>,
    sink: OutputSink,
    factory: VisionRigFactory,
    cooldown: Duration,
) {
    let mut rig = match factory() {
        Ok(rig) => rig,
        Err(error) => {
            sink.log(format!("Camera unavailable: {error:#}")).await;
            state.set_vision_active(false);
            return;
        }
    };

    let mut debouncer = GestureDebouncer::new(cooldown);

    while state.vision_active() && !state.is_shutdown() {
        let mut frame = match rig.camera.next_frame().await {
            Ok(frame) => frame,
            Err(FrameError::Grab) => continue,
            Err(FrameError::Disconnected(reason)) => {
                sink.log(format!("Camera disconnected: {reason}")).await;
                state.set_vision_active(false);
                break;
            }
        };

        let hands = rig.detector.detect(&frame);
        // The runtime clock keeps the cooldown testable under paused time.
        let now = tokio::time::Instant::now().into_std();
        for hand in &hands {
            if let Some(event) = debouncer.accept(classify(hand), now) {
                sink.log(format!("Detected sign: {}", event.gesture)).await;
                sink.say(format!("{} sign detected", event.gesture)).await;
            }
        }

        // One annotated render per processed frame, best effort.
        overlay::draw_hands(&mut frame, &hands);
        rig.display.render(&frame, &hands);
    }
    debug!("vision loop exited");
}
