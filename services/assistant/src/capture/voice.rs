//! The voice capture loop: microphone phrases to interpreted commands.

use crate::config::Config;
use crate::sensor::{SpeechCapture, SpeechCaptureError, SpeechCaptureFactory};
use crate::sink::OutputSink;
use crate::state::SessionState;
use anyhow::Context;
use attend_core::{CommandAction, SideEffect, interpret};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Listen-attempt timing, lifted out of [`Config`] so the loop carries only
/// what it uses.
#[derive(Debug, Clone, Copy)]
pub struct VoiceTiming {
    pub ambient_calibration: Duration,
    pub listen_timeout: Duration,
    pub phrase_time_limit: Duration,
    pub error_backoff: Duration,
}

impl From<&Config> for VoiceTiming {
    fn from(config: &Config) -> Self {
        Self {
            ambient_calibration: config.ambient_calibration,
            listen_timeout: config.listen_timeout,
            phrase_time_limit: config.phrase_time_limit,
            error_backoff: config.error_backoff,
        }
    }
}

/// Runs until the voice activity flag clears or shutdown is requested,
/// checking the flags only between listen attempts. Failure to acquire the
/// microphone is surfaced once and drops the loop out of its activity
/// state; any unexpected error inside an attempt is logged and followed by
/// a backoff pause — the loop itself never dies of an error.
pub async fn run_voice_loop(
    state: Arc<SessionState>,
    sink: OutputSink,
    factory: SpeechCaptureFactory,
    timing: VoiceTiming,
) {
    let mut microphone = match factory() {
        Ok(microphone) => microphone,
        Err(error) => {
            sink.log(format!("Microphone unavailable: {error:#}")).await;
            state.set_voice_active(false);
            return;
        }
    };

    while state.voice_active() && !state.is_shutdown() {
        if let Err(error) = listen_once(microphone.as_mut(), &state, &sink, &timing).await {
            sink.log(format!("Error in voice control: {error:#}")).await;
            tokio::time::sleep(timing.error_backoff).await;
        }
    }
    debug!("voice loop exited");
}

/// One unit of work: calibrate, capture one phrase, interpret, dispatch.
async fn listen_once(
    microphone: &mut dyn SpeechCapture,
    state: &SessionState,
    sink: &OutputSink,
    timing: &VoiceTiming,
) -> anyhow::Result<()> {
    microphone
        .calibrate(timing.ambient_calibration)
        .await
        .context("ambient noise calibration failed")?;

    sink.log("Listening...").await;
    let transcript = match microphone
        .capture_phrase(timing.listen_timeout, timing.phrase_time_limit)
        .await
    {
        Ok(transcript) => transcript,
        Err(SpeechCaptureError::Timeout) => {
            sink.log("No speech detected").await;
            return Ok(());
        }
        Err(SpeechCaptureError::Unintelligible) => {
            sink.log("Could not understand audio").await;
            return Ok(());
        }
        Err(SpeechCaptureError::Service(reason)) => {
            sink.log(format!("Recognition error: {reason}")).await;
            return Ok(());
        }
    };

    let utterance = transcript.to_lowercase();
    sink.log(format!("User said: {utterance}")).await;
    dispatch(interpret(&utterance), state, sink).await;
    Ok(())
}

/// Speaks the reply and applies the side effect. `OpenApp` and `Search` are
/// signals for an external collaborator; here they only reach the log.
pub(crate) async fn dispatch(action: CommandAction, state: &SessionState, sink: &OutputSink) {
    if let Some(reply) = action.reply {
        sink.say(reply).await;
    }
    match action.effect {
        Some(SideEffect::StopListening) => state.set_voice_active(false),
        Some(SideEffect::Shutdown) => {
            state.request_shutdown();
        }
        Some(SideEffect::OpenApp { name }) => info!(app = %name, "application launch requested"),
        Some(SideEffect::Search { query }) => info!(%query, "search requested"),
        None => {}
    }
}
