//! A scripted speech source for demos and tests.

use super::{SpeechCapture, SpeechCaptureError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::time::Duration;

/// One scripted listen attempt.
#[derive(Debug, Clone)]
pub enum ScriptedCapture {
    /// The "user" says this after a short pause.
    Phrase(&'static str),
    /// Nothing is said; the attempt times out.
    Silence,
    /// Something is said but the recognizer cannot make it out.
    Garbled,
}

/// Replays a fixed script, one item per listen attempt, then reports
/// timeouts forever. Stands in for the microphone + recognizer pair when no
/// real audio stack is wired up.
pub struct ScriptedSpeech {
    script: VecDeque<ScriptedCapture>,
}

/// Pause before a scripted phrase or garbled capture "arrives".
const SPEECH_DELAY: Duration = Duration::from_millis(250);

impl ScriptedSpeech {
    pub fn new(script: impl IntoIterator<Item = ScriptedCapture>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    /// The canned conversation the demo binary runs through.
    pub fn demo() -> Self {
        use ScriptedCapture::*;
        Self::new([
            Phrase("hello"),
            Phrase("what time is it"),
            Garbled,
            Phrase("search rust accessibility tools"),
            Silence,
            Phrase("open calculator"),
            Phrase("stop listening"),
        ])
    }
}

#[async_trait]
impl SpeechCapture for ScriptedSpeech {
    async fn calibrate(&mut self, ambient: Duration) -> anyhow::Result<()> {
        tokio::time::sleep(ambient).await;
        Ok(())
    }

    async fn capture_phrase(
        &mut self,
        timeout: Duration,
        _phrase_limit: Duration,
    ) -> Result<String, SpeechCaptureError> {
        match self.script.pop_front() {
            Some(ScriptedCapture::Phrase(text)) => {
                tokio::time::sleep(SPEECH_DELAY.min(timeout)).await;
                Ok(text.to_string())
            }
            Some(ScriptedCapture::Garbled) => {
                tokio::time::sleep(SPEECH_DELAY.min(timeout)).await;
                Err(SpeechCaptureError::Unintelligible)
            }
            Some(ScriptedCapture::Silence) | None => {
                tokio::time::sleep(timeout).await;
                Err(SpeechCaptureError::Timeout)
            }
        }
    }
}
