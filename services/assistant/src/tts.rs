//! Text-to-speech collaborators.
//!
//! Speech synthesis is an opaque service: the sink issues a playback
//! request and never waits for the audio to finish.

use crate::config::{Config, SynthBackend};
use anyhow::Context;
use async_trait::async_trait;
use std::process::Stdio;

#[async_trait]
pub trait SpeechSynthesizer: Send {
    /// Issues one playback request. Implementations must return as soon as
    /// the request is underway; they never block on playback itself.
    async fn speak(&mut self, text: &str) -> anyhow::Result<()>;
}

/// Playback elided entirely; the sink's log line is the only trace of the
/// utterance. Useful for tests and for environments without audio out.
pub struct SilentSynthesizer;

#[async_trait]
impl SpeechSynthesizer for SilentSynthesizer {
    async fn speak(&mut self, _text: &str) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Spawns an external speech program (`espeak`, `say`, `spd-say`, ...) once
/// per request, passing the text as the single argument. The child is left
/// to run on its own.
pub struct CommandSynthesizer {
    program: String,
}

impl CommandSynthesizer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for CommandSynthesizer {
    async fn speak(&mut self, text: &str) -> anyhow::Result<()> {
        tokio::process::Command::new(&self.program)
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("failed to spawn speech program '{}'", self.program))?;
        Ok(())
    }
}

/// Builds the synthesizer selected by the configuration.
pub fn from_config(config: &Config) -> anyhow::Result<Box<dyn SpeechSynthesizer>> {
    match config.synth {
        SynthBackend::Silent => Ok(Box::new(SilentSynthesizer)),
        SynthBackend::Command => {
            let program = config
                .synth_command
                .clone()
                .context("SPEECH_SYNTH_COMMAND is required for the 'command' backend")?;
            Ok(Box::new(CommandSynthesizer::new(program)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn silent_synthesizer_accepts_any_text() {
        let mut synth = SilentSynthesizer;
        assert!(synth.speak("Hello there!").await.is_ok());
        assert!(synth.speak("").await.is_ok());
    }

    #[tokio::test]
    async fn command_synthesizer_reports_missing_programs() {
        let mut synth = CommandSynthesizer::new("definitely-not-a-real-tts-program");
        let err = synth.speak("hi").await.unwrap_err();
        assert!(err.to_string().contains("definitely-not-a-real-tts-program"));
    }

    #[tokio::test]
    async fn command_synthesizer_returns_without_waiting() {
        // `sleep 5` would block for five seconds if we awaited the child.
        let mut synth = CommandSynthesizer::new("sleep");
        let started = std::time::Instant::now();
        synth.speak("5").await.expect("spawn should succeed");
        assert!(started.elapsed() < std::time::Duration::from_secs(1));
    }
}
