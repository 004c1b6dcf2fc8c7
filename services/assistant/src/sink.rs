//! Serialized Output Sink
//!
//! Both capture loops speak and log through one cloneable [`OutputSink`]
//! handle. A single consumer task owns the speech synthesizer and drains the
//! channel, so concurrent producers can never interleave partial messages.
//! Every emitted line is also fanned out on a broadcast channel that an
//! upward collaborator (a UI console, a test) may subscribe to.

use crate::tts::SpeechSynthesizer;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::{info, warn};

const QUEUE_CAPACITY: usize = 64;
const FEED_CAPACITY: usize = 256;

#[derive(Debug)]
enum SinkMessage {
    Log(String),
    Speak(String),
}

/// Cloneable producer handle onto the sink task.
#[derive(Clone)]
pub struct OutputSink {
    tx: mpsc::Sender<SinkMessage>,
    feed: broadcast::Sender<String>,
}

impl OutputSink {
    /// Emits a console line without speaking it.
    pub async fn log(&self, line: impl Into<String>) {
        let _ = self.tx.send(SinkMessage::Log(line.into())).await;
    }

    /// Emits an `Assistant:` console line and issues a speech request.
    pub async fn say(&self, text: impl Into<String>) {
        let _ = self.tx.send(SinkMessage::Speak(text.into())).await;
    }

    /// The log-message stream an upward collaborator may render. A lagging
    /// subscriber loses old lines; it never blocks the sink.
    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.feed.subscribe()
    }
}

/// Spawns the sink task. The task ends once every producer handle has been
/// dropped and the queue has drained.
pub fn spawn_sink(mut synthesizer: Box<dyn SpeechSynthesizer>) -> (OutputSink, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::channel(QUEUE_CAPACITY);
    let (feed, _) = broadcast::channel(FEED_CAPACITY);
    let feed_out = feed.clone();

    let handle = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            match message {
                SinkMessage::Log(line) => {
                    info!("{line}");
                    let _ = feed_out.send(line);
                }
                SinkMessage::Speak(text) => {
                    let line = format!("Assistant: {text}");
                    info!("{line}");
                    let _ = feed_out.send(line);
                    if let Err(error) = synthesizer.speak(&text).await {
                        warn!(?error, "speech synthesis request failed");
                    }
                }
            }
        }
    });

    (OutputSink { tx, feed }, handle)
}
