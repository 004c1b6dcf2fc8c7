//! Main Entrypoint for the Attend Assistant
//!
//! This binary is responsible for:
//! 1. Loading configuration from the environment.
//! 2. Initializing logging.
//! 3. Wiring the sensor and speech collaborators into the session controller.
//! 4. Serving the line-oriented command surface on stdin.
//! 5. Handling Ctrl+C and voice-initiated shutdown gracefully.

use anyhow::Context;
use attend_assistant::{
    config::Config,
    sensor::{
        NoopDisplay, SpeechCaptureFactory, VisionRig, VisionRigFactory,
        scripted::ScriptedSpeech,
        simulated::{SimulatedCamera, SimulatedHands},
    },
    session::SessionController,
    sink::spawn_sink,
    state::SessionState,
    tts,
};
use clap::Parser;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "assistant", about = "Dual-mode accessibility assistant", version)]
struct Args {
    /// Start both capture loops immediately instead of waiting for commands.
    #[arg(long)]
    autostart: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // --- 1. Load Configuration ---
    let config = Config::from_env().context("Failed to load configuration")?;

    // --- 2. Initialize Logging ---
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .init();
    info!("Configuration loaded. Initializing session...");

    // --- 3. Wire Collaborators ---
    // The microphone/recognizer and the camera/detector stacks are opaque
    // collaborators; this build ships the scripted and simulated backends.
    let synthesizer = tts::from_config(&config)?;
    let (sink, _sink_task) = spawn_sink(synthesizer);
    let state = Arc::new(SessionState::new());

    let speech_factory: SpeechCaptureFactory = Arc::new(|| Ok(Box::new(ScriptedSpeech::demo())));
    let vision_factory: VisionRigFactory = Arc::new(|| {
        Ok(VisionRig {
            camera: Box::new(SimulatedCamera::default()),
            detector: Box::new(SimulatedHands::new()),
            display: Box::new(NoopDisplay),
        })
    });

    let mut controller = SessionController::new(
        state.clone(),
        sink.clone(),
        speech_factory,
        vision_factory,
        &config,
    );
    let mut shutdown_rx = controller.shutdown_signal();

    sink.say(
        "Accessibility Assistant initialized. Type 'voice' or 'vision' to toggle a mode, \
         'quit' to exit.",
    )
    .await;

    if args.autostart {
        controller.start_voice().await;
        controller.start_vision().await;
    }

    // --- 4. Command Surface ---
    // One line per command; 'f1'/'f2' mirror the original's keyboard
    // shortcuts.
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Received shutdown signal. Shutting down gracefully...");
                break;
            }
            _ = shutdown_rx.changed() => break,
            line = lines.next_line() => match line {
                Ok(Some(command)) => match command.trim().to_lowercase().as_str() {
                    "voice" | "f1" => controller.toggle_voice().await,
                    "vision" | "f2" => controller.toggle_vision().await,
                    "status" => {
                        sink.log(format!(
                            "voice: {}, vision: {}",
                            if state.voice_active() { "active" } else { "inactive" },
                            if state.vision_active() { "active" } else { "inactive" },
                        ))
                        .await;
                    }
                    "quit" | "exit" => break,
                    "" => {}
                    other => sink.log(format!("Unknown command: {other}")).await,
                },
                Ok(None) => break, // stdin closed
                Err(error) => {
                    warn!(?error, "failed to read command");
                    break;
                }
            },
        }
    }

    // --- 5. Shut Down ---
    controller.shutdown().await;
    info!("Assistant has shut down.");
    Ok(())
}
