use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(String),
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Defines the supported text-to-speech backends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SynthBackend {
    /// Playback elided; spoken feedback only appears in the log stream.
    Silent,
    /// Spawns an external program (`espeak`, `say`, ...) per request.
    Command,
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub log_level: Level,
    /// Ambient-noise sampling window before each listen attempt.
    pub ambient_calibration: Duration,
    /// How long one listen attempt waits for speech to start.
    pub listen_timeout: Duration,
    /// Upper bound on the length of one captured phrase.
    pub phrase_time_limit: Duration,
    /// Minimum spacing between accepted gestures.
    pub gesture_cooldown: Duration,
    /// Pause after an unexpected capture-loop error before retrying.
    pub error_backoff: Duration,
    pub synth: SynthBackend,
    pub synth_command: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let ambient_calibration = millis_var("AMBIENT_CALIBRATION_MS", 500)?;
        let listen_timeout = millis_var("LISTEN_TIMEOUT_MS", 5_000)?;
        let phrase_time_limit = millis_var("PHRASE_TIME_LIMIT_MS", 5_000)?;
        let gesture_cooldown = millis_var("GESTURE_COOLDOWN_MS", 1_000)?;
        let error_backoff = millis_var("ERROR_BACKOFF_MS", 1_000)?;

        let synth_str = std::env::var("SPEECH_SYNTH").unwrap_or_else(|_| "silent".to_string());
        let synth = match synth_str.to_lowercase().as_str() {
            "command" => SynthBackend::Command,
            "silent" => SynthBackend::Silent,
            other => {
                return Err(ConfigError::InvalidValue(
                    "SPEECH_SYNTH".to_string(),
                    format!("'{}' is not a supported backend", other),
                ));
            }
        };

        let synth_command = std::env::var("SPEECH_SYNTH_COMMAND").ok();
        if synth == SynthBackend::Command && synth_command.is_none() {
            return Err(ConfigError::MissingVar(
                "SPEECH_SYNTH_COMMAND must be set for the 'command' backend".to_string(),
            ));
        }

        Ok(Self {
            log_level,
            ambient_calibration,
            listen_timeout,
            phrase_time_limit,
            gesture_cooldown,
            error_backoff,
            synth,
            synth_command,
        })
    }
}

/// Reads a millisecond duration from the environment, falling back to a
/// default when the variable is unset.
fn millis_var(var: &str, default_ms: u64) -> Result<Duration, ConfigError> {
    match std::env::var(var) {
        Ok(raw) => raw
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|_| {
                ConfigError::InvalidValue(
                    var.to_string(),
                    format!("'{}' is not a duration in milliseconds", raw),
                )
            }),
        Err(_) => Ok(Duration::from_millis(default_ms)),
    }
}
