//! CLI-specific error types and exit codes.

use orbit_core::SettingsError;
use orbit_http::HttpError;
use orbit_voice::SpeechError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Argument error (unknown planet, empty question, ...).
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// Invalid settings from flags or environment.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The backend could not answer.
    #[error("{0}")]
    Service(String),

    /// Voice input could not be started.
    #[error("Voice error: {0}")]
    Voice(String),

    /// IO error (terminal, line editor).
    #[error("IO error: {0}")]
    Io(String),
}

impl CliError {
    /// Map error to an exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Arguments(_) => 2,
            Self::Config(_) => 78,  // EX_CONFIG
            Self::Service(_) => 69, // EX_UNAVAILABLE
            Self::Voice(_) => 71,   // EX_OSERR
            Self::Io(_) => 74,      // EX_IOERR
        }
    }
}

impl From<SettingsError> for CliError {
    fn from(err: SettingsError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<HttpError> for CliError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::InvalidUrl(e) => Self::Config(format!("Invalid API URL: {e}")),
            other => Self::Config(other.to_string()),
        }
    }
}

impl From<SpeechError> for CliError {
    fn from(err: SpeechError) -> Self {
        Self::Voice(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
