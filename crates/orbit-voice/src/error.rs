//! Speech error types.

/// Errors from speech engines, audio playback and recognition.
#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    /// Pre-rendered audio payload could not be decoded.
    #[error("Invalid audio payload: {0}")]
    InvalidAudio(String),

    /// Audio output failed or was rejected by the device.
    #[error("Audio playback failed: {0}")]
    Playback(String),

    /// The synthetic voice engine failed.
    #[error("Speech synthesis failed: {0}")]
    Synthesis(String),

    /// Speech recognition failed.
    #[error("Speech recognition failed: {0}")]
    Recognition(String),

    /// No engine is available for this capability.
    #[error("{0} is not available")]
    Unavailable(&'static str),

    /// Voice capture is already running.
    #[error("Voice capture is already active")]
    AlreadyListening,

    /// IO error (engine subprocesses).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The operation was stopped before it finished.
    #[error("Speech operation cancelled")]
    Cancelled,
}

impl SpeechError {
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
