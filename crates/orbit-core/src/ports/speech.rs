//! Port for spoken output.

use async_trait::async_trait;

use crate::domain::RequestToken;

/// One piece of text to speak on behalf of an ask operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechRequest {
    pub text: String,
    /// Base64-encoded pre-rendered audio, when the backend supplied it.
    pub audio_base64: Option<String>,
    /// Operation this speech belongs to; stale tokens are dropped.
    pub token: RequestToken,
}

impl SpeechRequest {
    pub fn new(text: impl Into<String>, token: RequestToken) -> Self {
        Self {
            text: text.into(),
            audio_base64: None,
            token,
        }
    }

    #[must_use]
    pub fn with_audio(mut self, audio_base64: Option<String>) -> Self {
        self.audio_base64 = audio_base64;
        self
    }
}

/// Speech output with natural/synthetic fallback.
#[async_trait]
pub trait SpeechOutputPort: Send + Sync {
    /// Speak `request`, resolving once playback has finished, failed or been
    /// stopped. Requests whose token is not current are dropped.
    async fn speak(&self, request: SpeechRequest);

    /// Stop everything that is playing. Idempotent.
    fn stop_all(&self);
}

/// Speech output that says nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSpeechOutput;

#[async_trait]
impl SpeechOutputPort for NoopSpeechOutput {
    async fn speak(&self, request: SpeechRequest) {
        tracing::trace!(token = %request.token, "Speech disabled; skipping");
    }

    fn stop_all(&self) {}
}
