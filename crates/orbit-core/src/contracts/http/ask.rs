use serde::{Deserialize, Serialize};

use super::STATUS_SUCCESS;
use crate::domain::ConversationTurn;

/// Body of `POST /api/ask`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskRequest {
    pub question: String,
    pub history: Vec<ConversationTurn>,
}

impl AskRequest {
    pub fn new(question: impl Into<String>, history: Vec<ConversationTurn>) -> Self {
        Self {
            question: question.into(),
            history,
        }
    }
}

/// Response of `POST /api/ask`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub audio_available: bool,
    /// Base64-encoded pre-rendered speech for `response`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_data: Option<String>,
}

/// What the session should do with an [`AskResponse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AskOutcome {
    /// An answer to display and speak, optionally with natural-voice audio.
    Answer { text: String, audio: Option<String> },
    /// A server-reported failure; `message` is the supplied error text.
    Failure { message: Option<String> },
}

impl AskResponse {
    /// Build a successful response (mostly for tests and fakes).
    pub fn success(response: impl Into<String>) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            response: Some(response.into()),
            ..Self::default()
        }
    }

    /// Build a server-reported failure.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: Some(message.into()),
            ..Self::default()
        }
    }

    /// Attach base64 audio to the response.
    #[must_use]
    pub fn with_audio(mut self, audio_base64: impl Into<String>) -> Self {
        self.audio_available = true;
        self.audio_data = Some(audio_base64.into());
        self
    }

    /// Whether the server reported success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }

    /// Classify the response.
    ///
    /// Audio is only passed on when the server flags it as available and the
    /// payload is non-empty. A "success" without answer text is treated as a
    /// failure. For failures the `message` field is preferred over
    /// `response`.
    #[must_use]
    pub fn into_outcome(self) -> AskOutcome {
        let success = self.is_success();
        match (success, self.response) {
            (true, Some(text)) if !text.trim().is_empty() => {
                let audio = self
                    .audio_data
                    .filter(|data| self.audio_available && !data.is_empty());
                AskOutcome::Answer { text, audio }
            }
            (true, _) => AskOutcome::Failure {
                message: self.message,
            },
            (false, response) => AskOutcome::Failure {
                message: self.message.or(response).filter(|m| !m.trim().is_empty()),
            },
        }
    }
}
