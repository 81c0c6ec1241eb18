//! Canonical event union for everything the display layer renders.
//!
//! Services never touch a terminal or widget directly; they emit
//! [`AppEvent`]s through an [`AppEventEmitter`](crate::ports::AppEventEmitter)
//! and the front end decides how to show them.
//!
//! # Wire Format
//!
//! Events are serialized with a `type` tag:
//!
//! ```json
//! { "type": "message_added", "kind": "assistant", "text": "Mars is red." }
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::SatellitePosition;

/// Who a chat message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    User,
    Assistant,
    Error,
}

/// Voice capture indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum VoiceStatus {
    /// Not capturing; ready for a new session.
    Ready,
    /// Microphone is open.
    Listening,
    /// A final transcript was recognized.
    Heard { transcript: String },
    /// Recognition failed; capture has returned to idle.
    Failed { reason: String },
}

/// Display events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppEvent {
    // ========== Conversation ==========
    /// A message was appended to the conversation log.
    MessageAdded { kind: MessageKind, text: String },

    /// The "thinking" indicator was shown or hidden.
    LoadingChanged { loading: bool },

    /// Text and voice inputs were enabled or disabled.
    InputsEnabled { enabled: bool },

    /// The input field content was replaced (cleared, or filled by voice).
    InputTextChanged { text: String },

    // ========== Voice ==========
    /// Voice capture state changed.
    VoiceStatusChanged { status: VoiceStatus },

    /// The "stop speaking" control was shown or hidden.
    StopControlChanged { visible: bool },

    // ========== Satellite ==========
    /// A fresh satellite position is available.
    SatelliteUpdated { position: SatellitePosition },
}

impl AppEvent {
    /// Create a user message event.
    pub fn user_message(text: impl Into<String>) -> Self {
        Self::MessageAdded {
            kind: MessageKind::User,
            text: text.into(),
        }
    }

    /// Create an assistant message event.
    pub fn assistant_message(text: impl Into<String>) -> Self {
        Self::MessageAdded {
            kind: MessageKind::Assistant,
            text: text.into(),
        }
    }

    /// Create an error message event.
    pub fn error_message(text: impl Into<String>) -> Self {
        Self::MessageAdded {
            kind: MessageKind::Error,
            text: text.into(),
        }
    }

    pub const fn loading(loading: bool) -> Self {
        Self::LoadingChanged { loading }
    }

    pub const fn inputs_enabled(enabled: bool) -> Self {
        Self::InputsEnabled { enabled }
    }

    pub fn input_text(text: impl Into<String>) -> Self {
        Self::InputTextChanged { text: text.into() }
    }

    pub const fn voice_status(status: VoiceStatus) -> Self {
        Self::VoiceStatusChanged { status }
    }

    pub const fn stop_control(visible: bool) -> Self {
        Self::StopControlChanged { visible }
    }

    /// Get the event name for logging and routing.
    pub const fn event_name(&self) -> &'static str {
        match self {
            Self::MessageAdded { .. } => "message_added",
            Self::LoadingChanged { .. } => "loading_changed",
            Self::InputsEnabled { .. } => "inputs_enabled",
            Self::InputTextChanged { .. } => "input_text_changed",
            Self::VoiceStatusChanged { .. } => "voice_status_changed",
            Self::StopControlChanged { .. } => "stop_control_changed",
            Self::SatelliteUpdated { .. } => "satellite_updated",
        }
    }
}
