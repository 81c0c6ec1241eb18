//! Speech engine backend traits (engine-agnostic interfaces).
//!
//! The [`SpeechCoordinator`](crate::SpeechCoordinator) and
//! [`VoiceInput`](crate::VoiceInput) operate on trait objects so engines can
//! be swapped without touching the coordination logic.
//!
//! ## Backend implementations
//!
//! | Feature  | Module                 | Speaker | Player | Recognizer |
//! |----------|------------------------|---------|--------|------------|
//! |          | [`command_speaker`]    |    ✓    |        |            |
//! |          | [`text_speaker`]       |    ✓    |        |            |
//! |          | [`command_recognizer`] |         |        |     ✓      |
//! | `rodio`  | `rodio_player`         |         |   ✓    |            |

pub mod command_recognizer;
pub mod command_speaker;
#[cfg(feature = "rodio")]
pub mod rodio_player;
pub mod text_speaker;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use orbit_core::SpeechProsody;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::error::SpeechError;

// ── Shared types ───────────────────────────────────────────────────

/// One synthetic utterance.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub prosody: SpeechProsody,
}

/// Encoded pre-rendered audio (MP3 from the backend).
#[derive(Clone, PartialEq, Eq)]
pub struct AudioClip {
    bytes: Vec<u8>,
}

impl AudioClip {
    /// Decode a base64 payload. Empty payloads are rejected.
    pub fn from_base64(data: &str) -> Result<Self, SpeechError> {
        let bytes = STANDARD
            .decode(data.trim())
            .map_err(|e| SpeechError::InvalidAudio(e.to_string()))?;
        if bytes.is_empty() {
            return Err(SpeechError::InvalidAudio("empty payload".to_string()));
        }
        Ok(Self { bytes })
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl std::fmt::Debug for AudioClip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioClip")
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Event from a recognition session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionEvent {
    /// Partial transcript; may still change.
    Interim(String),
    /// Final transcript for the session.
    Final(String),
    /// Recognition failed (`no-speech`, `not-allowed`, device errors, ...).
    Error(String),
    /// The recognizer stopped without (further) results.
    End,
}

// ── Capability traits ──────────────────────────────────────────────

/// Local synthetic voice.
///
/// Engines are single-utterance: a new `speak` is only issued after
/// [`cancel`](Speaker::cancel).
#[async_trait]
pub trait Speaker: Send + Sync {
    /// Speak and resolve when the utterance ends.
    ///
    /// Returns [`SpeechError::Cancelled`] without producing sound if `cancel`
    /// is already cancelled, and as soon as it fires or
    /// [`Speaker::cancel`] is called while speaking.
    async fn speak(
        &self,
        utterance: Utterance,
        cancel: CancellationToken,
    ) -> Result<(), SpeechError>;

    /// Interrupt the current utterance, if any. Idempotent.
    fn cancel(&self);
}

/// Player for pre-rendered audio.
#[async_trait]
pub trait AudioPlayer: Send + Sync {
    /// Play the clip and resolve when it ends, fails or is stopped.
    ///
    /// Nothing is played if `cancel` is already cancelled.
    async fn play(&self, clip: AudioClip, cancel: CancellationToken) -> Result<(), SpeechError>;

    /// Stop whatever is playing. Idempotent.
    fn stop(&self);
}

/// Speech-to-text engine.
pub trait Recognizer: Send + Sync {
    /// Start a recognition session. Events arrive on the returned channel;
    /// the channel closes when the session is over.
    fn start(&self) -> Result<mpsc::UnboundedReceiver<RecognitionEvent>, SpeechError>;

    /// Stop the current session. Idempotent.
    fn stop(&self);
}

/// Player used when no audio output is compiled in.
///
/// Every clip is rejected, which routes speech to the synthetic voice.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailablePlayer;

#[async_trait]
impl AudioPlayer for UnavailablePlayer {
    async fn play(&self, _clip: AudioClip, _cancel: CancellationToken) -> Result<(), SpeechError> {
        Err(SpeechError::Unavailable("Audio playback"))
    }

    fn stop(&self) {}
}
