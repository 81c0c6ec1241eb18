//! Speech output and voice input for orbit.
//!
//! - [`SpeechCoordinator`] implements the core speech port: it owns at most
//!   one live playback and falls back from pre-rendered ("natural") audio to
//!   a local synthetic voice when playback fails.
//! - [`VoiceInput`] turns a [`Recognizer`](backend::Recognizer) into the
//!   idle/listening toggle that feeds transcripts to the ask session.
//!
//! Platform engines sit behind the traits in [`backend`].

#![deny(unused_crate_dependencies)]

pub mod backend;
pub mod coordinator;
pub mod error;
pub mod input;
pub mod text_utils;

// Re-export key types for convenience
pub use backend::{
    AudioClip, AudioPlayer, RecognitionEvent, Recognizer, Speaker, UnavailablePlayer, Utterance,
};
pub use coordinator::{LeaseId, PlaybackHandle, PlaybackKind, SpeechCoordinator};
pub use error::SpeechError;
pub use input::{VoiceInput, VoiceInputState};
