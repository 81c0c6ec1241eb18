//! Core domain types, port definitions and services for orbit.
//!
//! `orbit-core` owns the request lifecycle of the space guide: it turns
//! user questions into at-most-one-current ask operations, keeps the
//! bounded conversation history, and tells the display and speech layers
//! what to render. Everything platform-specific (HTTP, audio, terminal)
//! sits behind the traits in [`ports`].

#![deny(unused_crate_dependencies)]

pub mod contracts;
pub mod domain;
pub mod events;
pub mod ports;
pub mod services;
pub mod settings;

// Re-export commonly used types for convenience
pub use contracts::http::{
    ApisConfigured, AskOutcome, AskRequest, AskResponse, SatellitePositionResponse,
    ServiceStatusResponse,
};
pub use domain::{
    ConversationHistory, ConversationTurn, MAX_HISTORY_TURNS, ObserverLocation, PlanetFact,
    RequestClock, RequestToken, SatellitePosition,
};
pub use events::{AppEvent, MessageKind, VoiceStatus};
pub use ports::{
    AppEventEmitter, AskError, AskPort, ChannelEmitter, NoopEmitter, NoopSpeechOutput,
    QuestionSink, SatelliteError, SatellitePort, ServiceStatusError, ServiceStatusPort,
    SpeechOutputPort, SpeechRequest,
};
pub use services::{AskSession, SatelliteTracker, Submission, SubmissionKind};
pub use settings::{Settings, SettingsError, SpeechProsody, validate_settings};
