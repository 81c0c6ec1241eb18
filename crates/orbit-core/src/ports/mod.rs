//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces the core expects from infrastructure. They
//! contain no implementation details and use only domain and contract types.
//!
//! # Design Rules
//!
//! - No `reqwest` types in any signature
//! - No audio device or recognizer details
//! - Cancellation is expressed with `tokio_util::sync::CancellationToken`

pub mod ask;
pub mod event_emitter;
pub mod question;
pub mod satellite;
pub mod service_status;
pub mod speech;

pub use ask::{AskError, AskPort};
pub use event_emitter::{AppEventEmitter, ChannelEmitter, NoopEmitter};
pub use question::QuestionSink;
pub use satellite::{SatelliteError, SatellitePort};
pub use service_status::{ServiceStatusError, ServiceStatusPort};
pub use speech::{NoopSpeechOutput, SpeechOutputPort, SpeechRequest};

#[cfg(test)]
pub use satellite::MockSatellitePort;
