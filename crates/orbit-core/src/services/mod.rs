//! Core services - orchestration between ports and domain logic.
//!
//! Services here don't know about concrete adapters; they are wired up by
//! the front end's composition root.

mod ask_session;
mod satellite_tracker;

pub use ask_session::{
    AskSession, DEFAULT_ERROR_MESSAGE, EMPTY_QUESTION_PROMPT, NETWORK_ERROR_MESSAGE, Submission,
    SubmissionKind,
};
pub use satellite_tracker::SatelliteTracker;
