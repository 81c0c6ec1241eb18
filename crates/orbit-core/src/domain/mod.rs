//! Domain types for the space guide.
//!
//! These types carry no infrastructure concerns: no HTTP, no audio, no
//! terminal. Adapters convert to and from them at their boundaries.

mod conversation;
pub mod planets;
mod request;
mod satellite;

pub use conversation::{ConversationHistory, ConversationTurn, MAX_HISTORY_TURNS};
pub use planets::PlanetFact;
pub use request::{RequestClock, RequestToken};
pub use satellite::{
    DEFAULT_OBSERVER_LATITUDE, DEFAULT_OBSERVER_LONGITUDE, ObserverLocation, SatellitePosition,
    region_label,
};
