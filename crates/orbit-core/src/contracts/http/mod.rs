//! JSON bodies exchanged with the space guide backend.
//!
//! Field names match the backend exactly (snake case); do not rename them
//! without changing the server.

mod ask;
mod satellite;
mod status;

pub use ask::{AskOutcome, AskRequest, AskResponse};
pub use satellite::SatellitePositionResponse;
pub use status::{ApisConfigured, ServiceStatusResponse};

/// Value of the `status` field on successful responses.
pub const STATUS_SUCCESS: &str = "success";
