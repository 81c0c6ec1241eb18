//! Port for satellite position lookups.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{ObserverLocation, SatellitePosition};

/// Errors from satellite lookups.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SatelliteError {
    /// The backend answered but reported a failure.
    #[error("{0}")]
    Service(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Fetches the current satellite position relative to an observer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SatellitePort: Send + Sync {
    async fn position(
        &self,
        observer: ObserverLocation,
    ) -> Result<SatellitePosition, SatelliteError>;
}
