//! Port for the backend health/status route.

use async_trait::async_trait;
use thiserror::Error;

use crate::contracts::http::ServiceStatusResponse;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceStatusError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Reports whether the backend is up and which upstream APIs it can use.
#[async_trait]
pub trait ServiceStatusPort: Send + Sync {
    async fn status(&self) -> Result<ServiceStatusResponse, ServiceStatusError>;
}
