//! Core port implementations for `OrbitApiClient`.
//!
//! Maps internal `HttpError`s to the core port errors at the boundary.

use async_trait::async_trait;
use orbit_core::{
    AskError, AskPort, AskRequest, AskResponse, ObserverLocation, SatelliteError,
    SatellitePort, SatellitePosition, ServiceStatusError, ServiceStatusPort,
    ServiceStatusResponse,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::client::OrbitApiClient;
use crate::error::HttpError;
use crate::http::HttpBackend;

// ============================================================================
// Error Mapping
// ============================================================================

fn to_ask_error(err: HttpError) -> AskError {
    if err.is_invalid_response() {
        AskError::InvalidResponse(err.to_string())
    } else {
        AskError::Transport(err.to_string())
    }
}

fn to_satellite_error(err: HttpError) -> SatelliteError {
    if err.is_invalid_response() {
        SatelliteError::InvalidResponse(err.to_string())
    } else {
        SatelliteError::Transport(err.to_string())
    }
}

fn to_status_error(err: HttpError) -> ServiceStatusError {
    if err.is_invalid_response() {
        ServiceStatusError::InvalidResponse(err.to_string())
    } else {
        ServiceStatusError::Transport(err.to_string())
    }
}

// ============================================================================
// Port Implementations
// ============================================================================

#[async_trait]
impl<B: HttpBackend> AskPort for OrbitApiClient<B> {
    async fn ask(
        &self,
        request: AskRequest,
        cancel: CancellationToken,
    ) -> Result<AskResponse, AskError> {
        // Dropping the request future aborts the in-flight HTTP call.
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                debug!(question = %request.question, "Ask request aborted");
                Err(AskError::Cancelled)
            }
            result = self.post_ask(&request) => result.map_err(|err| {
                warn!(error = %err, "Ask request failed");
                to_ask_error(err)
            }),
        }
    }
}

#[async_trait]
impl<B: HttpBackend> SatellitePort for OrbitApiClient<B> {
    async fn position(
        &self,
        observer: ObserverLocation,
    ) -> Result<SatellitePosition, SatelliteError> {
        let response = self
            .get_position(observer)
            .await
            .map_err(to_satellite_error)?;
        response.into_position().map_err(SatelliteError::Service)
    }
}

#[async_trait]
impl<B: HttpBackend> ServiceStatusPort for OrbitApiClient<B> {
    async fn status(&self) -> Result<ServiceStatusResponse, ServiceStatusError> {
        self.get_status().await.map_err(to_status_error)
    }
}
