//! Client for the space guide backend.

use orbit_core::{
    AskRequest, AskResponse, ObserverLocation, SatellitePositionResponse, ServiceStatusResponse,
};
use tracing::debug;
use url::Url;

use crate::config::ApiClientConfig;
use crate::error::HttpResult;
use crate::http::{HttpBackend, ReqwestBackend};
use crate::routes;

// ============================================================================
// Type Aliases
// ============================================================================

/// Default client using the reqwest HTTP backend.
pub type DefaultApiClient = OrbitApiClient<ReqwestBackend>;

// ============================================================================
// Client
// ============================================================================

/// Client for the backend's JSON routes.
///
/// Generic over an HTTP backend so it can be tested without a network. Use
/// [`DefaultApiClient`] in production and talk to it through the core ports.
pub struct OrbitApiClient<B: HttpBackend> {
    pub(crate) backend: B,
    pub(crate) base_url: Url,
}

impl<B: HttpBackend> std::fmt::Debug for OrbitApiClient<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrbitApiClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl DefaultApiClient {
    /// Create a new client with the given configuration.
    ///
    /// Fails if the base URL does not parse or the HTTP client cannot be
    /// built.
    pub fn new(config: &ApiClientConfig) -> HttpResult<Self> {
        let base_url = routes::parse_base_url(&config.base_url)?;
        let backend = ReqwestBackend::new(config)?;
        Ok(Self { backend, base_url })
    }
}

impl<B: HttpBackend> OrbitApiClient<B> {
    /// Create a new client with a custom backend.
    #[cfg(test)]
    pub(crate) fn with_backend(base_url: &str, backend: B) -> HttpResult<Self> {
        Ok(Self {
            backend,
            base_url: routes::parse_base_url(base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `POST /api/ask`. Not cancellable by itself; see the `AskPort` impl.
    pub(crate) async fn post_ask(&self, request: &AskRequest) -> HttpResult<AskResponse> {
        let url = routes::build_ask_url(&self.base_url)?;
        debug!(%url, history = request.history.len(), "Sending question");
        self.backend.post_json(&url, request).await
    }

    /// `GET /api/iss-position`
    pub(crate) async fn get_position(
        &self,
        observer: ObserverLocation,
    ) -> HttpResult<SatellitePositionResponse> {
        let url = routes::build_satellite_url(&self.base_url, observer)?;
        debug!(%url, "Fetching satellite position");
        self.backend.get_json(&url).await
    }

    /// `GET /test`
    pub(crate) async fn get_status(&self) -> HttpResult<ServiceStatusResponse> {
        let url = routes::build_status_url(&self.base_url)?;
        self.backend.get_json(&url).await
    }
}
