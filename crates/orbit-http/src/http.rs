//! HTTP backend abstraction.
//!
//! The client talks to a trait-based backend so tests can inject canned
//! responses. The production implementation uses reqwest.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::ApiClientConfig;
use crate::error::{HttpError, HttpResult};

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Trait for HTTP backends that exchange JSON with the backend.
///
/// This is an implementation detail - external code should use the core
/// port traits.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// Fetch JSON from a URL and deserialize it.
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> HttpResult<T>;

    /// POST a JSON body and deserialize the JSON reply.
    async fn post_json<B, T>(&self, url: &Url, body: &B) -> HttpResult<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned + Send;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest.
///
/// No retries: a failed call is reported once and the user asks again.
pub struct ReqwestBackend {
    client: reqwest::Client,
}

impl ReqwestBackend {
    /// Create a new reqwest backend with the given configuration.
    pub fn new(config: &ApiClientConfig) -> HttpResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }

    /// Read a JSON reply.
    ///
    /// The backend reports its own failures as JSON (`{"status": "error",
    /// "message": ...}`), sometimes with a 5xx status. Such bodies are
    /// returned as data so the caller sees the server's message; an error
    /// status without a parsable body becomes [`HttpError::RequestFailed`].
    async fn read_json<T: DeserializeOwned + Send>(
        url: &Url,
        response: reqwest::Response,
    ) -> HttpResult<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = response.text().await?;
        match serde_json::from_str(&body) {
            Ok(data) => {
                debug!(status = status.as_u16(), %url, "Backend reported failure with a JSON body");
                Ok(data)
            }
            Err(_) => Err(HttpError::RequestFailed {
                status: status.as_u16(),
                url: url.to_string(),
            }),
        }
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> HttpResult<T> {
        let response = self.client.get(url.as_str()).send().await?;
        Self::read_json(url, response).await
    }

    async fn post_json<B, T>(&self, url: &Url, body: &B) -> HttpResult<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned + Send,
    {
        let response = self.client.post(url.as_str()).json(body).send().await?;
        Self::read_json(url, response).await
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================
