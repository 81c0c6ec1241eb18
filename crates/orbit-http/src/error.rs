//! Internal error types for backend calls.
//!
//! These errors are internal to `orbit-http` and are mapped to core port
//! errors at the boundary (see `port.rs`).

use thiserror::Error;

/// Result type alias for backend calls.
pub type HttpResult<T> = Result<T, HttpError>;

/// Errors related to backend HTTP calls.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The backend answered with an HTTP error status and no usable body.
    #[error("Backend request failed with status {status}: {url}")]
    RequestFailed {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
    },

    /// The backend returned an invalid or unexpected response.
    #[error("Invalid response from backend: {message}")]
    InvalidResponse {
        /// Description of what was invalid
        message: String,
    },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl HttpError {
    /// Whether the body could not be understood, as opposed to the call
    /// failing outright.
    #[must_use]
    pub const fn is_invalid_response(&self) -> bool {
        matches!(self, Self::InvalidResponse { .. } | Self::JsonParse(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_failed_error_message() {
        let error = HttpError::RequestFailed {
            status: 502,
            url: "http://127.0.0.1:5000/api/ask".to_string(),
        };
        let msg = error.to_string();
        assert!(msg.contains("502"));
        assert!(msg.contains("/api/ask"));
    }

    #[test]
    fn test_invalid_response_error_message() {
        let error = HttpError::InvalidResponse {
            message: "empty body".to_string(),
        };
        assert!(error.to_string().contains("empty body"));
        assert!(error.is_invalid_response());
    }

    #[test]
    fn test_json_parse_is_invalid_response() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let error = HttpError::from(err);
        assert!(error.to_string().starts_with("JSON parsing error"));
        assert!(error.is_invalid_response());
    }

    #[test]
    fn test_invalid_url_error() {
        let error = HttpError::from(url::Url::parse("not a url").unwrap_err());
        assert!(error.to_string().starts_with("Invalid URL"));
        assert!(!error.is_invalid_response());
    }
}
