//! Port for the question-answering backend.

use async_trait::async_trait;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::contracts::http::{AskRequest, AskResponse};

/// Transport-level failure of an ask call.
///
/// Server-reported failures are *not* errors here: they arrive as an
/// [`AskResponse`] with a non-success status.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AskError {
    /// The call was aborted because a newer operation superseded it.
    #[error("request cancelled")]
    Cancelled,

    /// The backend could not be reached or returned an HTTP error.
    #[error("transport error: {0}")]
    Transport(String),

    /// The backend answered with a body that could not be parsed.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl AskError {
    /// Whether this error is an artifact of deliberate cancellation and must
    /// be suppressed.
    #[must_use]
    pub const fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Sends a question (with history) to the backend.
#[async_trait]
pub trait AskPort: Send + Sync {
    /// Issue the request. Implementations must return
    /// [`AskError::Cancelled`] promptly once `cancel` fires.
    async fn ask(
        &self,
        request: AskRequest,
        cancel: CancellationToken,
    ) -> Result<AskResponse, AskError>;
}
