//! Request tokens: the staleness guard for overlapping ask operations.
//!
//! Every ask operation is tagged with a [`RequestToken`] minted by a shared
//! [`RequestClock`]. Any asynchronous completion (network response, audio
//! job) compares its own token against the clock before producing a visible
//! or audible effect, which makes the result independent of the order in
//! which completions arrive.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Opaque, strictly increasing identifier of one logical ask operation.
///
/// Token values start at 1; a token, once superseded, never becomes current
/// again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestToken(u64);

impl RequestToken {
    /// Raw numeric value (for logging and wire formats).
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Shared source of [`RequestToken`]s.
///
/// Cloning the clock shares the underlying counter, so the request lifecycle
/// (which advances it) and the speech coordinator (which only reads it) agree
/// on which token is current.
#[derive(Debug, Clone, Default)]
pub struct RequestClock {
    latest: Arc<AtomicU64>,
}

impl RequestClock {
    /// Create a clock with no token issued yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next token and make it current.
    ///
    /// All previously issued tokens become stale.
    pub fn advance(&self) -> RequestToken {
        let token = RequestToken(self.latest.fetch_add(1, Ordering::SeqCst) + 1);
        tracing::trace!(%token, "Request clock advanced");
        token
    }

    /// The current (latest) token, if any has been issued.
    #[must_use]
    pub fn current(&self) -> Option<RequestToken> {
        match self.latest.load(Ordering::SeqCst) {
            0 => None,
            value => Some(RequestToken(value)),
        }
    }

    /// Whether `token` is still the latest issued token.
    #[must_use]
    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest.load(Ordering::SeqCst) == token.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clock_has_no_current_token() {
        let clock = RequestClock::new();
        assert!(clock.current().is_none());
    }

    #[test]
    fn tokens_are_strictly_increasing() {
        let clock = RequestClock::new();
        let first = clock.advance();
        let second = clock.advance();
        let third = clock.advance();

        assert!(first < second && second < third);
        assert_eq!(first.value(), 1);
        assert_eq!(clock.current(), Some(third));
    }

    #[test]
    fn superseded_token_never_becomes_current_again() {
        let clock = RequestClock::new();
        let old = clock.advance();
        assert!(clock.is_current(old));

        let newer = clock.advance();
        assert!(!clock.is_current(old));
        assert!(clock.is_current(newer));

        clock.advance();
        assert!(!clock.is_current(old));
        assert!(!clock.is_current(newer));
    }

    #[test]
    fn clone_shares_counter() {
        let clock = RequestClock::new();
        let reader = clock.clone();

        let token = clock.advance();
        assert!(reader.is_current(token));

        let next = reader.advance();
        assert!(!clock.is_current(token));
        assert_eq!(clock.current(), Some(next));
    }

    #[test]
    fn display_includes_value() {
        let clock = RequestClock::new();
        clock.advance();
        let token = clock.advance();
        assert_eq!(token.to_string(), "#2");
    }
}
