//! Conversation history types.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Maximum number of turns kept as context for the next question.
pub const MAX_HISTORY_TURNS: usize = 5;

/// One completed question/answer exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub question: String,
    pub response: String,
}

impl ConversationTurn {
    /// Create a new turn.
    pub fn new(question: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            response: response.into(),
        }
    }
}

/// Ordered conversation history, capped at [`MAX_HISTORY_TURNS`].
///
/// Eviction is plain FIFO truncation: pushing onto a full history drops the
/// oldest turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationHistory {
    turns: VecDeque<ConversationTurn>,
}

impl ConversationHistory {
    /// Create an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn, evicting the oldest turns beyond the cap.
    pub fn push(&mut self, turn: ConversationTurn) {
        self.turns.push_back(turn);
        while self.turns.len() > MAX_HISTORY_TURNS {
            self.turns.pop_front();
        }
    }

    /// Number of stored turns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether no turns are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Most recent turn, if any.
    #[must_use]
    pub fn last(&self) -> Option<&ConversationTurn> {
        self.turns.back()
    }

    /// Iterate turns from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &ConversationTurn> {
        self.turns.iter()
    }

    /// Owned copy of the turns, oldest first (sent as request context).
    #[must_use]
    pub fn snapshot(&self) -> Vec<ConversationTurn> {
        self.turns.iter().cloned().collect()
    }

    /// Drop all turns.
    pub fn clear(&mut self) {
        self.turns.clear();
    }
}
