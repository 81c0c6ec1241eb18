//! Entry point voice input uses to drive the ask lifecycle.

/// The two lifecycle operations voice input needs.
///
/// Implemented by [`AskSession`](crate::services::AskSession); kept as a
/// trait so voice input can be tested without a backend.
pub trait QuestionSink: Send + Sync {
    /// Tear down any in-flight operation (network call and speech).
    fn cancel_active(&self);

    /// Submit a question as if the user had typed it.
    fn submit_question(&self, text: &str);
}
