//! One-shot question.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Ask a single question, wait for the answer to be shown and spoken.
///
/// The answer (or error) is printed by the terminal emitter; a question that
/// produced no answer exits non-zero.
pub async fn execute(ctx: &CliContext, question: &str) -> Result<()> {
    if question.trim().is_empty() {
        return Err(CliError::Arguments("the question is empty".to_string()).into());
    }

    ctx.session.submit_question(question).finished().await;

    // The context is fresh, so an answer is the only way history grows.
    if ctx.session.history().is_empty() {
        return Err(CliError::Service("the space guide could not answer".to_string()).into());
    }
    Ok(())
}
