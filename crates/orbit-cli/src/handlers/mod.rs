//! Command handlers.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<()>`
//! - Thin wrappers that:
//!   1. Parse/validate CLI-specific input
//!   2. Call the core services
//!   3. Format output for the terminal
//!
//! Handlers should NOT contain lifecycle logic; cancellation, history and
//! speech are the session's business.

pub mod ask;
pub mod chat;
pub mod iss;
pub mod planet;
pub mod status;
