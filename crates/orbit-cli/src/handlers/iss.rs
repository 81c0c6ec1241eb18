//! ISS position.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Fetch and show the current ISS position.
///
/// The panel (or the failure) is printed through the terminal emitter.
pub async fn execute(ctx: &CliContext) -> Result<()> {
    ctx.tracker
        .refresh()
        .await
        .map_err(|err| CliError::Service(err.to_string()))?;
    Ok(())
}
