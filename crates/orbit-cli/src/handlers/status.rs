//! Backend status.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::format_status;

/// Check the backend's `/test` route.
pub async fn execute(ctx: &CliContext, json: bool) -> Result<()> {
    let status = ctx
        .status
        .status()
        .await
        .map_err(|err| CliError::Service(format!("backend unreachable: {err}")))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("URL: {}", ctx.settings.effective_api_base_url());
        println!("{}", format_status(&status));
    }

    if !status.is_success() {
        return Err(CliError::Service("backend reported a problem".to_string()).into());
    }
    Ok(())
}
