//! Stage delete command - remove a stage and its variables.

use dialoguer::Confirm;
use tracing::info;

use crate::cli::context::{Context, Role};
use crate::cli::output;
use crate::core::audit::{self, Param};
use crate::core::key::StageKey;
use crate::error::Result;

/// Delete a stage, asking first unless `yes` is set.
pub async fn execute(ctx: &Context, key: &StageKey, yes: bool) -> Result<()> {
    ctx.authorize(key.team(), Role::Admin)?;

    if !yes && !confirm(key)? {
        output::warn("aborted");
        return Ok(());
    }

    ctx.stages.delete_stage(key).await?;
    info!(
        "{}",
        audit::describe("stage", "DELETE", "", &[("stage", Param::from(key.to_string().as_str()))])
    );

    output::success(&format!("deleted {}", output::key(&key.to_string())));
    Ok(())
}

/// Confirm deletion with the user
fn confirm(key: &StageKey) -> Result<bool> {
    Confirm::new()
        .with_prompt(format!("Delete stage '{}' and all its variables?", key))
        .default(false)
        .interact()
        .map_err(Into::into)
}
