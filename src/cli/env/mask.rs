//! Env mask command - print variables with values masked.

use crate::cli::context::{Context, Role};
use crate::core::key::StageKey;
use crate::error::Result;

/// Print masked variables.
pub async fn execute(ctx: &Context, key: &StageKey, json: bool) -> Result<()> {
    ctx.authorize(key.team(), Role::Member)?;

    let masked = ctx.stages.masked_envs(key).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&masked)?);
    } else {
        super::print_vars(&masked);
    }
    Ok(())
}
