//! Stage show command - print a stage's metadata record.

use crate::cli::context::{Context, Role};
use crate::core::key::StageKey;
use crate::error::Result;

/// Show a stage's metadata.
pub async fn execute(ctx: &Context, key: &StageKey, json: bool) -> Result<()> {
    ctx.authorize(key.team(), Role::Member)?;

    let record = ctx.stages.get_stage(key).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        super::print_record(&record);
    }
    Ok(())
}
