//! Stage list command - list the stages of a project.

use crate::cli::context::{Context, Role};
use crate::cli::output;
use crate::error::Result;

/// List stages, one per line with their variable count.
pub async fn execute(ctx: &Context, team: &str, project: &str, json: bool) -> Result<()> {
    ctx.authorize(team, Role::Member)?;

    let stages = ctx.stages.list_stages(team, project).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stages)?);
        return Ok(());
    }

    if stages.is_empty() {
        output::warn(&format!("no stages in {}::{}", team, project));
        return Ok(());
    }

    output::header(&format!("{}::{}", team, project));
    for stage in &stages {
        output::list_item(&format!("{} ({} vars)", output::key(&stage.stage), stage.vars));
    }
    Ok(())
}
