//! Stage create command - create an empty stage.

use tracing::info;

use crate::cli::context::{Context, Role};
use crate::cli::output;
use crate::core::audit::{self, Param};
use crate::error::Result;

/// Create an empty stage.
pub async fn execute(ctx: &Context, team: &str, project: &str, stage: &str) -> Result<()> {
    ctx.authorize(team, Role::Member)?;

    let record = ctx.stages.create_stage(team, project, stage).await?;
    info!(
        "{}",
        audit::describe(
            "stage",
            "POST",
            "",
            &[
                ("team", Param::from(team)),
                ("project", Param::from(project)),
                ("name", Param::from(stage)),
            ],
        )
    );

    output::success(&format!("created {}", output::key(&record.key.to_string())));
    Ok(())
}
