//! Project commands.

use dialoguer::Confirm;
use tracing::info;

use crate::cli::context::{Context, Role};
use crate::cli::output;
use crate::core::audit::{self, Param};
use crate::error::Result;

/// Delete every stage of a project, asking first unless `yes` is set.
pub async fn delete(ctx: &Context, team: &str, project: &str, yes: bool) -> Result<()> {
    ctx.authorize(team, Role::Admin)?;

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete project '{}::{}' and all its stages?", team, project))
            .default(false)
            .interact()?;
        if !confirmed {
            output::warn("aborted");
            return Ok(());
        }
    }

    let deleted = ctx.stages.delete_project_stages(team, project).await?;
    info!(
        "{}",
        audit::describe(
            "project",
            "DELETE",
            "",
            &[("project", Param::from(format!("{}::{}", team, project).as_str()))],
        )
    );

    for key in &deleted {
        output::list_item(&output::key(&key.to_string()));
    }
    output::success(&format!(
        "deleted {} stage{} of {}::{}",
        deleted.len(),
        if deleted.len() == 1 { "" } else { "s" },
        team,
        project
    ));
    Ok(())
}
