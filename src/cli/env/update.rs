//! Env update command - apply a batch of changes.

use tracing::info;

use crate::cli::context::{Context, Role};
use crate::cli::output;
use crate::core::audit::{self, Param};
use crate::core::domain::UpdateBatch;
use crate::core::key::StageKey;
use crate::error::Result;

/// Apply adds, edits and removes to a stage.
pub async fn execute(
    ctx: &Context,
    key: &StageKey,
    add: Vec<(String, String)>,
    edit: Vec<(String, String)>,
    remove: Vec<String>,
) -> Result<()> {
    ctx.authorize(key.team(), Role::Member)?;

    let batch = UpdateBatch {
        add: add.into_iter().collect(),
        edit: edit.into_iter().collect(),
        remove,
    };
    if batch.is_empty() {
        output::warn("no changes given, rewriting stage as-is");
    }

    let changes = ctx.stages.update_stage_vars(key, &batch).await?;
    info!(
        "{}",
        audit::describe(
            "env",
            "PUT",
            "",
            &[
                ("stage", Param::from(key.to_string().as_str())),
                ("updates", Param::from(batch)),
            ],
        )
    );

    output::success(&format!(
        "{} change{} to {}",
        changes,
        if changes == 1 { "" } else { "s" },
        output::key(&key.to_string())
    ));
    Ok(())
}
