//! Env set command - replace all variables from JSON.

use std::io::Read;

use tracing::info;

use crate::cli::context::{Context, Role};
use crate::cli::output;
use crate::core::key::StageKey;
use crate::core::types::Vars;
use crate::error::Result;

/// Replace a stage's variables with a JSON object read from `source`.
///
/// `source` is a file path, or `-` for stdin. Every value must be a string.
pub async fn execute(ctx: &Context, key: &StageKey, source: &str) -> Result<()> {
    ctx.authorize(key.team(), Role::Member)?;

    let contents = if source == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(source)?
    };
    let vars: Vars = serde_json::from_str(&contents)?;

    let count = ctx.stages.replace_stage_vars(key, vars).await?;
    info!(key = %key, vars = count, "replaced from {}", source);

    output::success(&format!("{} now holds {} vars", output::key(&key.to_string()), count));
    Ok(())
}
