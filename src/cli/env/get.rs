//! Env get command - print a stage's variables.

use crate::cli::context::{Context, Role};
use crate::core::domain::{ProjectedVars, ViewContext};
use crate::core::key::StageKey;
use crate::error::Result;

/// Print variables in the requested view.
///
/// Without flags values are printed as stored. `--ui` prints names with
/// placeholder values; `--protected` encrypts for the configured principal.
pub async fn execute(
    ctx: &Context,
    key: &StageKey,
    ui: bool,
    protected: bool,
    json: bool,
) -> Result<()> {
    ctx.authorize(key.team(), Role::Member)?;

    let view = if ui || protected {
        ViewContext::for_request(ui, ctx.principal().clone())
    } else {
        ViewContext::Raw
    };
    let projection = ctx.stages.get_envs_for_caller(key, &view).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&projection)?);
        return Ok(());
    }

    match &projection.vars {
        ProjectedVars::Plain(vars) => super::print_vars(vars),
        ProjectedVars::Ciphertext(armored) => print!("{}", armored),
    }
    Ok(())
}
