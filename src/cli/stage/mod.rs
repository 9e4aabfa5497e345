//! Stage management commands.
//!
//! Create, delete, list, and show stages.

mod create;
mod delete;
mod list;
mod show;

// Re-export command functions
pub use create::execute as create;
pub use delete::execute as delete;
pub use list::execute as list;
pub use show::execute as show;

use crate::cli::output;
use crate::core::domain::StageMetadata;

/// Print a metadata record as labelled lines.
fn print_record(record: &StageMetadata) {
    output::header(&record.key.to_string());
    output::kv("team:   ", &record.team);
    output::kv("project:", &record.project);
    output::kv("stage:  ", &record.stage);
    output::kv("vars:   ", record.vars);
    output::kv("updated:", record.updated.to_rfc3339());
}
