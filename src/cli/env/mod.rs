//! Variable commands.
//!
//! Batch updates, wholesale replacement, projected reads and masked reads.

mod get;
mod mask;
mod set;
mod update;

// Re-export command functions
pub use get::execute as get;
pub use mask::execute as mask;
pub use set::execute as set;
pub use update::execute as update;

use crate::core::types::Vars;

/// Print variables as `KEY=VALUE` lines for scripting.
fn print_vars(vars: &Vars) {
    for (name, value) in vars {
        println!("{}={}", name, value);
    }
}
