//! Command-line interface.

pub mod context;
pub mod env;
pub mod output;
pub mod project;
pub mod stage;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::constants;
use crate::core::key::StageKey;
use crate::error::Result;
use context::Context;

/// Portunus - stage-scoped environment variables for teams.
#[derive(Parser)]
#[command(
    name = "portunus",
    about = "Stage-scoped environment variables for teams",
    version
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the configuration file
    #[arg(long, global = true, value_name = "PATH", env = constants::CONFIG_ENV)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Manage stages
    Stage {
        #[command(subcommand)]
        action: StageAction,
    },

    /// Read and change a stage's variables
    Env {
        #[command(subcommand)]
        action: EnvAction,
    },

    /// Manage projects
    Project {
        #[command(subcommand)]
        action: ProjectAction,
    },
}

/// Stage subcommands.
#[derive(Subcommand)]
pub enum StageAction {
    /// Create an empty stage
    Create {
        /// Team id
        team: String,
        /// Project name
        project: String,
        /// Stage name (e.g., dev)
        stage: String,
    },

    /// Delete a stage and its variables
    Delete {
        /// Stage key (team::project::stage)
        key: StageKey,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// List the stages of a project
    List {
        /// Team id
        team: String,
        /// Project name
        project: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a stage's metadata
    Show {
        /// Stage key (team::project::stage)
        key: StageKey,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Env subcommands.
#[derive(Subcommand)]
pub enum EnvAction {
    /// Add, edit and remove variables in one batch
    Update {
        /// Stage key (team::project::stage)
        key: StageKey,
        /// Variable to add
        #[arg(long, value_name = "KEY=VALUE", value_parser = parse_assignment)]
        add: Vec<(String, String)>,
        /// Variable to edit
        #[arg(long, value_name = "KEY=VALUE", value_parser = parse_assignment)]
        edit: Vec<(String, String)>,
        /// Variable to remove
        #[arg(long, value_name = "KEY")]
        remove: Vec<String>,
    },

    /// Replace all variables from a JSON object
    Set {
        /// Stage key (team::project::stage)
        key: StageKey,
        /// JSON file, or - for stdin
        #[arg(long, value_name = "FILE")]
        from_json: String,
    },

    /// Print a stage's variables
    Get {
        /// Stage key (team::project::stage)
        key: StageKey,
        /// Names only, values replaced by a placeholder
        #[arg(long)]
        ui: bool,
        /// Encrypt for the configured principal's public key
        #[arg(long, conflicts_with = "ui")]
        protected: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a stage's variables with values masked
    Mask {
        /// Stage key (team::project::stage)
        key: StageKey,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Project subcommands.
#[derive(Subcommand)]
pub enum ProjectAction {
    /// Delete every stage of a project
    Delete {
        /// Team id
        team: String,
        /// Project name
        project: String,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

/// Parse a `KEY=VALUE` argument. The value may contain `=`.
fn parse_assignment(s: &str) -> std::result::Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
    if name.is_empty() {
        return Err(format!("empty variable name in '{}'", s));
    }
    Ok((name.to_string(), value.to_string()))
}

/// Execute a parsed command line.
///
/// Loads configuration, opens the filesystem stores and runs the command on
/// a current-thread runtime.
///
/// # Errors
///
/// Returns error if configuration is invalid or the command fails.
pub fn execute(cli: Cli) -> Result<()> {
    let ctx = Context::open(cli.config.as_deref())?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(dispatch(&ctx, cli.command))
}

async fn dispatch(ctx: &Context, command: Command) -> Result<()> {
    match command {
        Command::Stage { action } => match action {
            StageAction::Create {
                team,
                project,
                stage,
            } => stage::create(ctx, &team, &project, &stage).await,
            StageAction::Delete { key, yes } => stage::delete(ctx, &key, yes).await,
            StageAction::List {
                team,
                project,
                json,
            } => stage::list(ctx, &team, &project, json).await,
            StageAction::Show { key, json } => stage::show(ctx, &key, json).await,
        },
        Command::Env { action } => match action {
            EnvAction::Update {
                key,
                add,
                edit,
                remove,
            } => env::update(ctx, &key, add, edit, remove).await,
            EnvAction::Set { key, from_json } => env::set(ctx, &key, &from_json).await,
            EnvAction::Get {
                key,
                ui,
                protected,
                json,
            } => env::get(ctx, &key, ui, protected, json).await,
            EnvAction::Mask { key, json } => env::mask(ctx, &key, json).await,
        },
        Command::Project { action } => match action {
            ProjectAction::Delete { team, project, yes } => {
                project::delete(ctx, &team, &project, yes).await
            }
        },
    }
}
