//! Portunus - stage-scoped environment variables for teams.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use portunus::cli::output;
use portunus::cli::{execute, Cli};
use portunus::error::ErrorKind;

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env("PORTUNUS_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("portunus=debug")
        } else {
            EnvFilter::new("portunus=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).without_time().with_writer(std::io::stderr))
        .init();

    if let Err(e) = execute(cli) {
        let suggestion = match e.kind() {
            ErrorKind::NotFound => Some("run: portunus stage list <team> <project>"),
            ErrorKind::AlreadyExists => Some("run: portunus stage show <key>"),
            ErrorKind::EncryptionError => Some("check principal.public_key in .portunus.toml"),
            ErrorKind::AccessDenied => Some("check principal.teams and principal.admins in .portunus.toml"),
            ErrorKind::Config => Some("pass --config or set PORTUNUS_CONFIG"),
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
