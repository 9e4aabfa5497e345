//! Per-invocation command context.

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::core::config::Config;
use crate::core::domain::Principal;
use crate::core::stage::Stages;
use crate::core::store::{FsBlobStore, FsMetadataStore};
use crate::error::{Result, StageError};

/// Role a command requires of the configured principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Member,
    Admin,
}

impl Role {
    fn as_str(self) -> &'static str {
        match self {
            Role::Member => "member",
            Role::Admin => "admin",
        }
    }
}

/// Loaded configuration plus the engine over the filesystem stores.
#[derive(Debug)]
pub struct Context {
    pub config: Config,
    pub stages: Stages,
}

impl Context {
    /// Resolve configuration and open the stores it names.
    pub fn open(config_path: Option<&Path>) -> Result<Self> {
        let config = Config::resolve(config_path)?;
        let dir = &config.store.dir;
        debug!(dir = %dir.display(), "opening filesystem stores");

        let stages = Stages::with_default_cipher(
            Arc::new(FsMetadataStore::new(dir)),
            Arc::new(FsBlobStore::new(dir)),
        );
        Ok(Self { config, stages })
    }

    pub fn principal(&self) -> &Principal {
        &self.config.principal
    }

    /// Check the principal holds `role` in `team`.
    ///
    /// A principal that lists no teams is unrestricted.
    ///
    /// # Errors
    ///
    /// Returns `StageError::AccessDenied` if the role is missing.
    pub fn authorize(&self, team: &str, role: Role) -> Result<()> {
        let principal = self.principal();
        if principal.teams.is_empty() && principal.admins.is_empty() {
            return Ok(());
        }

        let allowed = match role {
            Role::Member => principal.can_access(team),
            Role::Admin => principal.is_admin(team),
        };
        if allowed {
            Ok(())
        } else {
            Err(StageError::AccessDenied {
                team: team.to_string(),
                role: role.as_str(),
            }
            .into())
        }
    }
}
