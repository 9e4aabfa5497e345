//! Principal.
//!
//! The authenticated caller, as supplied by the auth layer.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::core::types::{PublicKey, TeamId};

/// Caller identity with team and admin memberships.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    #[serde(default)]
    pub teams: BTreeSet<TeamId>,
    #[serde(default)]
    pub admins: BTreeSet<TeamId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<PublicKey>,
}

impl Principal {
    pub fn new<I, S>(teams: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<TeamId>,
    {
        Self {
            teams: teams.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_admins<I, S>(mut self, admins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<TeamId>,
    {
        self.admins = admins.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_public_key(mut self, key: impl Into<PublicKey>) -> Self {
        self.public_key = Some(key.into());
        self
    }

    /// Registered public key, if any. Blank keys count as unregistered.
    pub fn public_key(&self) -> Option<&str> {
        self.public_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    pub fn can_access(&self, team: &str) -> bool {
        self.teams.contains(team) || self.admins.contains(team)
    }

    pub fn is_admin(&self, team: &str) -> bool {
        self.admins.contains(team)
    }
}
