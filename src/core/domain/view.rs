//! Read projection types.

use serde::{Deserialize, Serialize};

use super::Principal;
use crate::core::types::Vars;

/// How a caller wants to see a stage's variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewContext {
    /// CLI read: values unmodified.
    Raw,
    /// UI enumeration: names only, every value replaced by a placeholder.
    Listing,
    /// UI value display: encrypted for the principal when it has a public key.
    Protected(Principal),
}

impl ViewContext {
    /// Context for a request that either lists names (`ui`) or reads values.
    pub fn for_request(ui: bool, principal: Principal) -> Self {
        if ui {
            ViewContext::Listing
        } else {
            ViewContext::Protected(principal)
        }
    }
}

/// Variables as returned to a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProjectedVars {
    Plain(Vars),
    /// Armored ciphertext of the whole map. Opaque to the caller.
    Ciphertext(String),
}

/// Result of a read projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projection {
    pub vars: ProjectedVars,
    pub encrypted: bool,
}

impl Projection {
    pub fn plain(vars: Vars) -> Self {
        Self {
            vars: ProjectedVars::Plain(vars),
            encrypted: false,
        }
    }

    pub fn ciphertext(armored: String) -> Self {
        Self {
            vars: ProjectedVars::Ciphertext(armored),
            encrypted: true,
        }
    }

    /// Plain map, or `None` when encrypted.
    pub fn as_plain(&self) -> Option<&Vars> {
        match &self.vars {
            ProjectedVars::Plain(vars) => Some(vars),
            ProjectedVars::Ciphertext(_) => None,
        }
    }

    /// Ciphertext, or `None` when plain.
    pub fn as_ciphertext(&self) -> Option<&str> {
        match &self.vars {
            ProjectedVars::Ciphertext(text) => Some(text),
            ProjectedVars::Plain(_) => None,
        }
    }
}
