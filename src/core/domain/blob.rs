//! Variable blob.
//!
//! The full variable map of one stage, stored as a single value.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::types::{VarName, Vars};

/// Sidecar metadata stored next to a blob.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobMetadata {
    /// Names explicitly flagged as secret, regardless of their key shape.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub secrets: BTreeSet<VarName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
}

/// A stage's variables plus sidecar metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableBlob {
    #[serde(default)]
    pub vars: Vars,
    #[serde(default)]
    pub metadata: BlobMetadata,
}

impl VariableBlob {
    /// Empty blob, as written at stage creation.
    pub fn empty(updated: DateTime<Utc>) -> Self {
        Self {
            vars: Vars::new(),
            metadata: BlobMetadata {
                secrets: BTreeSet::new(),
                updated: Some(updated),
            },
        }
    }

    pub fn from_vars(vars: Vars) -> Self {
        Self {
            vars,
            metadata: BlobMetadata::default(),
        }
    }

    /// Flag names as secret in the sidecar.
    pub fn with_secrets<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<VarName>,
    {
        self.metadata.secrets.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Whether a name is explicitly flagged secret.
    pub fn is_flagged_secret(&self, name: &str) -> bool {
        self.metadata.secrets.contains(name)
    }
}
