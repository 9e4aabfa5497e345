//! Stage metadata record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::key::{ProjectKey, StageKey};

/// Denormalized description of a stage.
///
/// `vars` caches the number of entries in the stage's variable blob. It is a
/// display hint maintained by increments and may drift from the blob when a
/// mutation only partially lands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageMetadata {
    pub key: StageKey,
    pub team: String,
    /// Owning project as `team::project`.
    pub project: ProjectKey,
    pub stage: String,
    pub vars: i64,
    pub updated: DateTime<Utc>,
}

impl StageMetadata {
    /// Fresh record for a newly created stage, with no variables.
    pub fn new(key: StageKey, updated: DateTime<Utc>) -> Self {
        Self {
            team: key.team().to_string(),
            project: key.project_key().clone(),
            stage: key.stage().to_string(),
            key,
            vars: 0,
            updated,
        }
    }
}
