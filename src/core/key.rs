//! Composite keys.
//!
//! Stages are addressed as `team::project::stage` and projects as
//! `team::project`. No segment may contain the delimiter, otherwise the
//! team could not be recovered from a stage key.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::constants::KEY_DELIMITER;
use crate::error::{Error, Result, StageError};

/// Identifier of a project within a team.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProjectKey {
    team: String,
    project: String,
}

/// Identifier of a stage, immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StageKey {
    project: ProjectKey,
    stage: String,
}

/// Validate a single key segment.
///
/// Segments must be non-empty and must not contain the delimiter.
pub fn validate_segment(name: &'static str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(StageError::InvalidKey {
            key: value.to_string(),
            reason: format!("{} cannot be empty", name),
        }
        .into());
    }

    // A leading or trailing ':' would fuse with the delimiter on parse.
    if value.contains(KEY_DELIMITER) || value.starts_with(':') || value.ends_with(':') {
        return Err(StageError::InvalidKey {
            key: value.to_string(),
            reason: format!("{} cannot contain '{}'", name, KEY_DELIMITER),
        }
        .into());
    }

    Ok(())
}

impl ProjectKey {
    /// Build a project key from its segments.
    ///
    /// # Errors
    ///
    /// Returns `StageError::InvalidKey` if a segment is empty or contains the delimiter.
    pub fn new(team: &str, project: &str) -> Result<Self> {
        validate_segment("team", team)?;
        validate_segment("project", project)?;
        Ok(Self {
            team: team.to_string(),
            project: project.to_string(),
        })
    }

    pub fn team(&self) -> &str {
        &self.team
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    /// Key of a stage inside this project.
    pub fn stage(&self, stage: &str) -> Result<StageKey> {
        validate_segment("stage", stage)?;
        Ok(StageKey {
            project: self.clone(),
            stage: stage.to_string(),
        })
    }
}

impl StageKey {
    /// Build a stage key from its segments.
    ///
    /// # Errors
    ///
    /// Returns `StageError::InvalidKey` if a segment is empty or contains the delimiter.
    pub fn new(team: &str, project: &str, stage: &str) -> Result<Self> {
        ProjectKey::new(team, project)?.stage(stage)
    }

    pub fn team(&self) -> &str {
        self.project.team()
    }

    pub fn project(&self) -> &str {
        self.project.project()
    }

    pub fn stage(&self) -> &str {
        &self.stage
    }

    /// The owning project's key.
    pub fn project_key(&self) -> &ProjectKey {
        &self.project
    }
}

impl fmt::Display for ProjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.team, KEY_DELIMITER, self.project)
    }
}

impl fmt::Display for StageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.project, KEY_DELIMITER, self.stage)
    }
}

fn invalid(key: &str, reason: &str) -> Error {
    StageError::InvalidKey {
        key: key.to_string(),
        reason: reason.to_string(),
    }
    .into()
}

impl FromStr for ProjectKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(KEY_DELIMITER).collect();
        match parts.as_slice() {
            [team, project] => Self::new(team, project),
            _ => Err(invalid(s, "expected team::project")),
        }
    }
}

impl FromStr for StageKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(KEY_DELIMITER).collect();
        match parts.as_slice() {
            [team, project, stage] => Self::new(team, project, stage),
            _ => Err(invalid(s, "expected team::project::stage")),
        }
    }
}

impl TryFrom<String> for ProjectKey {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl TryFrom<String> for StageKey {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ProjectKey> for String {
    fn from(key: ProjectKey) -> Self {
        key.to_string()
    }
}

impl From<StageKey> for String {
    fn from(key: StageKey) -> Self {
        key.to_string()
    }
}
