//! Update batch.
//!
//! One mutation request against a stage's variables.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::types::{VarName, VarValue, Vars};

/// Add, edit and remove requests for a single stage.
///
/// Buckets may name the same variable; application order is fixed by the
/// mutator (add, then remove, then edit), not by this struct.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateBatch {
    #[serde(default)]
    pub add: Vars,
    #[serde(default)]
    pub edit: Vars,
    #[serde(default)]
    pub remove: Vec<VarName>,
}

impl UpdateBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, name: impl Into<VarName>, value: impl Into<VarValue>) -> Self {
        self.add.insert(name.into(), value.into());
        self
    }

    pub fn edit(mut self, name: impl Into<VarName>, value: impl Into<VarValue>) -> Self {
        self.edit.insert(name.into(), value.into());
        self
    }

    pub fn remove(mut self, name: impl Into<VarName>) -> Self {
        self.remove.push(name.into());
        self
    }

    /// Whether all three buckets are empty.
    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.edit.is_empty() && self.remove.is_empty()
    }

    /// Number of names across all buckets.
    pub fn change_count(&self) -> usize {
        self.add.len() + self.edit.len() + self.remove.len()
    }

    /// Count change reported to the metadata record: `|add| - |remove|`.
    pub fn net_delta(&self) -> i64 {
        self.add.len() as i64 - self.remove.len() as i64
    }
}

/// Renders `add[a,b], edit[c], remove[d]`, names only.
impl fmt::Display for UpdateBatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "add[{}], edit[{}], remove[{}]",
            join(self.add.keys()),
            join(self.edit.keys()),
            join(self.remove.iter()),
        )
    }
}

fn join<'a>(names: impl Iterator<Item = &'a VarName>) -> String {
    names.map(String::as_str).collect::<Vec<_>>().join(",")
}
