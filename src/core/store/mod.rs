//! Store adapters.
//!
//! A stage lives in two independently durable stores: a metadata record
//! holding the cached variable count, and a blob holding the variable map.
//! Both are injected into [`crate::core::stage::Stages`] as trait objects.
//!
//! ## Adding a New Backend
//!
//! 1. Implement [`MetadataStore`] and/or [`BlobStore`]
//! 2. Implement `MetadataUpdate` application atomically: an increment must
//!    never be a read by the caller followed by a write of the whole record
//! 3. Map transient failures to `StoreError::Unavailable`
//!
//! ## Example
//!
//! ```ignore
//! struct Remote { /* ... */ }
//!
//! #[async_trait]
//! impl BlobStore for Remote {
//!     async fn get(&self, key: &StageKey) -> Result<Option<VariableBlob>> { /* ... */ }
//!     async fn put(&self, key: &StageKey, blob: &VariableBlob) -> Result<()> { /* ... */ }
//!     async fn delete(&self, key: &StageKey) -> Result<()> { /* ... */ }
//! }
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::core::domain::{StageMetadata, VariableBlob};
use crate::core::key::{ProjectKey, StageKey};
use crate::error::Result;

mod fs;
mod memory;

pub use fs::{FsBlobStore, FsMetadataStore};
pub use memory::{MemoryBlobStore, MemoryMetadataStore};

/// Change to a record's `vars` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarsChange {
    /// Atomically add a delta to the stored value.
    Increment(i64),
    /// Overwrite the stored value.
    Set(i64),
}

/// Partial update of a metadata record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataUpdate {
    pub vars: Option<VarsChange>,
    pub updated: Option<DateTime<Utc>>,
}

impl MetadataUpdate {
    pub fn increment(delta: i64, updated: DateTime<Utc>) -> Self {
        Self {
            vars: Some(VarsChange::Increment(delta)),
            updated: Some(updated),
        }
    }

    pub fn set_vars(vars: i64, updated: DateTime<Utc>) -> Self {
        Self {
            vars: Some(VarsChange::Set(vars)),
            updated: Some(updated),
        }
    }

    /// Apply to a record. Adapters call this while holding their write lock.
    pub fn apply(&self, record: &mut StageMetadata) {
        match self.vars {
            Some(VarsChange::Increment(delta)) => record.vars += delta,
            Some(VarsChange::Set(vars)) => record.vars = vars,
            None => {}
        }
        if let Some(updated) = self.updated {
            record.updated = updated;
        }
    }
}

/// Durable store of stage metadata records.
#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Fetch a record, `None` if absent.
    async fn get(&self, key: &StageKey) -> Result<Option<StageMetadata>>;

    /// Create a record.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` if a record already exists under the key.
    async fn insert(&self, record: StageMetadata) -> Result<StageMetadata>;

    /// Apply a partial update.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no record exists under the key.
    async fn update(&self, key: &StageKey, update: MetadataUpdate) -> Result<()>;

    /// Delete a record.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no record exists under the key.
    async fn delete(&self, key: &StageKey) -> Result<()>;

    /// All records belonging to a project, sorted by stage name.
    async fn list_by_project(&self, project: &ProjectKey) -> Result<Vec<StageMetadata>>;
}

/// Durable key-value store of variable blobs.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Fetch a blob, `None` if absent.
    async fn get(&self, key: &StageKey) -> Result<Option<VariableBlob>>;

    /// Write a blob, replacing any previous value.
    async fn put(&self, key: &StageKey, blob: &VariableBlob) -> Result<()>;

    /// Delete a blob. Deleting an absent blob is not an error.
    async fn delete(&self, key: &StageKey) -> Result<()>;
}
