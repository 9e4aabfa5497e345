//! Stage creation and deletion.

use tracing::{debug, info, warn};

use super::{now, Stages};
use crate::core::domain::{StageMetadata, VariableBlob};
use crate::core::key::{ProjectKey, StageKey};
use crate::error::{Error, Result, StageError, StoreError};

impl Stages {
    /// Create a stage with no variables.
    ///
    /// The empty blob is written before the metadata record, so a visible
    /// record always has a blob behind it.
    ///
    /// An existing blob is only overwritten once a second lookup confirms
    /// no record owns it; otherwise a creator racing a concurrent one would
    /// wipe the winner's variables before failing.
    ///
    /// # Errors
    ///
    /// Returns `StageError::InvalidKey` if a segment is malformed,
    /// `StageError::AlreadyExists` if the stage exists, or the store error
    /// if either write fails.
    pub async fn create_stage(
        &self,
        team: &str,
        project: &str,
        stage: &str,
    ) -> Result<StageMetadata> {
        let key = StageKey::new(team, project, stage)?;
        if self.metadata.get(&key).await?.is_some() {
            return Err(StageError::AlreadyExists(key.to_string()).into());
        }

        if self.blobs.get(&key).await?.is_some() {
            if self.metadata.get(&key).await?.is_some() {
                debug!(key = %key, "stage created concurrently");
                return Err(StageError::AlreadyExists(key.to_string()).into());
            }
            debug!(key = %key, "replacing blob left by an earlier stage");
        }

        let created = now();
        self.blobs.put(&key, &VariableBlob::empty(created)).await?;

        match self.metadata.insert(StageMetadata::new(key.clone(), created)).await {
            Ok(record) => {
                info!(key = %key, "created stage");
                Ok(record)
            }
            // Lost a creation race: the blob now belongs to the winner.
            Err(Error::Store(StoreError::Conflict(_))) => {
                Err(StageError::AlreadyExists(key.to_string()).into())
            }
            Err(e) => {
                if let Err(cleanup) = self.blobs.delete(&key).await {
                    warn!(key = %key, error = %cleanup, "failed to remove blob of uncreated stage");
                }
                Err(e)
            }
        }
    }

    /// Delete a stage's metadata record and blob.
    ///
    /// The blob delete is attempted even when the record is missing; its
    /// failure is logged and never returned.
    ///
    /// # Errors
    ///
    /// Returns `StageError::NotFound` if no metadata record exists, or the
    /// metadata store's error.
    pub async fn delete_stage(&self, key: &StageKey) -> Result<()> {
        let removed = self.metadata.delete(key).await;

        if let Err(e) = self.blobs.delete(key).await {
            warn!(key = %key, error = %e, "blob cleanup failed");
        }

        match removed {
            Ok(()) => {
                info!(key = %key, "deleted stage");
                Ok(())
            }
            Err(e) if e.is_not_found() => {
                debug!(key = %key, "no metadata record to delete");
                Err(StageError::NotFound(key.to_string()).into())
            }
            Err(e) => Err(e),
        }
    }

    /// Fetch a stage's metadata record.
    ///
    /// # Errors
    ///
    /// Returns `StageError::NotFound` if the stage does not exist.
    pub async fn get_stage(&self, key: &StageKey) -> Result<StageMetadata> {
        self.metadata
            .get(key)
            .await?
            .ok_or_else(|| StageError::NotFound(key.to_string()).into())
    }

    /// All stages of a project, sorted by stage name.
    pub async fn list_stages(&self, team: &str, project: &str) -> Result<Vec<StageMetadata>> {
        let project = ProjectKey::new(team, project)?;
        self.metadata.list_by_project(&project).await
    }

    /// Delete every stage of a project.
    ///
    /// A failure listing the stages is logged and treated as an empty
    /// project. Stages that vanish concurrently are skipped.
    ///
    /// # Returns
    ///
    /// Keys of the stages that were deleted.
    pub async fn delete_project_stages(&self, team: &str, project: &str) -> Result<Vec<StageKey>> {
        let project = ProjectKey::new(team, project)?;
        let stages = match self.metadata.list_by_project(&project).await {
            Ok(stages) => stages,
            Err(e) => {
                warn!(project = %project, error = %e, "listing stages failed, nothing deleted");
                Vec::new()
            }
        };

        let mut deleted = Vec::with_capacity(stages.len());
        for stage in stages {
            match self.delete_stage(&stage.key).await {
                Ok(()) => deleted.push(stage.key),
                Err(e) if e.is_not_found() => {}
                Err(e) => return Err(e),
            }
        }

        info!(project = %project, stages = deleted.len(), "deleted project stages");
        Ok(deleted)
    }
}
