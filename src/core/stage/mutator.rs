//! Variable mutation and count maintenance.
//!
//! The blob is always written before the metadata count. A count update that
//! fails after the blob write leaves the two out of step; the failure is
//! logged and returned, and nothing is rolled back.

use tracing::{debug, info, warn};

use super::{now, Stages};
use crate::core::domain::{UpdateBatch, VariableBlob};
use crate::core::key::StageKey;
use crate::core::store::MetadataUpdate;
use crate::core::types::Vars;
use crate::error::Result;

/// Apply a batch to a variable map.
///
/// Adds go first, then removes, then edits, so an edit of a key removed in
/// the same batch re-creates it.
pub fn apply_batch(vars: &mut Vars, batch: &UpdateBatch) {
    for (name, value) in &batch.add {
        vars.insert(name.clone(), value.clone());
    }
    for name in &batch.remove {
        vars.remove(name);
    }
    for (name, value) in &batch.edit {
        vars.insert(name.clone(), value.clone());
    }
}

impl Stages {
    /// Apply add, remove and edit changes to a stage's variables.
    ///
    /// The cached count moves by `add - remove`, whether or not the named
    /// keys were actually present. A batch with zero net delta skips the
    /// metadata write entirely.
    ///
    /// # Returns
    ///
    /// Total number of requested changes.
    ///
    /// # Errors
    ///
    /// Returns the blob store's error if the read or write fails, in which
    /// case metadata is untouched. Returns the metadata store's error if the
    /// count update fails after the blob was written.
    pub async fn update_stage_vars(&self, key: &StageKey, batch: &UpdateBatch) -> Result<usize> {
        let mut blob = self.load_blob(key).await?;
        apply_batch(&mut blob.vars, batch);

        let updated = now();
        if !batch.is_empty() {
            blob.metadata.updated = Some(updated);
        }
        self.blobs.put(key, &blob).await?;
        debug!(key = %key, changes = %batch, "wrote blob");

        let delta = batch.net_delta();
        if delta != 0 {
            self.metadata
                .update(key, MetadataUpdate::increment(delta, updated))
                .await
                .map_err(|e| {
                    warn!(key = %key, delta, error = %e, "blob written but count update failed");
                    e
                })?;
        }

        info!(key = %key, changes = batch.change_count(), delta, "updated stage vars");
        Ok(batch.change_count())
    }

    /// Replace a stage's variables wholesale and reset its count.
    ///
    /// Secret flags on the existing blob are kept for names still present.
    ///
    /// # Returns
    ///
    /// Number of variables now held.
    pub async fn replace_stage_vars(&self, key: &StageKey, vars: Vars) -> Result<usize> {
        let previous = self.load_blob(key).await?;
        let secrets: Vec<_> = previous
            .metadata
            .secrets
            .into_iter()
            .filter(|name| vars.contains_key(name))
            .collect();

        let updated = now();
        let mut blob = VariableBlob::from_vars(vars).with_secrets(secrets);
        blob.metadata.updated = Some(updated);
        self.blobs.put(key, &blob).await?;

        let count = blob.len();
        self.metadata
            .update(key, MetadataUpdate::set_vars(count as i64, updated))
            .await
            .map_err(|e| {
                warn!(key = %key, error = %e, "blob replaced but count reset failed");
                e
            })?;

        info!(key = %key, vars = count, "replaced stage vars");
        Ok(count)
    }
}
