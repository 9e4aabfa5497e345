//! The stage-variable engine.
//!
//! [`Stages`] owns handles to both stores and the cipher and provides every
//! stage operation. Callers are expected to have authorized the principal
//! already; nothing here checks team membership.

mod lifecycle;
mod mutator;
mod projection;

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::core::cipher::{Cipher, CipherBackend};
use crate::core::domain::VariableBlob;
use crate::core::key::StageKey;
use crate::core::store::{BlobStore, MetadataStore};
use crate::error::Result;

pub use mutator::apply_batch;

/// Stage operations over injected stores.
#[derive(Clone)]
pub struct Stages {
    metadata: Arc<dyn MetadataStore>,
    blobs: Arc<dyn BlobStore>,
    cipher: Arc<dyn Cipher>,
}

impl std::fmt::Debug for Stages {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stages")
            .field("cipher", &self.cipher.name())
            .finish_non_exhaustive()
    }
}

impl Stages {
    /// Build the engine from its collaborators.
    pub fn new(
        metadata: Arc<dyn MetadataStore>,
        blobs: Arc<dyn BlobStore>,
        cipher: Arc<dyn Cipher>,
    ) -> Self {
        Self {
            metadata,
            blobs,
            cipher,
        }
    }

    /// Build the engine with the default cipher, which encrypts for age
    /// and OpenPGP keys alike.
    pub fn with_default_cipher(
        metadata: Arc<dyn MetadataStore>,
        blobs: Arc<dyn BlobStore>,
    ) -> Self {
        Self::new(metadata, blobs, Arc::new(CipherBackend::new()))
    }

    /// Current blob of a stage, empty if none has been written.
    async fn load_blob(&self, key: &StageKey) -> Result<VariableBlob> {
        Ok(self.blobs.get(key).await?.unwrap_or_default())
    }
}

fn now() -> DateTime<Utc> {
    Utc::now()
}
