//! In-memory store adapters.
//!
//! Used for tests and embedding. Every call is counted, and a store can be
//! switched unavailable to exercise partial-failure paths.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use super::{BlobStore, MetadataStore, MetadataUpdate};
use crate::core::domain::{StageMetadata, VariableBlob};
use crate::core::key::{ProjectKey, StageKey};
use crate::error::{Result, StoreError};

/// Per-operation call counters.
#[derive(Debug, Default)]
struct Calls {
    get: AtomicUsize,
    write: AtomicUsize,
    update: AtomicUsize,
    delete: AtomicUsize,
}

impl Calls {
    fn bump(counter: &AtomicUsize) {
        counter.fetch_add(1, Ordering::SeqCst);
    }
}

fn check_available(flag: &AtomicBool, store: &'static str) -> Result<()> {
    if flag.load(Ordering::SeqCst) {
        return Err(StoreError::unavailable(store, "store switched unavailable").into());
    }
    Ok(())
}

/// Metadata records held in a map.
#[derive(Debug, Default)]
pub struct MemoryMetadataStore {
    records: Mutex<BTreeMap<StageKey, StageMetadata>>,
    calls: Calls,
    unavailable: AtomicBool,
}

impl MemoryMetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with `StoreError::Unavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of `update` calls received, including failed ones.
    pub fn update_calls(&self) -> usize {
        self.calls.update.load(Ordering::SeqCst)
    }

    /// Number of `insert` calls received.
    pub fn insert_calls(&self) -> usize {
        self.calls.write.load(Ordering::SeqCst)
    }

    /// Number of `delete` calls received.
    pub fn delete_calls(&self) -> usize {
        self.calls.delete.load(Ordering::SeqCst)
    }

    /// Number of records currently held.
    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }
}

#[async_trait]
impl MetadataStore for MemoryMetadataStore {
    async fn get(&self, key: &StageKey) -> Result<Option<StageMetadata>> {
        Calls::bump(&self.calls.get);
        check_available(&self.unavailable, "metadata")?;
        Ok(self.records.lock().await.get(key).cloned())
    }

    async fn insert(&self, record: StageMetadata) -> Result<StageMetadata> {
        Calls::bump(&self.calls.write);
        check_available(&self.unavailable, "metadata")?;

        let mut records = self.records.lock().await;
        if records.contains_key(&record.key) {
            return Err(StoreError::Conflict(record.key.to_string()).into());
        }
        debug!(key = %record.key, "inserting metadata record");
        records.insert(record.key.clone(), record.clone());
        Ok(record)
    }

    async fn update(&self, key: &StageKey, update: MetadataUpdate) -> Result<()> {
        Calls::bump(&self.calls.update);
        check_available(&self.unavailable, "metadata")?;

        let mut records = self.records.lock().await;
        let record = records
            .get_mut(key)
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;
        update.apply(record);
        debug!(key = %key, vars = record.vars, "updated metadata record");
        Ok(())
    }

    async fn delete(&self, key: &StageKey) -> Result<()> {
        Calls::bump(&self.calls.delete);
        check_available(&self.unavailable, "metadata")?;

        self.records
            .lock()
            .await
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(key.to_string()).into())
    }

    async fn list_by_project(&self, project: &ProjectKey) -> Result<Vec<StageMetadata>> {
        Calls::bump(&self.calls.get);
        check_available(&self.unavailable, "metadata")?;

        // Map is ordered by key, so records of one project come out sorted by stage.
        Ok(self
            .records
            .lock()
            .await
            .values()
            .filter(|r| &r.project == project)
            .cloned()
            .collect())
    }
}

/// Blobs held in a map.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: Mutex<BTreeMap<StageKey, VariableBlob>>,
    calls: Calls,
    unavailable: AtomicBool,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with `StoreError::Unavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of `put` calls received, including failed ones.
    pub fn put_calls(&self) -> usize {
        self.calls.write.load(Ordering::SeqCst)
    }

    /// Number of `delete` calls received.
    pub fn delete_calls(&self) -> usize {
        self.calls.delete.load(Ordering::SeqCst)
    }

    /// Seed a blob directly, bypassing call counters.
    pub async fn seed(&self, key: StageKey, blob: VariableBlob) {
        self.blobs.lock().await.insert(key, blob);
    }

    /// Snapshot of a blob without counting a call.
    pub async fn peek(&self, key: &StageKey) -> Option<VariableBlob> {
        self.blobs.lock().await.get(key).cloned()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn get(&self, key: &StageKey) -> Result<Option<VariableBlob>> {
        Calls::bump(&self.calls.get);
        check_available(&self.unavailable, "blob")?;
        Ok(self.blobs.lock().await.get(key).cloned())
    }

    async fn put(&self, key: &StageKey, blob: &VariableBlob) -> Result<()> {
        Calls::bump(&self.calls.write);
        check_available(&self.unavailable, "blob")?;
        debug!(key = %key, vars = blob.len(), "writing blob");
        self.blobs.lock().await.insert(key.clone(), blob.clone());
        Ok(())
    }

    async fn delete(&self, key: &StageKey) -> Result<()> {
        Calls::bump(&self.calls.delete);
        check_available(&self.unavailable, "blob")?;
        self.blobs.lock().await.remove(key);
        Ok(())
    }
}
