//! Filesystem store adapters.
//!
//! One JSON document per key under a data directory:
//!
//! ```text
//! <dir>/metadata/<encoded key>.json
//! <dir>/blobs/<encoded key>.json
//! ```
//!
//! Keys are form-urlencoded into file names. Writes go to a temporary file
//! that is renamed into place. Metadata writes are serialized by an
//! in-process lock, so increments are atomic for a single process only.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::debug;

use super::{BlobStore, MetadataStore, MetadataUpdate};
use crate::core::domain::{StageMetadata, VariableBlob};
use crate::core::key::{ProjectKey, StageKey};
use crate::error::{Result, StoreError};

const METADATA_DIR: &str = "metadata";
const BLOB_DIR: &str = "blobs";

static TMP_SEQ: AtomicU64 = AtomicU64::new(0);

fn file_name(key: &StageKey) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(key.to_string().as_bytes()).collect();
    format!("{}.json", encoded)
}

async fn read_json<T: DeserializeOwned>(
    store: &'static str,
    path: &Path,
    key: &StageKey,
) -> Result<Option<T>> {
    let contents = match tokio::fs::read(path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(StoreError::unavailable(store, e).into()),
    };

    serde_json::from_slice(&contents)
        .map(Some)
        .map_err(|e| {
            StoreError::Corrupt {
                key: key.to_string(),
                reason: e.to_string(),
            }
            .into()
        })
}

async fn write_json<T: Serialize>(
    store: &'static str,
    path: &Path,
    value: &T,
    private: bool,
) -> Result<()> {
    let contents = serde_json::to_vec_pretty(value)?;
    let tmp = path.with_extension(format!(
        "{}.{}.tmp",
        std::process::id(),
        TMP_SEQ.fetch_add(1, Ordering::Relaxed)
    ));

    tokio::fs::write(&tmp, &contents)
        .await
        .map_err(|e| StoreError::unavailable(store, e))?;

    // Restrict permissions on blob files (Unix only)
    #[cfg(unix)]
    if private {
        use std::os::unix::fs::PermissionsExt;
        tokio::fs::set_permissions(&tmp, std::fs::Permissions::from_mode(0o600))
            .await
            .map_err(|e| StoreError::unavailable(store, e))?;
    }
    #[cfg(not(unix))]
    let _ = private;

    tokio::fs::rename(&tmp, path)
        .await
        .map_err(|e| StoreError::unavailable(store, e).into())
}

async fn ensure_dir(store: &'static str, dir: &Path) -> Result<()> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| StoreError::unavailable(store, e).into())
}

/// Metadata records as JSON files.
#[derive(Debug)]
pub struct FsMetadataStore {
    dir: PathBuf,
    lock: Mutex<()>,
}

impl FsMetadataStore {
    /// Store rooted at `<data_dir>/metadata`.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            dir: data_dir.as_ref().join(METADATA_DIR),
            lock: Mutex::new(()),
        }
    }

    fn path(&self, key: &StageKey) -> PathBuf {
        self.dir.join(file_name(key))
    }
}

#[async_trait]
impl MetadataStore for FsMetadataStore {
    async fn get(&self, key: &StageKey) -> Result<Option<StageMetadata>> {
        debug!(key = %key, "reading metadata record");
        read_json("metadata", &self.path(key), key).await
    }

    async fn insert(&self, record: StageMetadata) -> Result<StageMetadata> {
        let _guard = self.lock.lock().await;
        ensure_dir("metadata", &self.dir).await?;

        let path = self.path(&record.key);
        if tokio::fs::try_exists(&path)
            .await
            .map_err(|e| StoreError::unavailable("metadata", e))?
        {
            return Err(StoreError::Conflict(record.key.to_string()).into());
        }

        debug!(key = %record.key, "inserting metadata record");
        write_json("metadata", &path, &record, false).await?;
        Ok(record)
    }

    async fn update(&self, key: &StageKey, update: MetadataUpdate) -> Result<()> {
        let _guard = self.lock.lock().await;
        let path = self.path(key);

        let mut record: StageMetadata = read_json("metadata", &path, key)
            .await?
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;
        update.apply(&mut record);

        debug!(key = %key, vars = record.vars, "updating metadata record");
        write_json("metadata", &path, &record, false).await
    }

    async fn delete(&self, key: &StageKey) -> Result<()> {
        let _guard = self.lock.lock().await;
        match tokio::fs::remove_file(self.path(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::NotFound(key.to_string()).into())
            }
            Err(e) => Err(StoreError::unavailable("metadata", e).into()),
        }
    }

    async fn list_by_project(&self, project: &ProjectKey) -> Result<Vec<StageMetadata>> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::unavailable("metadata", e).into()),
        };

        let mut records = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StoreError::unavailable("metadata", e))?
        {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }

            let contents = tokio::fs::read(&path)
                .await
                .map_err(|e| StoreError::unavailable("metadata", e))?;
            let record: StageMetadata =
                serde_json::from_slice(&contents).map_err(|e| StoreError::Corrupt {
                    key: path.display().to_string(),
                    reason: e.to_string(),
                })?;

            if &record.project == project {
                records.push(record);
            }
        }

        records.sort_by(|a, b| a.stage.cmp(&b.stage));
        Ok(records)
    }
}

/// Variable blobs as JSON files, readable by the owner only.
#[derive(Debug)]
pub struct FsBlobStore {
    dir: PathBuf,
}

impl FsBlobStore {
    /// Store rooted at `<data_dir>/blobs`.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            dir: data_dir.as_ref().join(BLOB_DIR),
        }
    }

    fn path(&self, key: &StageKey) -> PathBuf {
        self.dir.join(file_name(key))
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn get(&self, key: &StageKey) -> Result<Option<VariableBlob>> {
        debug!(key = %key, "reading blob");
        read_json("blob", &self.path(key), key).await
    }

    async fn put(&self, key: &StageKey, blob: &VariableBlob) -> Result<()> {
        ensure_dir("blob", &self.dir).await?;
        debug!(key = %key, vars = blob.len(), "writing blob");
        write_json("blob", &self.path(key), blob, true).await
    }

    async fn delete(&self, key: &StageKey) -> Result<()> {
        match tokio::fs::remove_file(self.path(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::unavailable("blob", e).into()),
        }
    }
}
