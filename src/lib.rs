//! Portunus - stage-scoped environment variables for teams.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── stage         # Stage create/delete/list/show
//! │   ├── env           # Variable update/set/get/mask
//! │   └── project       # Project cascade delete
//! └── core/             # Core library components
//!     ├── config        # .portunus.toml management
//!     ├── key           # team::project::stage keys
//!     ├── domain/       # Records, blobs, batches, principals, views
//!     ├── store/        # Metadata and blob stores
//!     │   ├── mod       # Store traits
//!     │   ├── memory    # In-memory adapters
//!     │   └── fs        # Filesystem adapters
//!     ├── cipher/       # Encryption backends
//!     │   ├── mod       # Cipher trait
//!     │   ├── backend   # Backend selection by key shape
//!     │   ├── age       # age encryption implementation
//!     │   └── gpg       # OpenPGP via the gpg CLI
//!     ├── stage/        # Lifecycle, mutation and read projection
//!     ├── mask          # Value masking for display
//!     └── audit         # Operation summaries
//! ```
//!
//! # Features
//!
//! - Variable count kept in step with the variable map via atomic increments
//! - Protected reads encrypted for the reader's age or OpenPGP public key
//! - Listing reads that expose names only
//! - Pluggable metadata and blob stores
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use portunus::core::domain::{UpdateBatch, ViewContext};
//! use portunus::core::stage::Stages;
//! use portunus::core::store::{MemoryBlobStore, MemoryMetadataStore};
//!
//! # async fn run() -> portunus::error::Result<()> {
//! let stages = Stages::with_default_cipher(
//!     Arc::new(MemoryMetadataStore::new()),
//!     Arc::new(MemoryBlobStore::new()),
//! );
//! let stage = stages.create_stage("acme", "api", "dev").await?;
//! stages
//!     .update_stage_vars(&stage.key, &UpdateBatch::new().add("PORT", "8080"))
//!     .await?;
//! let projection = stages.get_envs_for_caller(&stage.key, &ViewContext::Raw).await?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod core;
pub mod error;
