//! Error types.
//!
//! Every fallible operation returns [`Result`]. Errors are grouped by the
//! layer that raised them and collapse to an [`ErrorKind`] for callers that
//! only need to branch on the failure category.

use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Stage(#[from] StageError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}

/// Failure category exposed to callers wrapping the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Stage, record or blob absent on an operation requiring existence.
    NotFound,
    /// Stage creation collision.
    AlreadyExists,
    /// Recipient key malformed or encryption backend failure.
    EncryptionError,
    /// Transient I/O failure from either store.
    StoreUnavailable,
    /// Caller supplied a malformed key or argument.
    Invalid,
    /// Configuration missing or malformed.
    Config,
    /// Principal lacks the team membership or admin role required.
    AccessDenied,
}

impl Error {
    /// Collapse to the failure category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Stage(StageError::NotFound(_)) => ErrorKind::NotFound,
            Error::Stage(StageError::AlreadyExists(_)) => ErrorKind::AlreadyExists,
            Error::Stage(StageError::InvalidKey { .. } | StageError::InvalidInput(_)) => {
                ErrorKind::Invalid
            }
            Error::Stage(StageError::AccessDenied { .. }) => ErrorKind::AccessDenied,
            Error::Store(StoreError::NotFound(_)) => ErrorKind::NotFound,
            Error::Store(StoreError::Conflict(_)) => ErrorKind::AlreadyExists,
            Error::Store(StoreError::Unavailable { .. } | StoreError::Corrupt { .. }) => {
                ErrorKind::StoreUnavailable
            }
            Error::Cipher(_) => ErrorKind::EncryptionError,
            Error::Config(_) => ErrorKind::Config,
            Error::Io(_) => ErrorKind::StoreUnavailable,
            Error::Json(_) | Error::Prompt(_) => ErrorKind::Invalid,
        }
    }

    /// Whether this error means the target does not exist.
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

/// Stage-level errors raised by the engine itself.
#[derive(Error, Debug)]
pub enum StageError {
    #[error("stage not found: {0}")]
    NotFound(String),

    #[error("stage already exists: {0}")]
    AlreadyExists(String),

    #[error("invalid key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("access denied: {role} of team '{team}' required")]
    AccessDenied { team: String, role: &'static str },
}

/// Errors surfaced by a metadata or blob store adapter.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("record not found: {0}")]
    NotFound(String),

    #[error("record already exists: {0}")]
    Conflict(String),

    #[error("{store} store unavailable: {reason}")]
    Unavailable { store: &'static str, reason: String },

    #[error("corrupt record '{key}': {reason}")]
    Corrupt { key: String, reason: String },
}

impl StoreError {
    pub(crate) fn unavailable(store: &'static str, reason: impl std::fmt::Display) -> Self {
        StoreError::Unavailable {
            store,
            reason: reason.to_string(),
        }
    }
}

/// Encryption errors.
#[derive(Error, Debug)]
pub enum CipherError {
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("armor failed: {0}")]
    ArmorFailed(String),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(String),

    #[error("failed to read config: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("missing field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
