//! Cipher backend selection from the shape of a recipient key.
//!
//! - `age1…` keys encrypt with [`Age`]
//! - armored `-----BEGIN PGP PUBLIC KEY BLOCK-----` keys encrypt with [`Gpg`]

use tracing::debug;

use super::{parse_recipient, Age, Cipher, Gpg};
use crate::core::constants::{
    AGE_CIPHERTEXT_MARKER, AGE_KEY_PREFIX, KEY_SUMMARY_MAX, PGP_CIPHERTEXT_MARKER,
    PGP_PUBLIC_KEY_MARKER,
};
use crate::error::{CipherError, Result};

/// Public key formats accepted for protected reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    /// age x25519 recipient
    Age,
    /// Armored OpenPGP public key block
    OpenPgp,
}

impl KeyKind {
    /// Classify a key by its prefix.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::InvalidPublicKey` if the key is empty or of
    /// neither shape.
    pub fn detect(public_key: &str) -> Result<Self> {
        let key = public_key.trim();
        if key.is_empty() {
            return Err(CipherError::InvalidPublicKey("no public key supplied".to_string()).into());
        }
        if key.starts_with(PGP_PUBLIC_KEY_MARKER) {
            Ok(KeyKind::OpenPgp)
        } else if key.starts_with(AGE_KEY_PREFIX) {
            Ok(KeyKind::Age)
        } else {
            Err(CipherError::InvalidPublicKey(summarize_key(key)).into())
        }
    }

    /// First line of ciphertext produced for this kind of key.
    pub fn ciphertext_marker(self) -> &'static str {
        match self {
            KeyKind::Age => AGE_CIPHERTEXT_MARKER,
            KeyKind::OpenPgp => PGP_CIPHERTEXT_MARKER,
        }
    }
}

/// Check a public key without encrypting anything.
///
/// age keys are fully parsed; OpenPGP keys are checked for their armor.
pub fn validate_public_key(public_key: &str) -> Result<KeyKind> {
    let kind = KeyKind::detect(public_key)?;
    match kind {
        KeyKind::Age => parse_recipient(public_key).map(|_| kind),
        KeyKind::OpenPgp => super::gpg::parse_public_key(public_key).map(|_| kind),
    }
}

/// Short description of a rejected key for error messages.
///
/// Keys can run to kilobytes of armor, so only a prefix is quoted.
pub(crate) fn summarize_key(key: &str) -> String {
    let key = key.trim();
    let len = key.chars().count();
    let head: String = key.chars().take(KEY_SUMMARY_MAX).collect();
    if len > KEY_SUMMARY_MAX {
        format!("'{}...' ({} chars)", head.escape_debug(), len)
    } else {
        format!("'{}'", head.escape_debug())
    }
}

/// Cipher that picks age or OpenPGP per recipient key.
#[derive(Debug, Clone, Default)]
pub struct CipherBackend {
    age: Age,
    gpg: Gpg,
}

impl CipherBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific gpg backend for OpenPGP keys.
    pub fn with_gpg(gpg: Gpg) -> Self {
        Self { age: Age, gpg }
    }
}

impl Cipher for CipherBackend {
    fn name(&self) -> &'static str {
        "auto"
    }

    fn encrypt_for_recipient(&self, plaintext: &str, public_key: &str) -> Result<String> {
        let kind = KeyKind::detect(public_key)?;
        debug!(?kind, "selected cipher backend");
        match kind {
            KeyKind::Age => self.age.encrypt_for_recipient(plaintext, public_key),
            KeyKind::OpenPgp => self.gpg.encrypt_for_recipient(plaintext, public_key),
        }
    }
}
