//! Encryption for recipients.
//!
//! Protected reads encrypt a stage's whole variable map for the reading
//! principal's public key. The [`Cipher`] trait is the seam.
//!
//! ## Backends
//!
//! - **age**: x25519 recipients (`age1…`), ASCII-armored age messages.
//! - **GPG**: armored OpenPGP public keys, encrypted via the gpg CLI into
//!   `-----BEGIN PGP MESSAGE-----` armor.
//!
//! [`CipherBackend`] picks between them from the shape of each key.
//!
//! ## Adding a New Backend
//!
//! 1. Implement the `Cipher` trait
//! 2. Return `CipherError::InvalidPublicKey` for keys the backend cannot parse
//! 3. Never fall back to returning the plaintext

use crate::error::Result;

mod age;
mod backend;
mod gpg;

pub use age::{parse_recipient, Age};
pub use backend::{validate_public_key, CipherBackend, KeyKind};
pub use gpg::Gpg;

/// Public-key encryption backend.
pub trait Cipher: Send + Sync {
    /// Encrypt plaintext so only the holder of `public_key`'s private half can read it.
    ///
    /// # Arguments
    ///
    /// * `plaintext` - The string to encrypt
    /// * `public_key` - Recipient public key as registered by the principal
    ///
    /// # Returns
    ///
    /// Armored ciphertext.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::InvalidPublicKey` if the key is missing or malformed,
    /// `CipherError::EncryptionFailed` if the backend fails.
    fn encrypt_for_recipient(&self, plaintext: &str, public_key: &str) -> Result<String>;

    /// Backend name for display/config.
    fn name(&self) -> &'static str;
}
