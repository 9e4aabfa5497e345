//! Age encryption backend implementation.
//!
//! Provides encryption using the age format with x25519 keys and ASCII
//! armor encoding.

use std::io::{Read, Write};

use ::age::x25519;
use tracing::trace;

use super::backend::summarize_key;
use super::Cipher;
use crate::error::{CipherError, Result};

/// Age-based cryptographic backend using x25519 keys
#[derive(Debug, Clone, Copy, Default)]
pub struct Age;

impl Age {
    /// Decrypt an armored message with a private identity.
    ///
    /// The engine never decrypts; this is the recipient side, used by
    /// clients holding the private key.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::DecryptionFailed` if the message is malformed or
    /// not addressed to `identity`.
    pub fn decrypt(&self, encrypted: &str, identity: &x25519::Identity) -> Result<String> {
        trace!(ciphertext_len = encrypted.len(), "decrypting");

        let reader = ::age::armor::ArmoredReader::new(encrypted.as_bytes());
        let decryptor = ::age::Decryptor::new(reader)
            .map_err(|e| CipherError::DecryptionFailed(format!("{}", e)))?;

        let mut decrypted = Vec::new();
        let mut reader = decryptor
            .decrypt(std::iter::once(identity as &dyn ::age::Identity))
            .map_err(|e| CipherError::DecryptionFailed(format!("{}", e)))?;
        reader.read_to_end(&mut decrypted)?;

        String::from_utf8(decrypted)
            .map_err(|e| CipherError::DecryptionFailed(format!("UTF-8 error: {}", e)).into())
    }
}

impl Cipher for Age {
    fn name(&self) -> &'static str {
        "age"
    }

    fn encrypt_for_recipient(&self, plaintext: &str, public_key: &str) -> Result<String> {
        let recipient = parse_recipient(public_key)?;
        trace!(plaintext_len = plaintext.len(), "encrypting");

        let encryptor =
            ::age::Encryptor::with_recipients(std::iter::once(&recipient as &dyn ::age::Recipient))
                .map_err(|e| CipherError::EncryptionFailed(format!("{}", e)))?;

        let mut encrypted = Vec::new();
        let armor = ::age::armor::ArmoredWriter::wrap_output(
            &mut encrypted,
            ::age::armor::Format::AsciiArmor,
        )
        .map_err(|e| CipherError::ArmorFailed(format!("{}", e)))?;
        let mut writer = encryptor
            .wrap_output(armor)
            .map_err(|e| CipherError::EncryptionFailed(format!("{}", e)))?;

        writer
            .write_all(plaintext.as_bytes())
            .map_err(|e| CipherError::EncryptionFailed(format!("{}", e)))?;
        let armored = writer
            .finish()
            .map_err(|e| CipherError::EncryptionFailed(format!("{}", e)))?;
        armored
            .finish()
            .map_err(|e| CipherError::ArmorFailed(format!("{}", e)))?;

        trace!(ciphertext_len = encrypted.len(), "encrypted");

        String::from_utf8(encrypted)
            .map_err(|e| CipherError::EncryptionFailed(format!("UTF-8 error: {}", e)).into())
    }
}

/// Parse a public key string into an age recipient
///
/// # Errors
///
/// Returns `CipherError::InvalidPublicKey` if the key is empty or its format is invalid.
pub fn parse_recipient(key: &str) -> Result<x25519::Recipient> {
    let key = key.trim();
    if key.is_empty() {
        return Err(CipherError::InvalidPublicKey("no public key supplied".to_string()).into());
    }
    key.parse::<x25519::Recipient>()
        .map_err(|_| CipherError::InvalidPublicKey(summarize_key(key)).into())
}
