//! OpenPGP backend driving the GnuPG CLI.
//!
//! Each encryption runs gpg against a throwaway home directory and reads
//! the recipient's armored key from a file inside it, so the caller's own
//! keyring is never consulted or modified.
//!
//! ## Requirements
//!
//! - `gpg` 2.1.14 or newer on `PATH` (for `--recipient-file`)

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tracing::trace;

use super::backend::summarize_key;
use super::Cipher;
use crate::core::constants::{
    GPG_PROGRAM, PGP_CIPHERTEXT_MARKER, PGP_PUBLIC_KEY_END, PGP_PUBLIC_KEY_MARKER,
};
use crate::error::{CipherError, Result};

/// File name of the recipient key inside the throwaway home.
const RECIPIENT_FILE: &str = "recipient.asc";

/// GPG cipher backend using the gpg CLI.
#[derive(Debug, Clone)]
pub struct Gpg {
    program: PathBuf,
}

impl Default for Gpg {
    fn default() -> Self {
        Self::new()
    }
}

impl Gpg {
    pub fn new() -> Self {
        Self::with_program(GPG_PROGRAM)
    }

    /// Use a specific gpg executable, by name on `PATH` or by path.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn locate(&self) -> Result<PathBuf> {
        which::which(&self.program).map_err(|_| {
            CipherError::EncryptionFailed(
                "gpg CLI not found. Install GnuPG from https://gnupg.org/download/".to_string(),
            )
            .into()
        })
    }
}

impl Cipher for Gpg {
    fn name(&self) -> &'static str {
        "gpg"
    }

    fn encrypt_for_recipient(&self, plaintext: &str, public_key: &str) -> Result<String> {
        let key = parse_public_key(public_key)?;
        let program = self.locate()?;
        trace!(plaintext_len = plaintext.len(), "encrypting with gpg");

        let home = tempfile::Builder::new()
            .prefix("portunus-gpg-")
            .tempdir()
            .map_err(|e| {
                CipherError::EncryptionFailed(format!("failed to create gpg home: {}", e))
            })?;
        let key_file = home.path().join(RECIPIENT_FILE);
        std::fs::write(&key_file, format!("{}\n", key))
            .map_err(|e| CipherError::EncryptionFailed(format!("failed to stage key: {}", e)))?;

        let output = run(&program, home.path(), &key_file, plaintext.as_bytes())
            .map_err(|e| CipherError::EncryptionFailed(format!("failed to run gpg: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(match rejection(&stderr) {
                Some(reason) => {
                    CipherError::InvalidPublicKey(format!("gpg rejected key: {}", reason))
                }
                None => CipherError::EncryptionFailed(format!(
                    "gpg encrypt failed: {}",
                    last_line(&stderr)
                )),
            }
            .into());
        }

        let ciphertext = String::from_utf8(output.stdout)
            .map_err(|e| CipherError::EncryptionFailed(format!("UTF-8 error: {}", e)))?;
        if !ciphertext.starts_with(PGP_CIPHERTEXT_MARKER) {
            return Err(
                CipherError::ArmorFailed("gpg output is not an armored message".to_string()).into(),
            );
        }

        trace!(ciphertext_len = ciphertext.len(), "encrypted with gpg");
        Ok(ciphertext)
    }
}

/// Check that a key looks like an armored OpenPGP public key block.
///
/// Only the armor is checked; gpg parses the packets at encryption time.
///
/// # Errors
///
/// Returns `CipherError::InvalidPublicKey` if the armor header or footer is missing.
pub fn parse_public_key(key: &str) -> Result<&str> {
    let key = key.trim();
    if !key.starts_with(PGP_PUBLIC_KEY_MARKER) || !key.ends_with(PGP_PUBLIC_KEY_END) {
        return Err(CipherError::InvalidPublicKey(summarize_key(key)).into());
    }
    Ok(key)
}

fn run(program: &Path, home: &Path, key_file: &Path, input: &[u8]) -> std::io::Result<Output> {
    let mut child = Command::new(program)
        .arg("--homedir")
        .arg(home)
        .args(["--batch", "--no-tty", "--quiet", "--no-keyring"])
        .args(["--trust-model", "always", "--armor"])
        .arg("--recipient-file")
        .arg(key_file)
        .arg("--encrypt")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    // stdin is fed from its own thread so a full stdout pipe cannot stall us.
    let stdin = child.stdin.take();
    std::thread::scope(|scope| {
        scope.spawn(move || {
            if let Some(mut stdin) = stdin {
                // An early gpg exit is reported through its status.
                let _ = stdin.write_all(input);
            }
        });
        child.wait_with_output()
    })
}

/// Reason gpg gave for skipping the recipient key, if it did.
fn rejection(stderr: &str) -> Option<&str> {
    stderr
        .lines()
        .find_map(|line| line.split_once("skipped: ").map(|(_, reason)| reason.trim()))
}

fn last_line(stderr: &str) -> &str {
    stderr
        .lines()
        .rev()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("no output")
}
