//! Throwaway GnuPG keyrings for OpenPGP tests.
//!
//! Tests needing gpg call [`gpg_available`] first and return early when it
//! is missing.

use std::io::Write;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

/// Whether a gpg executable is on `PATH`.
pub fn gpg_available() -> bool {
    if which::which("gpg").is_ok() {
        return true;
    }
    eprintln!("Skipping GPG tests - gpg not installed");
    false
}

/// A key pair in its own home directory, without a passphrase.
pub struct Keyring {
    home: TempDir,
}

impl Keyring {
    /// Generate a fresh key pair for `uid`.
    pub fn generate(uid: &str) -> Self {
        let home = TempDir::new().expect("failed to create gpg home");
        let status = Command::new("gpg")
            .arg("--homedir")
            .arg(home.path())
            .args(["--batch", "--quiet", "--pinentry-mode", "loopback", "--passphrase", ""])
            .args(["--quick-gen-key", uid, "default", "default", "never"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .expect("failed to run gpg");
        assert!(status.success(), "gpg key generation failed");
        Self { home }
    }

    /// Armored public key block.
    pub fn public_key(&self) -> String {
        let output = self.gpg(&["--armor", "--export"], b"");
        assert!(output.status.success(), "gpg export failed");
        String::from_utf8(output.stdout).expect("armored key is ASCII")
    }

    /// Decrypt an armored message addressed to this key.
    pub fn decrypt(&self, armored: &str) -> String {
        let output = self.gpg(
            &["--pinentry-mode", "loopback", "--passphrase", "", "--decrypt"],
            armored.as_bytes(),
        );
        assert!(
            output.status.success(),
            "gpg decrypt failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).expect("plaintext is UTF-8")
    }

    fn gpg(&self, args: &[&str], input: &[u8]) -> Output {
        let mut child = Command::new("gpg")
            .arg("--homedir")
            .arg(self.home.path())
            .args(["--batch", "--quiet"])
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("failed to run gpg");
        child
            .stdin
            .take()
            .expect("stdin is piped")
            .write_all(input)
            .expect("failed to write to gpg");
        child.wait_with_output().expect("failed to wait for gpg")
    }
}

impl Drop for Keyring {
    fn drop(&mut self) {
        // Stop the agent gpg started for this home.
        let _ = Command::new("gpgconf")
            .arg("--homedir")
            .arg(self.home.path())
            .args(["--kill", "all"])
            .status();
    }
}
