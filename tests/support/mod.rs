//! Test support utilities for portunus integration tests.
//!
//! Provides reusable test environment setup and helper commands.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod fixtures;
pub mod gpg;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use tempfile::TempDir;

/// Test environment with an isolated working directory.
///
/// The data directory and `.portunus.toml` live inside it. Child processes
/// use `.current_dir()`, so tests can safely run in parallel.
pub struct Test {
    /// Temporary working directory
    pub dir: TempDir,
}

impl Test {
    /// Create an environment with no config file (unrestricted local mode).
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        Self { dir }
    }

    /// Create an environment with the given `.portunus.toml` contents.
    pub fn with_config(toml: &str) -> Self {
        let t = Self::new();
        t.write(".portunus.toml", toml);
        t
    }

    /// Create an environment with stages already created.
    pub fn with_stages(stages: &[(&str, &str, &str)]) -> Self {
        let t = Self::new();
        for (team, project, stage) in stages {
            let output = t.stage_create(team, project, stage);
            assert_success(&output);
        }
        t
    }

    /// Write a file relative to the working directory.
    pub fn write(&self, name: &str, contents: &str) -> std::path::PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).expect("failed to write file");
        path
    }
}
