//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a portunus command isolated to the test directory.
    ///
    /// Clears config and log overrides from the parent environment and
    /// disables color so output can be matched literally.
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("portunus").expect("failed to find portunus binary");
        cmd.env_remove("PORTUNUS_CONFIG");
        cmd.env_remove("PORTUNUS_LOG");
        cmd.env("NO_COLOR", "1");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Run portunus with arbitrary arguments.
    pub fn run(&self, args: &[&str]) -> Output {
        self.cmd()
            .args(args)
            .output()
            .expect("failed to run portunus")
    }

    /// Shortcut for `portunus stage create`.
    pub fn stage_create(&self, team: &str, project: &str, stage: &str) -> Output {
        self.run(&["stage", "create", team, project, stage])
    }

    /// Shortcut for `portunus stage delete --yes`.
    pub fn stage_delete(&self, key: &str) -> Output {
        self.run(&["stage", "delete", key, "--yes"])
    }

    /// Shortcut for `portunus stage list`.
    pub fn stage_list(&self, team: &str, project: &str) -> Output {
        self.run(&["stage", "list", team, project])
    }

    /// Shortcut for `portunus stage show --json`, parsed.
    pub fn stage_show_json(&self, key: &str) -> serde_json::Value {
        let output = self.run(&["stage", "show", key, "--json"]);
        super::assert_success(&output);
        serde_json::from_slice(&output.stdout).expect("valid JSON")
    }

    /// Shortcut for `portunus env update`, each change as `("--add", "K=V")` etc.
    pub fn env_update(&self, key: &str, changes: &[(&str, &str)]) -> Output {
        let mut args = vec!["env", "update", key];
        for (flag, value) in changes {
            args.push(*flag);
            args.push(*value);
        }
        self.run(&args)
    }

    /// Shortcut for `portunus env get` with extra flags.
    pub fn env_get(&self, key: &str, flags: &[&str]) -> Output {
        let mut args = vec!["env", "get", key];
        args.extend_from_slice(flags);
        self.run(&args)
    }
}
