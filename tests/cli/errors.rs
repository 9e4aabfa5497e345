//! Tests for error reporting, configuration and access checks.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_non_member_is_denied() {
    let t = Test::with_config(
        r#"
[portunus]
version = "0.1.0"

[principal]
teams = ["other"]
"#,
    );

    let output = t.stage_create("acme", "api", "dev");
    assert_failure(&output);
    assert_stderr_contains(&output, "access denied: member of team 'acme' required");
}

#[test]
fn test_member_cannot_delete() {
    let t = Test::with_config(MEMBER_CONFIG);
    assert_success(&t.stage_create("acme", "api", "dev"));

    let output = t.stage_delete(DEV);
    assert_failure(&output);
    assert_stderr_contains(&output, "admin of team 'acme' required");

    // Stage untouched
    assert_vars(&t, DEV, 0);
}

#[test]
fn test_admin_can_delete() {
    let t = Test::with_config(&admin_config_with_key(BOB_PUBLIC_KEY));
    assert_success(&t.stage_create("acme", "api", "dev"));
    assert_success(&t.stage_delete(DEV));
}

#[test]
fn test_missing_explicit_config_fails() {
    let t = Test::new();

    let output = t.run(&["--config", "absent.toml", "stage", "list", "acme", "api"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "config file not found");
}

#[test]
fn test_config_from_env_var() {
    let t = Test::new();
    let path = t.write("elsewhere.toml", MEMBER_CONFIG);

    let output = t
        .cmd()
        .env("PORTUNUS_CONFIG", &path)
        .args(["stage", "create", "other", "api", "dev"])
        .output()
        .expect("failed to run portunus");
    assert_failure(&output);
    assert_stderr_contains(&output, "access denied");
}

#[test]
fn test_invalid_public_key_in_config_fails() {
    let t = Test::with_config(&admin_config_with_key(INVALID_PUBLIC_KEY));

    let output = t.stage_list("acme", "api");
    assert_failure(&output);
    assert_stderr_contains(&output, "principal.public_key");
}

#[test]
fn test_malformed_key_argument() {
    let t = Test::new();

    let output = t.run(&["stage", "show", "acme::api"]);
    assert_failure(&output);
}

#[test]
fn test_error_has_hint() {
    let t = Test::new();

    t.cmd()
        .args(["stage", "show", "acme::api::ghost"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("✗ stage not found: acme::api::ghost"))
        .stdout(predicate::str::contains("→ run: portunus stage list"));
}

#[test]
fn test_help_lists_commands() {
    let t = Test::new();

    t.cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("stage").and(predicate::str::contains("project")));
}
