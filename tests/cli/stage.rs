//! Tests for `portunus stage create/delete/list/show` commands.

use crate::support::*;

#[test]
fn test_stage_create_starts_empty() {
    let t = Test::new();

    let output = t.stage_create("acme", "api", "dev");
    assert_success(&output);
    assert_stdout_contains(&output, "created acme::api::dev");

    let record = t.stage_show_json(DEV);
    assert_eq!(record["vars"], 0);
    assert_eq!(record["team"], "acme");
    assert_eq!(record["stage"], "dev");
}

#[test]
fn test_stage_create_twice_fails() {
    let t = Test::with_stages(&[("acme", "api", "dev")]);

    let output = t.stage_create("acme", "api", "dev");
    assert_failure(&output);
    assert_stderr_contains(&output, "stage already exists: acme::api::dev");
}

#[test]
fn test_stage_create_rejects_delimiter() {
    let t = Test::new();

    let output = t.stage_create("ac::me", "api", "dev");
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid key");
}

#[test]
fn test_stage_list_is_sorted() {
    let t = Test::with_stages(&[
        ("acme", "api", "prod"),
        ("acme", "api", "dev"),
        ("acme", "api", "staging"),
        ("acme", "web", "dev"),
    ]);

    let output = t.stage_list("acme", "api");
    assert_success(&output);
    let out = stdout(&output);
    let dev = out.find("dev").expect("dev listed");
    let prod = out.find("prod").expect("prod listed");
    let staging = out.find("staging").expect("staging listed");
    assert!(dev < prod && prod < staging, "unsorted: {}", out);
}

#[test]
fn test_stage_list_json() {
    let t = Test::with_stages(&[("acme", "api", "dev"), ("acme", "api", "prod")]);

    let output = t.run(&["stage", "list", "acme", "api", "--json"]);
    assert_success(&output);
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(parsed.as_array().map(Vec::len), Some(2));
}

#[test]
fn test_stage_list_empty_project() {
    let t = Test::new();

    let output = t.stage_list("acme", "api");
    assert_success(&output);
    assert_stdout_contains(&output, "no stages in acme::api");
}

#[test]
fn test_stage_show_human_output() {
    let t = Test::with_stages(&[("acme", "api", "dev")]);

    let output = t.run(&["stage", "show", DEV]);
    assert_success(&output);
    assert_stdout_contains(&output, "acme::api::dev");
    assert_stdout_contains(&output, "vars:");
}

#[test]
fn test_stage_delete_then_show_fails() {
    let t = Test::with_stages(&[("acme", "api", "dev")]);

    assert_success(&t.stage_delete(DEV));

    let output = t.run(&["stage", "show", DEV]);
    assert_failure(&output);
    assert_stderr_contains(&output, "stage not found");
}

#[test]
fn test_stage_delete_twice_fails() {
    let t = Test::with_stages(&[("acme", "api", "dev")]);

    assert_success(&t.stage_delete(DEV));
    let output = t.stage_delete(DEV);
    assert_failure(&output);
    assert_stderr_contains(&output, "stage not found: acme::api::dev");
}

#[test]
fn test_stage_data_lives_in_configured_dir() {
    let t = Test::with_config(
        r#"
[portunus]
version = "0.1.0"

[store]
dir = "state"
"#,
    );
    assert_success(&t.stage_create("acme", "api", "dev"));

    assert!(t.dir.path().join("state/metadata").is_dir());
    assert!(t.dir.path().join("state/blobs").is_dir());
    assert!(!t.dir.path().join(".portunus").exists());
}
