//! Tests for `portunus env update/set/get/mask` commands.

use crate::support::*;

#[test]
fn test_env_update_then_get() {
    let t = Test::with_stages(&[("acme", "api", "dev")]);

    let output = t.env_update(DEV, &[("--add", "A=1"), ("--add", "B=x=y")]);
    assert_success(&output);
    assert_stdout_contains(&output, "2 changes");

    let output = t.env_get(DEV, &[]);
    assert_success(&output);
    assert_stdout_contains(&output, "A=1\n");
    assert_stdout_contains(&output, "B=x=y\n");
    assert_vars(&t, DEV, 2);
}

#[test]
fn test_env_update_add_remove_edit() {
    let t = Test::with_stages(&[("acme", "api", "dev")]);
    assert_success(&t.env_update(DEV, &[("--add", "A=1"), ("--add", "B=2")]));

    let output = t.env_update(
        DEV,
        &[("--add", "C=3"), ("--remove", "A"), ("--edit", "B=20")],
    );
    assert_success(&output);
    assert_stdout_contains(&output, "3 changes");

    let output = t.env_get(DEV, &[]);
    assert_stdout_excludes(&output, "A=");
    assert_stdout_contains(&output, "B=20");
    assert_stdout_contains(&output, "C=3");
    assert_vars(&t, DEV, 2);
}

#[test]
fn test_env_update_missing_stage_fails() {
    let t = Test::new();

    let output = t.env_update("acme::api::ghost", &[("--add", "A=1")]);
    assert_failure(&output);
    assert_stderr_contains(&output, "not found");
}

#[test]
fn test_env_update_rejects_bad_assignment() {
    let t = Test::with_stages(&[("acme", "api", "dev")]);

    let output = t.env_update(DEV, &[("--add", "NOEQUALS")]);
    assert_failure(&output);
}

#[test]
fn test_env_get_ui_hides_values() {
    let t = Test::with_stages(&[("acme", "api", "dev")]);
    assert_success(&t.env_update(DEV, &[("--add", "TOKEN=abc123")]));

    let output = t.env_get(DEV, &["--ui"]);
    assert_success(&output);
    assert_stdout_contains(&output, "TOKEN=\n");
    assert_stdout_excludes(&output, "abc123");
}

#[test]
fn test_env_get_protected_without_key_is_plaintext() {
    let t = Test::with_config(MEMBER_CONFIG);
    assert_success(&t.stage_create("acme", "api", "dev"));
    assert_success(&t.env_update(DEV, &[("--add", "A=1")]));

    let output = t.env_get(DEV, &["--protected", "--json"]);
    assert_success(&output);
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(parsed["encrypted"], false);
    assert_eq!(parsed["vars"]["A"], "1");
}

#[test]
fn test_env_get_protected_encrypts() {
    let t = Test::with_config(&admin_config_with_key(BOB_PUBLIC_KEY));
    assert_success(&t.stage_create("acme", "api", "dev"));
    assert_success(&t.env_update(DEV, &[("--add", "SECRET=hunter2")]));

    let output = t.env_get(DEV, &["--protected"]);
    assert_success(&output);
    assert!(stdout(&output).starts_with(AGE_MARKER));
    assert_stdout_excludes(&output, "hunter2");

    let output = t.env_get(DEV, &["--protected", "--json"]);
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(parsed["encrypted"], true);
    assert!(parsed["vars"].is_string());
}

#[test]
fn test_env_get_protected_encrypts_for_openpgp_key() {
    if !gpg::gpg_available() {
        return;
    }
    let bob = gpg::Keyring::generate("Bob <bob@example.com>");
    let t = Test::with_config(&admin_config_with_armored_key(&bob.public_key()));
    assert_success(&t.stage_create("acme", "api", "dev"));
    assert_success(&t.env_update(DEV, &[("--add", "SECRET=hunter2")]));

    let output = t.env_get(DEV, &["--protected"]);
    assert_success(&output);
    let armored = stdout(&output);
    assert!(armored.starts_with(PGP_MARKER));
    assert_stdout_excludes(&output, "hunter2");

    let plaintext = bob.decrypt(&armored);
    let vars: serde_json::Value = serde_json::from_str(&plaintext).expect("valid JSON");
    assert_eq!(vars["SECRET"], "hunter2");
}

#[test]
fn test_env_get_ui_with_key_is_not_encrypted() {
    let t = Test::with_config(&admin_config_with_key(BOB_PUBLIC_KEY));
    assert_success(&t.stage_create("acme", "api", "dev"));
    assert_success(&t.env_update(DEV, &[("--add", "A=1")]));

    let output = t.env_get(DEV, &["--ui", "--json"]);
    assert_success(&output);
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(parsed["encrypted"], false);
    assert_eq!(parsed["vars"]["A"], "");
}

#[test]
fn test_env_set_from_file_resets_count() {
    let t = Test::with_stages(&[("acme", "api", "dev")]);
    let path = t.write("vars.json", SAMPLE_VARS_JSON);

    let output = t.run(&["env", "set", DEV, "--from-json", path.to_str().unwrap()]);
    assert_success(&output);
    assert_stdout_contains(&output, "now holds 3 vars");
    assert_vars(&t, DEV, 3);

    let output = t.env_get(DEV, &[]);
    assert_stdout_contains(&output, "PORT=8080");
}

#[test]
fn test_env_set_from_stdin() {
    let t = Test::with_stages(&[("acme", "api", "dev")]);

    let output = t
        .cmd()
        .args(["env", "set", DEV, "--from-json", "-"])
        .write_stdin(r#"{"ONLY":"one"}"#)
        .output()
        .expect("failed to run portunus");
    assert_success(&output);
    assert_vars(&t, DEV, 1);
}

#[test]
fn test_env_set_rejects_non_string_values() {
    let t = Test::with_stages(&[("acme", "api", "dev")]);
    let path = t.write("vars.json", r#"{"PORT": 8080}"#);

    let output = t.run(&["env", "set", DEV, "--from-json", path.to_str().unwrap()]);
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid json");
    assert_vars(&t, DEV, 0);
}

#[test]
fn test_env_mask() {
    let t = Test::with_stages(&[("acme", "api", "dev")]);
    assert_success(&t.env_update(
        DEV,
        &[
            ("--add", "DB_PASSWORD=supersecretvalue1234"),
            ("--add", "LOG_LEVEL=debug"),
        ],
    ));

    let output = t.run(&["env", "mask", DEV]);
    assert_success(&output);
    assert_stdout_contains(&output, "DB_PASSWORD=supe**********1234");
    assert_stdout_contains(&output, "LOG_LEVEL=debug");
    assert_stdout_excludes(&output, "secretvalue");
}
