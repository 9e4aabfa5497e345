//! Tests for `portunus project delete` command.

use crate::support::*;

#[test]
fn test_project_delete_cascades() {
    let t = Test::with_stages(&[
        ("acme", "api", "dev"),
        ("acme", "api", "prod"),
        ("acme", "web", "dev"),
    ]);

    let output = t.run(&["project", "delete", "acme", "api", "--yes"]);
    assert_success(&output);
    assert_stdout_contains(&output, "deleted 2 stages of acme::api");

    let output = t.stage_list("acme", "api");
    assert_stdout_contains(&output, "no stages");

    let output = t.stage_list("acme", "web");
    assert_stdout_contains(&output, "dev");
}

#[test]
fn test_project_delete_empty_project() {
    let t = Test::new();

    let output = t.run(&["project", "delete", "acme", "api", "--yes"]);
    assert_success(&output);
    assert_stdout_contains(&output, "deleted 0 stages");
}
