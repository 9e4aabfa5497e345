//! Test fixtures and constants.

/// A valid age public key for protected reads.
pub const BOB_PUBLIC_KEY: &str = "age1ql3z7hjy54pw3hyww5ayyfg7zqgvc7w3j2elw8zmrj2kg5sfn9aqmcac8p";

/// An invalid public key for negative tests.
pub const INVALID_PUBLIC_KEY: &str = "not-a-valid-age-key";

/// First line of a protected read for an age key.
pub const AGE_MARKER: &str = "-----BEGIN AGE ENCRYPTED FILE-----";

/// First line of a protected read for an OpenPGP key.
pub const PGP_MARKER: &str = "-----BEGIN PGP MESSAGE-----";

/// Stage key used by most tests.
pub const DEV: &str = "acme::api::dev";

/// Config for a member of `acme` who is not an admin.
pub const MEMBER_CONFIG: &str = r#"
[portunus]
version = "0.1.0"

[principal]
teams = ["acme"]
"#;

/// Config for an admin of `acme` with a public key.
pub fn admin_config_with_key(key: &str) -> String {
    format!(
        r#"
[portunus]
version = "0.1.0"

[principal]
teams = ["acme"]
admins = ["acme"]
public_key = "{}"
"#,
        key
    )
}

/// Config for an admin of `acme` with a multi-line (armored) public key.
pub fn admin_config_with_armored_key(key: &str) -> String {
    format!(
        r#"
[portunus]
version = "0.1.0"

[principal]
teams = ["acme"]
admins = ["acme"]
public_key = '''
{}'''
"#,
        key
    )
}

/// Variables for wholesale replacement tests.
pub const SAMPLE_VARS_JSON: &str = r#"{
  "DATABASE_URL": "postgres://localhost/mydb",
  "API_KEY": "sk-test-1234567890",
  "PORT": "8080"
}"#;
