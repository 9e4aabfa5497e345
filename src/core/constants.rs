//! Constants used throughout portunus.
//!
//! Centralizes magic strings and configuration values.

/// Separator between the team, project and stage segments of a key.
pub const KEY_DELIMITER: &str = "::";

/// Configuration file name (.portunus.toml).
pub const CONFIG_FILE: &str = ".portunus.toml";

/// Environment variable overriding the configuration file path.
pub const CONFIG_ENV: &str = "PORTUNUS_CONFIG";

/// Default data directory for the filesystem stores.
pub const DEFAULT_DATA_DIR: &str = ".portunus";

/// Value substituted for every variable in a listing projection.
pub const LISTING_PLACEHOLDER: &str = "";

/// First line of an armored age ciphertext.
pub const AGE_CIPHERTEXT_MARKER: &str = "-----BEGIN AGE ENCRYPTED FILE-----";

/// Prefix of an age x25519 public key.
pub const AGE_KEY_PREFIX: &str = "age1";

/// First line of an armored OpenPGP message.
pub const PGP_CIPHERTEXT_MARKER: &str = "-----BEGIN PGP MESSAGE-----";

/// First line of an armored OpenPGP public key.
pub const PGP_PUBLIC_KEY_MARKER: &str = "-----BEGIN PGP PUBLIC KEY BLOCK-----";

/// Last line of an armored OpenPGP public key.
pub const PGP_PUBLIC_KEY_END: &str = "-----END PGP PUBLIC KEY BLOCK-----";

/// GnuPG executable looked up on `PATH`.
pub const GPG_PROGRAM: &str = "gpg";

/// Characters of a rejected key quoted back in error messages.
pub const KEY_SUMMARY_MAX: usize = 16;

/// Key-name fragments that mark a variable as secret-like (matched case-insensitively).
pub const SECRET_KEY_FRAGMENTS: &[&str] =
    &["pass", "pw", "secret", "token", "key", "code", "user", "id"];

/// Key-name fragments that mark a variable as holding a hostname.
pub const HOST_KEY_FRAGMENTS: &[&str] = &["host", "domain"];

/// Key-name fragment that marks a variable as holding an ARN.
pub const ARN_KEY_FRAGMENT: &str = "arn";

/// Upper bound on the characters kept at each end of a masked value.
pub const MASK_KEEP_MAX: usize = 4;

/// Upper bound on the asterisks inserted into a masked value.
pub const MASK_FILL_MAX: usize = 10;

/// Mask character.
pub const MASK_CHAR: char = '*';
