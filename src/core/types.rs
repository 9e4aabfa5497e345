//! Type aliases for domain concepts.
//!
//! Provides semantic type aliases to make function signatures more descriptive.

use std::collections::BTreeMap;

/// A team identifier (first key segment).
pub type TeamId = String;

/// A variable name (e.g., DATABASE_URL).
pub type VarName = String;

/// A plaintext variable value.
pub type VarValue = String;

/// A stage's full variable map.
pub type Vars = BTreeMap<VarName, VarValue>;

/// An armored public key a principal registered for encrypted reads.
pub type PublicKey = String;
