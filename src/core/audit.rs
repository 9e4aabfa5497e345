//! Human-readable operation summaries.
//!
//! Renders an API operation as `"{path} - {action} - {query} - {params}"`
//! for audit trails and logs. Only the rendering lives here; nothing is
//! stored.

use std::fmt;

use url::Url;

use crate::core::domain::UpdateBatch;

/// Returned for any path and method pair without a known action.
pub const UNKNOWN_OPERATION: &str = "Unknown operation";

/// Action text for a path and HTTP method, if the pair is known.
pub fn action(api_path: &str, method: &str) -> Option<&'static str> {
    let method = method.to_ascii_uppercase();
    let text = match (api_path, method.as_str()) {
        ("all", "GET") => "Fetch for user",
        ("team", "GET") => "Fetch for user",
        ("team", "POST") => "Create",
        ("team", "DELETE") => "Delete",
        ("team", "PUT") => "Update name",
        ("project", "GET") => "Fetch for team",
        ("project", "POST") => "Create",
        ("project", "DELETE") => "Delete",
        ("project", "PUT") => "Update name",
        ("stage", "GET") => "Fetch for project",
        ("stage", "POST") => "Create",
        ("stage", "DELETE") => "Delete",
        ("stage", "PUT") => "Update",
        ("env", "GET") => "Fetch for stage",
        ("env", "PUT") => "Update for stage",
        _ => return None,
    };
    Some(text)
}

/// A request parameter as rendered in a summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    Text(String),
    /// Rendered by name only, values never appear.
    Updates(UpdateBatch),
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Param::Text(text) => f.write_str(text),
            Param::Updates(batch) => write!(f, "{}", batch),
        }
    }
}

impl From<&str> for Param {
    fn from(text: &str) -> Self {
        Param::Text(text.to_string())
    }
}

impl From<UpdateBatch> for Param {
    fn from(batch: UpdateBatch) -> Self {
        Param::Updates(batch)
    }
}

/// The `?…` part of a request URL, empty if it has none or does not parse.
pub fn query_string(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|url| url.query().map(|q| format!("?{}", q)))
        .unwrap_or_default()
}

/// Summarize an operation.
///
/// The batch parameter renders as `add[..], edit[..], remove[..]`; other
/// parameters as `name: value`, joined by `, `.
pub fn describe(api_path: &str, method: &str, query: &str, params: &[(&str, Param)]) -> String {
    let Some(text) = action(api_path, method) else {
        return UNKNOWN_OPERATION.to_string();
    };

    let params = params
        .iter()
        .map(|(name, value)| match value {
            Param::Updates(_) => value.to_string(),
            Param::Text(_) => format!("{}: {}", name, value),
        })
        .collect::<Vec<_>>()
        .join(", ");

    format!("{} - {} - {} - {}", api_path, text, query, params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_operations() {
        assert_eq!(action("env", "PUT"), Some("Update for stage"));
        assert_eq!(action("stage", "get"), Some("Fetch for project"));
        assert_eq!(action("team", "PUT"), Some("Update name"));
    }

    #[test]
    fn test_unknown_operation() {
        assert_eq!(describe("env", "DELETE", "", &[]), UNKNOWN_OPERATION);
        assert_eq!(describe("user", "GET", "", &[]), UNKNOWN_OPERATION);
        assert_eq!(describe("billing", "GET", "", &[]), UNKNOWN_OPERATION);
    }

    #[test]
    fn test_describe_env_update() {
        let batch = UpdateBatch::new().add("A", "1").add("B", "2").remove("C");
        let summary = describe(
            "env",
            "PUT",
            &query_string("https://api.example.com/env?stage=acme::api::dev"),
            &[("stage", Param::from("acme::api::dev")), ("updates", batch.into())],
        );
        assert_eq!(
            summary,
            "env - Update for stage - ?stage=acme::api::dev - stage: acme::api::dev, add[A,B], edit[], remove[C]"
        );
        assert!(!summary.contains('1'));
    }

    #[test]
    fn test_query_string() {
        assert_eq!(query_string("https://x.example.com/stage?project=a::b"), "?project=a::b");
        assert_eq!(query_string("https://x.example.com/stage"), "");
        assert_eq!(query_string("not a url"), "");
    }
}
