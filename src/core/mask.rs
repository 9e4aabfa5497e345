//! Value masking for audit and debug display.
//!
//! Classification is by key-name substring and is best effort: a key named
//! `identity` counts as secret-like because it contains `id`. Masking never
//! fails; values of unknown shape pass through unchanged.

use std::net::IpAddr;

use url::Url;

use crate::core::constants::{
    ARN_KEY_FRAGMENT, HOST_KEY_FRAGMENTS, MASK_CHAR, MASK_FILL_MAX, MASK_KEEP_MAX,
    SECRET_KEY_FRAGMENTS,
};
use crate::core::domain::VariableBlob;
use crate::core::types::Vars;

/// Whether a key name looks like it holds a secret.
pub fn is_secret_like(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    SECRET_KEY_FRAGMENTS.iter().any(|f| name.contains(f))
}

fn is_host_like(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    HOST_KEY_FRAGMENTS.iter().any(|f| name.contains(f))
}

fn is_arn_like(name: &str) -> bool {
    name.to_ascii_lowercase().contains(ARN_KEY_FRAGMENT)
}

/// Mask every value of a blob, honoring its sidecar secret flags.
pub fn mask_vars(blob: &VariableBlob) -> Vars {
    blob.vars
        .iter()
        .map(|(name, value)| {
            let masked = mask_value(name, value, blob.is_flagged_secret(name));
            (name.clone(), masked)
        })
        .collect()
}

/// Mask a single value according to its key name.
///
/// `flagged` marks the key as secret regardless of its name.
pub fn mask_value(name: &str, value: &str, flagged: bool) -> String {
    let secret = flagged || is_secret_like(name);

    if let Some(masked) = mask_url(value, secret) {
        return masked;
    }
    if secret {
        return mask(value);
    }
    if is_host_like(name) {
        return mask_host(value);
    }
    if is_arn_like(name) {
        return mask_arn(value);
    }
    value.to_string()
}

/// Keep up to `min(4, len / 4)` characters at each end, star the middle.
///
/// At most ten asterisks are inserted, so the masked length does not
/// reveal the length of long values.
pub fn mask(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    let len = chars.len();
    let keep = MASK_KEEP_MAX.min(len / 4);
    let fill = (len - 2 * keep).min(MASK_FILL_MAX);

    let mut masked = String::with_capacity(2 * keep + fill);
    masked.extend(&chars[..keep]);
    masked.extend(std::iter::repeat(MASK_CHAR).take(fill));
    masked.extend(&chars[len - keep..]);
    masked
}

/// Redact a value that parses as a URL with a host.
///
/// Returns `None` when the value is not such a URL. URLs carrying no
/// credentials or query, under a key that is not secret-like, come back
/// unchanged. Otherwise credentials and fragment are dropped and path
/// segments and query values are masked, leaving scheme, host and port.
fn mask_url(value: &str, secret: bool) -> Option<String> {
    let mut url = Url::parse(value).ok()?;
    if url.cannot_be_a_base() || !url.has_host() {
        return None;
    }

    let has_credentials = !url.username().is_empty() || url.password().is_some();
    if !has_credentials && url.query().is_none() && !secret {
        return Some(value.to_string());
    }

    // Only fails for URLs without a host, excluded above.
    let _ = url.set_username("");
    let _ = url.set_password(None);
    url.set_fragment(None);

    let segments: Vec<String> = url
        .path_segments()
        .map(|segments| {
            segments
                .map(|s| if s.is_empty() { String::new() } else { mask(s) })
                .collect()
        })
        .unwrap_or_default();
    url.set_path(&format!("/{}", segments.join("/")));

    if url.query().is_some() {
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), mask(&v)))
            .collect();
        url.query_pairs_mut().clear().extend_pairs(pairs);
    }

    Some(url.to_string())
}

/// Collapse subdomains, keeping the top two labels.
fn mask_host(value: &str) -> String {
    if value.parse::<IpAddr>().is_ok() {
        return mask(value);
    }

    let labels: Vec<&str> = value.split('.').collect();
    if labels.len() <= 2 {
        return value.to_string();
    }
    let top = &labels[labels.len() - 2..];
    format!("{}.{}", "*".repeat(3), top.join("."))
}

/// Star out purely numeric colon-delimited segments (account ids).
fn mask_arn(value: &str) -> String {
    value
        .split(':')
        .map(|segment| {
            if !segment.is_empty() && segment.chars().all(|c| c.is_ascii_digit()) {
                MASK_CHAR.to_string().repeat(segment.len())
            } else {
                segment.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(":")
}
