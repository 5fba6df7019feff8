//! Email identity helpers
//!
//! Codes are keyed by a normalized identity so that `User@Example.com ` and
//! `user@example.com` share one record.

use once_cell::sync::Lazy;
use regex::Regex;

/// Loose address shape check: something, an `@`, something, a dot, something
static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid"));

/// Normalize an identity: trim surrounding whitespace and lower-case it
pub fn normalize_identity(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Check whether a (normalized) identity looks like an email address
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Mask an email address for logging
///
/// Keeps the first character of the local part and the full domain:
/// `user@example.com` becomes `u***@example.com`.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let first = local.chars().next().map(String::from).unwrap_or_default();
            format!("{}***@{}", first, domain)
        }
        None => "***".to_string(),
    }
}
