//! Email validation and normalization utilities

use once_cell::sync::Lazy;
use regex::Regex;

/// Pragmatic email pattern: local part, `@`, domain with at least one dot.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$")
        .unwrap()
});

/// Check whether a string looks like a valid email address.
pub fn is_valid_email(email: &str) -> bool {
    email.len() <= 254 && EMAIL_PATTERN.is_match(email)
}

/// Normalize an email for storage and lookup: trimmed and lowercased.
///
/// Lookups are exact matches on the normalized form, so both registration
/// and login must pass addresses through here.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last+tag@sub.example.org"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("user@nodot"));
        assert!(!is_valid_email("user@.com"));
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  User@Example.COM "), "user@example.com");
    }
}
