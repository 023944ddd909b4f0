//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use std::collections::HashSet;
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Check that a string has the shape of an email address
pub fn is_valid_email(candidate: &str) -> bool {
    EMAIL_RE.is_match(candidate)
}

/// Remove duplicates while keeping the first occurrence of each value
pub fn dedup_preserving_order<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter_map(|value| {
            let value = value.as_ref();
            if seen.insert(value.to_string()) {
                Some(value.to_string())
            } else {
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("teacher@example.com"));
        assert!(is_valid_email("a.b+c@sub.school.edu"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("missing@tld"));
        assert!(!is_valid_email("two@@example.com"));
        assert!(!is_valid_email("space in@example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_dedup_preserving_order() {
        let emails = vec!["b@x.com", "a@x.com", "b@x.com", "c@x.com", "a@x.com"];
        assert_eq!(dedup_preserving_order(emails), vec!["b@x.com", "a@x.com", "c@x.com"]);
    }
}
