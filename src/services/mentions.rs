//! Mention extraction from notification text
//!
//! A mention is an `@` immediately followed by a full email address, e.g.
//! `@studentagnes@gmail.com`. Extraction is pure; resolving mentions to
//! students happens in the teacher service.

use once_cell::sync::Lazy;
use regex::Regex;
use crate::utils::helpers::dedup_preserving_order;

static MENTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@([^\s@]+@[^\s@]+\.[^\s@]+)").expect("valid mention regex"));

/// Emails mentioned in `text`, in order of first appearance, without duplicates
///
/// Matches are leftmost and non-overlapping, so `@a@b.com@c@d.com` yields
/// `a@b.com` then `c@d.com`.
pub fn extract_mentions(text: &str) -> Vec<String> {
    dedup_preserving_order(
        MENTION_RE
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_extracts_mentions_in_order() {
        let text = "Hello students! @studentagnes@gmail.com @studentmiche@gmail.com";
        assert_eq!(extract_mentions(text), vec!["studentagnes@gmail.com", "studentmiche@gmail.com"]);
    }

    #[test]
    fn test_no_mentions() {
        assert!(extract_mentions("Hey everybody").is_empty());
        assert!(extract_mentions("").is_empty());
        assert!(extract_mentions("mail me at teacher@example.com").is_empty());
        assert!(extract_mentions("@nobody and @someone@nodot").is_empty());
    }

    #[test]
    fn test_duplicate_mentions_collapse() {
        let text = "@a@x.com please see @b@x.com and @a@x.com";
        assert_eq!(extract_mentions(text), vec!["a@x.com", "b@x.com"]);
    }

    #[test]
    fn test_adjacent_mentions_are_leftmost_non_overlapping() {
        assert_eq!(extract_mentions("@a@b.com@c@d.com"), vec!["a@b.com", "c@d.com"]);
    }

    #[test]
    fn test_mention_may_start_mid_word() {
        assert_eq!(extract_mentions("cc:@new@x.com."), vec!["new@x.com."]);
    }

    proptest! {
        #[test]
        fn prop_every_mention_is_email_shaped(text in "[a-z@. ]{0,40}") {
            for mention in extract_mentions(&text) {
                prop_assert_eq!(mention.matches('@').count(), 1);
                prop_assert!(!mention.contains(' '));
                let (_, domain) = mention.split_once('@').unwrap();
                prop_assert!(domain.contains('.'));
            }
        }

        #[test]
        fn prop_formatted_mentions_are_found(locals in proptest::collection::vec("[a-z]{1,8}", 1..5)) {
            let emails: Vec<String> = locals.iter().map(|l| format!("{}@school.edu", l)).collect();
            let text = emails.iter().map(|e| format!("@{}", e)).collect::<Vec<_>>().join(" ");
            prop_assert_eq!(extract_mentions(&text), dedup_preserving_order(&emails));
        }
    }
}
