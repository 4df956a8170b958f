//! @-mention scanning for notification text.
//!
//! A mention is a literal `@` immediately followed by an email address, e.g.
//! `@studentagnes@gmail.com`. The marker is stripped from the result. This is
//! a lexical scan; it does not check that the address is deliverable.

use regex::Regex;
use std::sync::LazyLock;

static MENTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@([A-Za-z0-9_.%+-]+@[A-Za-z0-9_.-]+\.[A-Za-z]{2,})")
        .expect("valid mention regex")
});

/// Emails mentioned in `text`, in order of appearance.
///
/// Matches never overlap; repeats are kept.
pub fn extract_mentioned_emails(text: &str) -> Vec<String> {
    MENTION
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_mentions_in_order() {
        let text = "Hello students! @studentagnes@gmail.com @studentmiche@gmail.com";
        assert_eq!(
            extract_mentioned_emails(text),
            vec!["studentagnes@gmail.com", "studentmiche@gmail.com"]
        );
    }

    #[test]
    fn test_no_mentions() {
        assert!(extract_mentioned_emails("Hey everybody").is_empty());
    }

    #[test]
    fn test_plain_email_is_not_a_mention() {
        assert!(extract_mentioned_emails("write to studentbob@gmail.com").is_empty());
    }

    #[test]
    fn test_local_part_characters() {
        assert_eq!(
            extract_mentioned_emails("cc @first.last+tag%x-y_z@mail-server.example.org!"),
            vec!["first.last+tag%x-y_z@mail-server.example.org"]
        );
    }

    #[test]
    fn test_short_top_level_segment_is_rejected() {
        assert!(extract_mentioned_emails("@someone@host.c").is_empty());
    }

    #[test]
    fn test_mention_without_separator() {
        assert_eq!(
            extract_mentioned_emails("hi@c@x.com"),
            vec!["c@x.com"]
        );
    }

    #[test]
    fn test_non_ascii_word_characters_end_the_match() {
        assert!(extract_mentioned_emails("@élève@école.fr").is_empty());
    }
}
