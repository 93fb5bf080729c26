//! Inbound link validation
//!
//! Acceptance is a plain substring match on the recognized domains. This is
//! deliberately permissive: a message that merely mentions the domain in
//! unrelated text passes, and the probe then reports its own failure. A
//! separate helper extracts the first URL token so the probe receives a
//! URL rather than the whole message.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// Domains accepted by the link check
pub const SUPPORTED_DOMAINS: [&str; 2] = ["youtube.com", "youtu.be"];

/// Cached regex for matching URLs
/// Compiled once at startup and reused for all requests
#[allow(clippy::expect_used)]
static URL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://[^\s]+").expect("Failed to compile URL regex"));

/// Returns `true` when the message text contains one of the recognized
/// domain substrings.
pub fn contains_supported_link(text: &str) -> bool {
    SUPPORTED_DOMAINS.iter().any(|domain| text.contains(domain))
}

/// Extracts the first URL token from a message.
///
/// # Arguments
///
/// * `text` - Raw message text, possibly with surrounding prose
///
/// # Returns
///
/// The first `http(s)://` token that parses as a URL, or `None`.
pub fn extract_link(text: &str) -> Option<Url> {
    URL_REGEX.find(text).and_then(|m| Url::parse(m.as_str()).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_both_domains() {
        assert!(contains_supported_link("https://youtube.com/watch?v=dQw4w9WgXcQ"));
        assert!(contains_supported_link("https://youtu.be/dQw4w9WgXcQ"));
        assert!(contains_supported_link("check this out https://youtu.be/abc123"));
    }

    #[test]
    fn test_rejects_other_text() {
        assert!(!contains_supported_link("hello"));
        assert!(!contains_supported_link("https://vimeo.com/12345"));
        assert!(!contains_supported_link(""));
    }

    #[test]
    fn test_substring_match_is_permissive() {
        // The check is a substring match, not URL validation
        assert!(contains_supported_link("I read about youtube.com yesterday"));
    }

    #[test]
    fn test_extract_link_from_prose() {
        let url = extract_link("check this out https://youtu.be/abc123").unwrap();
        assert_eq!(url.as_str(), "https://youtu.be/abc123");
    }

    #[test]
    fn test_extract_link_first_wins() {
        let url = extract_link("https://youtu.be/first and https://youtu.be/second").unwrap();
        assert_eq!(url.host_str(), Some("youtu.be"));
        assert_eq!(url.path(), "/first");
    }

    #[test]
    fn test_extract_link_none_without_url() {
        assert!(extract_link("talking about youtube.com with no link").is_none());
    }
}
