/// Truncates an error string for display in chat.
///
/// Full error detail belongs in the server log; the user sees at most
/// `max_chars` characters, with an ellipsis when anything was cut.
///
/// # Arguments
///
/// * `msg` - The full error message
/// * `max_chars` - Maximum number of characters to keep
///
/// # Example
///
/// ```
/// use vidra::core::utils::truncate_user_error;
///
/// assert_eq!(truncate_user_error("short", 100), "short");
/// ```
pub fn truncate_user_error(msg: &str, max_chars: usize) -> String {
    if msg.chars().count() <= max_chars {
        return msg.to_string();
    }
    let mut truncated: String = msg.chars().take(max_chars.saturating_sub(1)).collect();
    truncated.push('…');
    truncated
}

/// Escapes special characters for Telegram MarkdownV2
pub fn escape_markdown(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('_', "\\_")
        .replace('*', "\\*")
        .replace('[', "\\[")
        .replace(']', "\\]")
        .replace('(', "\\(")
        .replace(')', "\\)")
        .replace('~', "\\~")
        .replace('`', "\\`")
        .replace('>', "\\>")
        .replace('#', "\\#")
        .replace('+', "\\+")
        .replace('-', "\\-")
        .replace('=', "\\=")
        .replace('|', "\\|")
        .replace('{', "\\{")
        .replace('}', "\\}")
        .replace('.', "\\.")
        .replace('!', "\\!")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_message_unchanged() {
        assert_eq!(truncate_user_error("all fine", 100), "all fine");
    }

    #[test]
    fn test_truncate_caps_at_limit() {
        let long = "x".repeat(250);
        let truncated = truncate_user_error(&long, 100);
        assert_eq!(truncated.chars().count(), 100);
        assert!(truncated.ends_with('…'));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        // Multi-byte characters must not be split mid-codepoint
        let msg = "ошибка ".repeat(40);
        let truncated = truncate_user_error(&msg, 100);
        assert_eq!(truncated.chars().count(), 100);
    }

    #[test]
    fn test_truncate_exact_limit() {
        let msg = "y".repeat(100);
        assert_eq!(truncate_user_error(&msg, 100), msg);
    }

    #[test]
    fn test_escape_markdown() {
        assert_eq!(escape_markdown("Hello World"), "Hello World");
        assert_eq!(escape_markdown("clip_1.mp4"), "clip\\_1\\.mp4");
        assert_eq!(escape_markdown("Song [2024]"), "Song \\[2024\\]");
    }
}
