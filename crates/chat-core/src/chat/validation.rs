//! Input validation for chats and messages
//!
//! Rules:
//! - Titles and texts are trimmed of surrounding whitespace before any check
//! - Whitespace-only input is rejected
//! - NUL characters are rejected (SQLite's `length()` stops at the first one)
//! - Length limits count characters, not bytes

use crate::chat::model::MAX_PAGE_LIMIT;
use crate::{Error, Result};

/// Maximum chat title length in characters
pub const MAX_TITLE_CHARS: usize = 200;
/// Maximum message text length in characters
pub const MAX_TEXT_CHARS: usize = 5000;

fn trimmed_within(
    raw: &str,
    field: &str,
    label: &str,
    max_chars: usize,
) -> Result<String> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(Error::invalid_body(
            field,
            format!("{label} cannot be empty or only whitespace"),
        ));
    }

    if trimmed.contains('\0') {
        return Err(Error::invalid_body(
            field,
            format!("{label} cannot contain NUL characters"),
        ));
    }

    if trimmed.chars().count() > max_chars {
        return Err(Error::invalid_body(
            field,
            format!("{label} cannot exceed {max_chars} characters"),
        ));
    }

    Ok(trimmed.to_string())
}

/// Trim and validate a chat title
pub fn validate_title(raw: &str) -> Result<String> {
    trimmed_within(raw, "title", "Title", MAX_TITLE_CHARS)
}

/// Trim and validate a message text
pub fn validate_text(raw: &str) -> Result<String> {
    trimmed_within(raw, "text", "Text", MAX_TEXT_CHARS)
}

/// Validate a message page window
pub fn validate_pagination(limit: i64, offset: i64) -> Result<()> {
    if !(1..=MAX_PAGE_LIMIT).contains(&limit) {
        return Err(Error::invalid_query(
            "limit",
            format!("limit must be between 1 and {MAX_PAGE_LIMIT}"),
        ));
    }

    if offset < 0 {
        return Err(Error::invalid_query(
            "offset",
            "offset must be greater than or equal to 0",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message_of(result: Result<String>) -> String {
        match result {
            Err(Error::Validation { message, .. }) => message,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_title() {
        assert_eq!(validate_title("Valid Title").unwrap(), "Valid Title");
        assert_eq!(validate_title("a").unwrap(), "a");
    }

    #[test]
    fn test_title_trimming() {
        assert_eq!(validate_title("  Trimmed  ").unwrap(), "Trimmed");
    }

    #[test]
    fn test_empty_title() {
        assert!(validate_title("").is_err());
        let message = message_of(validate_title("   "));
        assert!(message.to_lowercase().contains("empty"));
    }

    #[test]
    fn test_title_only_mixed_whitespace() {
        assert!(validate_title("\t\n  \r\n").is_err());
    }

    #[test]
    fn test_title_max_length() {
        assert_eq!(validate_title(&"a".repeat(200)).unwrap().len(), 200);
        let message = message_of(validate_title(&"a".repeat(201)));
        assert!(message.contains("200"));
    }

    #[test]
    fn test_title_boundary_after_trim() {
        let padded = format!("  {}  ", "a".repeat(200));
        assert_eq!(validate_title(&padded).unwrap(), "a".repeat(200));
    }

    #[test]
    fn test_title_counts_characters_not_bytes() {
        // 200 two-byte characters is 400 bytes but still within the limit
        let title = "é".repeat(200);
        assert_eq!(validate_title(&title).unwrap().chars().count(), 200);
        assert!(validate_title(&"é".repeat(201)).is_err());
    }

    #[test]
    fn test_title_with_special_characters_and_unicode() {
        assert_eq!(
            validate_title("Chat #1: Test! @2024").unwrap(),
            "Chat #1: Test! @2024"
        );
        assert_eq!(validate_title("Чат 💬 日本語").unwrap(), "Чат 💬 日本語");
    }

    #[test]
    fn test_text_rules() {
        assert_eq!(validate_text("  Trimmed Text  ").unwrap(), "Trimmed Text");
        assert!(validate_text("\t\n  \r\n").is_err());
        assert_eq!(validate_text(&"a".repeat(5000)).unwrap().len(), 5000);
        assert!(validate_text(&"a".repeat(5001)).is_err());

        let padded = format!("  {}  ", "a".repeat(5000));
        assert_eq!(validate_text(&padded).unwrap(), "a".repeat(5000));
    }

    #[test]
    fn test_nul_character_rejected() {
        let message = message_of(validate_title("\0hello"));
        assert!(message.contains("NUL"));

        match validate_text("before\0after") {
            Err(Error::Validation { field, .. }) => assert_eq!(field, "text"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_text_keeps_inner_newlines() {
        assert_eq!(
            validate_text("line one\nline two\n").unwrap(),
            "line one\nline two"
        );
    }

    #[test]
    fn test_text_error_names_field() {
        match validate_text("") {
            Err(Error::Validation { field, .. }) => assert_eq!(field, "text"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_pagination_bounds() {
        assert!(validate_pagination(1, 0).is_ok());
        assert!(validate_pagination(100, 1_000).is_ok());
        assert!(validate_pagination(0, 0).is_err());
        assert!(validate_pagination(101, 0).is_err());
        assert!(validate_pagination(20, -1).is_err());
    }
}
