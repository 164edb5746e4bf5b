//! Error types for the chat service

use std::fmt;

use thiserror::Error;

/// Result type alias using the chat service's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Where a rejected input came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputLocation {
    Body,
    Query,
    Path,
}

impl InputLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputLocation::Body => "body",
            InputLocation::Query => "query",
            InputLocation::Path => "path",
        }
    }
}

impl fmt::Display for InputLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Chat service error types
#[derive(Error, Debug)]
pub enum Error {
    // Entity errors (E001-E099)
    #[error("Chat with id {0} not found")]
    ChatNotFound(i64),

    // Database errors (E400-E499)
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Input errors (E800-E899)
    #[error("Invalid {location} field '{field}': {message}")]
    Validation {
        location: InputLocation,
        field: String,
        message: String,
    },
}

impl Error {
    /// Create a validation error for a request body field
    pub fn invalid_body(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            location: InputLocation::Body,
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a validation error for a query parameter
    pub fn invalid_query(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            location: InputLocation::Query,
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a validation error for a path parameter
    pub fn invalid_path(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            location: InputLocation::Path,
            field: field.into(),
            message: message.into(),
        }
    }

    /// Get error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            Self::ChatNotFound(_) => "E001",
            Self::DatabaseError(_) => "E400",
            Self::Validation { .. } => "E800",
        }
    }

    /// Get suggestion for how to fix this error
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::DatabaseError(_) => Some("chat-api doctor".to_string()),
            _ => None,
        }
    }

    /// Whether this error was caused by the caller rather than the service
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ChatNotFound(_) | Self::Validation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_not_found_error() {
        let error = Error::ChatNotFound(42);
        assert_eq!(error.code(), "E001");
        assert_eq!(error.suggestion(), None);
        assert_eq!(error.to_string(), "Chat with id 42 not found");
        assert!(error.is_client_error());
    }

    #[test]
    fn test_validation_error() {
        let error = Error::invalid_body("title", "Title cannot be empty or only whitespace");
        assert_eq!(error.code(), "E800");
        assert!(error.is_client_error());
        assert!(error.to_string().contains("body"));
        assert!(error.to_string().contains("title"));
    }

    #[test]
    fn test_validation_locations() {
        match Error::invalid_query("limit", "too big") {
            Error::Validation { location, .. } => assert_eq!(location, InputLocation::Query),
            other => panic!("unexpected error: {other:?}"),
        }
        match Error::invalid_path("chat_id", "not a number") {
            Error::Validation { location, .. } => assert_eq!(location.as_str(), "path"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_database_error() {
        let error = Error::from(sqlx::Error::RowNotFound);
        assert_eq!(error.code(), "E400");
        assert_eq!(error.suggestion(), Some("chat-api doctor".to_string()));
        assert!(!error.is_client_error());
    }
}
