//! Chat domain types and request/response DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::chat::validation;

/// Default number of messages returned with a chat
pub const DEFAULT_PAGE_LIMIT: i64 = 20;
/// Largest page a caller may request
pub const MAX_PAGE_LIMIT: i64 = 100;

/// A titled conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    /// Unique chat identifier
    pub id: i64,
    /// Trimmed title, 1-200 characters
    pub title: String,
    /// When the chat was created
    pub created_at: DateTime<Utc>,
}

/// A message posted into a chat
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique message identifier
    pub id: i64,
    /// ID of the chat this message belongs to
    pub chat_id: i64,
    /// Trimmed text, 1-5000 characters
    pub text: String,
    /// When the message was created
    pub created_at: DateTime<Utc>,
}

/// A chat together with one page of its messages, newest first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatWithMessages {
    pub id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl ChatWithMessages {
    pub fn new(chat: Chat, messages: Vec<Message>) -> Self {
        Self {
            id: chat.id,
            title: chat.title,
            created_at: chat.created_at,
            messages,
        }
    }
}

/// Create chat request
#[derive(Debug, Clone, Deserialize)]
pub struct CreateChatRequest {
    pub title: String,
}

impl CreateChatRequest {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

/// Create message request
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMessageRequest {
    pub text: String,
}

impl CreateMessageRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Window over a chat's messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    DEFAULT_PAGE_LIMIT
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_LIMIT,
            offset: 0,
        }
    }
}

impl Pagination {
    pub fn new(limit: i64, offset: i64) -> Self {
        Self { limit, offset }
    }

    /// Check `limit` is within 1..=100 and `offset` is non-negative
    pub fn validate(&self) -> Result<()> {
        validation::validate_pagination(self.limit, self.offset)
    }
}
