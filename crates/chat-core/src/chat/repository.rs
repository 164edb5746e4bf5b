//! Chat repository implementations
//!
//! Database operations for chats and messages.

use chrono::Utc;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::Result;
use crate::chat::model::{Chat, Message};
use crate::storage::Database;

/// Chat repository for database operations
pub struct ChatRepository<'a> {
    db: &'a Database,
}

impl<'a> ChatRepository<'a> {
    /// Create a new chat repository
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Insert a chat with an already validated title
    pub async fn create(&self, title: &str) -> Result<Chat> {
        let row = sqlx::query(
            r#"
            INSERT INTO chats (title, created_at)
            VALUES (?, ?)
            RETURNING id, title, created_at
            "#,
        )
        .bind(title)
        .bind(Utc::now())
        .fetch_one(self.db.pool())
        .await?;

        row_to_chat(&row)
    }

    /// Get a chat by ID
    pub async fn get(&self, id: i64) -> Result<Option<Chat>> {
        let row = sqlx::query("SELECT id, title, created_at FROM chats WHERE id = ?")
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?;

        row.as_ref().map(row_to_chat).transpose()
    }

    /// Check if a chat exists
    pub async fn exists(&self, id: i64) -> Result<bool> {
        let row: Option<(i32,)> = sqlx::query_as("SELECT 1 FROM chats WHERE id = ?")
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?;

        Ok(row.is_some())
    }

    /// Delete a chat; its messages go with it through the foreign key cascade.
    ///
    /// Returns whether a chat was actually removed.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM chats WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Message repository for database operations
pub struct MessageRepository<'a> {
    db: &'a Database,
}

impl<'a> MessageRepository<'a> {
    /// Create a new message repository
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Insert a message with already validated text
    pub async fn create(&self, chat_id: i64, text: &str) -> Result<Message> {
        let row = sqlx::query(
            r#"
            INSERT INTO messages (chat_id, text, created_at)
            VALUES (?, ?, ?)
            RETURNING id, chat_id, text, created_at
            "#,
        )
        .bind(chat_id)
        .bind(text)
        .bind(Utc::now())
        .fetch_one(self.db.pool())
        .await?;

        row_to_message(&row)
    }

    /// List one page of a chat's messages, newest first
    pub async fn list_by_chat_paginated(
        &self,
        chat_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Message>> {
        let rows = sqlx::query(
            r#"
            SELECT id, chat_id, text, created_at FROM messages
            WHERE chat_id = ?
            ORDER BY created_at DESC, id DESC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(chat_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(row_to_message).collect()
    }

    /// Count messages in a chat
    pub async fn count_by_chat(&self, chat_id: i64) -> Result<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM messages WHERE chat_id = ?")
            .bind(chat_id)
            .fetch_one(self.db.pool())
            .await?;

        Ok(row.0)
    }
}

fn row_to_chat(row: &SqliteRow) -> Result<Chat> {
    Ok(Chat {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        created_at: row.try_get("created_at")?,
    })
}

fn row_to_message(row: &SqliteRow) -> Result<Message> {
    Ok(Message {
        id: row.try_get("id")?,
        chat_id: row.try_get("chat_id")?,
        text: row.try_get("text")?,
        created_at: row.try_get("created_at")?,
    })
}
