//! Chat service
//!
//! Business rules for chats and messages on top of the repositories.
//! Inputs are validated before any database access.

use crate::chat::model::{
    Chat, ChatWithMessages, CreateChatRequest, CreateMessageRequest, Message, Pagination,
};
use crate::chat::repository::{ChatRepository, MessageRepository};
use crate::chat::validation;
use crate::storage::Database;
use crate::{Error, Result};

/// Service for managing chats and messages
#[derive(Debug, Clone)]
pub struct ChatService {
    db: Database,
}

impl ChatService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Get the underlying database
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Create a new chat
    pub async fn create_chat(&self, request: CreateChatRequest) -> Result<Chat> {
        let title = validation::validate_title(&request.title)?;
        let chat = ChatRepository::new(&self.db).create(&title).await?;

        tracing::debug!(chat_id = chat.id, "Chat created");
        Ok(chat)
    }

    /// Post a message into an existing chat
    pub async fn create_message(
        &self,
        chat_id: i64,
        request: CreateMessageRequest,
    ) -> Result<Message> {
        let text = validation::validate_text(&request.text)?;

        if !ChatRepository::new(&self.db).exists(chat_id).await? {
            return Err(Error::ChatNotFound(chat_id));
        }

        let message = MessageRepository::new(&self.db)
            .create(chat_id, &text)
            .await
            .map_err(|e| map_insert_error(chat_id, e))?;

        tracing::debug!(chat_id, message_id = message.id, "Message created");
        Ok(message)
    }

    /// Get a chat with one page of messages, newest first
    pub async fn get_chat_with_messages(
        &self,
        chat_id: i64,
        pagination: Pagination,
    ) -> Result<ChatWithMessages> {
        pagination.validate()?;

        let chat = ChatRepository::new(&self.db)
            .get(chat_id)
            .await?
            .ok_or(Error::ChatNotFound(chat_id))?;

        let messages = MessageRepository::new(&self.db)
            .list_by_chat_paginated(chat_id, pagination.limit, pagination.offset)
            .await?;

        Ok(ChatWithMessages::new(chat, messages))
    }

    /// Delete a chat and all of its messages
    pub async fn delete_chat(&self, chat_id: i64) -> Result<()> {
        if !ChatRepository::new(&self.db).delete(chat_id).await? {
            return Err(Error::ChatNotFound(chat_id));
        }

        tracing::debug!(chat_id, "Chat deleted");
        Ok(())
    }
}

/// A foreign-key failure on message insert means the chat was deleted after
/// the existence check
fn map_insert_error(chat_id: i64, error: Error) -> Error {
    match error {
        Error::DatabaseError(sqlx::Error::Database(db_err))
            if db_err.is_foreign_key_violation() =>
        {
            Error::ChatNotFound(chat_id)
        }
        other => other,
    }
}
