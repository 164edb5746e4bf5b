//! Chats and messages
//!
//! Domain types, validation, repositories and the service tying them together.

pub mod model;
pub mod repository;
pub mod service;
pub mod validation;

pub use model::{
    Chat, ChatWithMessages, CreateChatRequest, CreateMessageRequest, Message, Pagination,
};
pub use repository::{ChatRepository, MessageRepository};
pub use service::ChatService;
