//! Chat Core Library
//!
//! This crate provides the core functionality for the chat service, including:
//! - Storage (SQLite pool + versioned migrations)
//! - Chats and messages (validation, repositories, service)
//! - HTTP API (axum router, error mapping, health checks)
//! - Configuration (defaults, TOML file, environment)

pub mod api;
pub mod chat;
pub mod config;
pub mod error;
pub mod storage;

pub use error::{Error, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::chat::{ChatService, Pagination};
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::storage::{Database, DatabaseConfig};
}
