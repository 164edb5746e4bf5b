//! Storage layer - SQLite
//!
//! Provides database management and migrations for the chat service.
//!
//! # Architecture
//!
//! - `database`: Connection pool management and initialization
//! - `migrations`: Schema versioning and automatic migration
//!
//! # Usage
//!
//! ```ignore
//! use chat_core::storage::{Database, DatabaseConfig};
//!
//! // Create an in-memory database for testing
//! let db = Database::in_memory().await?;
//!
//! // Or open a file-backed database
//! let db = Database::new(DatabaseConfig::with_path("chat.db")).await?;
//! ```

pub mod database;
pub mod migrations;

// Re-export commonly used types
pub use database::{Database, DatabaseConfig, default_database_path, parse_database_url};
pub use migrations::{CURRENT_VERSION, MigrationStatus, migration_status, run_migrations};
