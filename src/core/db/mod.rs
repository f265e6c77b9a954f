//! User directory for AlphaBrain
//!
//! This module provides the [`UserDirectory`] abstraction, its record type,
//! and the PostgreSQL and in-memory implementations.

pub mod directory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used items
pub use directory::{DirectoryError, UserDirectory};
pub use models::UserRecord;
pub use pool::{DbConfig, DbError, create_pool};
pub use repositories::{InMemoryUserRepository, UserRepository};

// Re-export sqlx types that might be needed
pub use sqlx::PgPool;
