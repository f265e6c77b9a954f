//! Database models
//!
//! Record types stored in the user directory.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A stored user credential
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct UserRecord {
    /// Unique, immutable identifier
    pub username: String,
    /// bcrypt hash of the password, never the plaintext
    #[serde(skip_serializing)]
    pub password_hash: String,
}

impl UserRecord {
    /// Create a record from a username and an already-hashed password
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
        }
    }
}
