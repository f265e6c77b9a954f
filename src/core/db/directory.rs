//! User directory abstraction
//!
//! The authentication service only sees this trait. Storage backends live in
//! [`crate::core::db::repositories`].

use async_trait::async_trait;

use crate::core::db::models::UserRecord;

/// User directory errors
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("Username already exists")]
    Duplicate,

    #[error("Directory unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for DirectoryError {
    fn from(err: sqlx::Error) -> Self {
        DirectoryError::Unavailable(err.to_string())
    }
}

/// Persistent store of username -> credential hash records.
///
/// `insert` must be atomic with respect to username uniqueness: when two
/// callers race on the same username exactly one succeeds and the other gets
/// [`DirectoryError::Duplicate`].
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Look up a record by username
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserRecord>, DirectoryError>;

    /// Insert a new record, failing with `Duplicate` if the username is taken
    async fn insert(&self, record: UserRecord) -> Result<(), DirectoryError>;
}
