//! In-memory user directory
//!
//! Used when no `DATABASE_URL` is configured and as the fake directory in
//! tests. Records live only as long as the process.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::core::db::directory::{DirectoryError, UserDirectory};
use crate::core::db::models::UserRecord;

/// User directory backed by a concurrent hash map keyed by username
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<DashMap<String, UserRecord>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserRepository {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserRecord>, DirectoryError> {
        Ok(self.users.get(username).map(|entry| entry.value().clone()))
    }

    async fn insert(&self, record: UserRecord) -> Result<(), DirectoryError> {
        // The entry holds the shard lock, so check and insert are one step
        match self.users.entry(record.username.clone()) {
            Entry::Occupied(_) => Err(DirectoryError::Duplicate),
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(())
            }
        }
    }
}
