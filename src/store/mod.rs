//! Persistent store collaborator.
//!
//! Handlers talk to the store exclusively through the [`Store`] trait, and a
//! handle is injected via application state rather than held as a process
//! global, so tests can substitute [`MemoryStore`] for the Postgres-backed
//! [`PgStore`].

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{AdminRecord, NewAdmin, NewUser, UserChanges, UserRecord};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Unique-constraint violation on the named field.
    #[error("duplicate {0}")]
    Duplicate(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("store error: {0}")]
    Backend(String),
}

/// Query/command interface over the admin and user collections.
///
/// Bulk operations carry no atomicity requirement; partial-insert semantics
/// are store-defined.
#[async_trait]
pub trait Store: Send + Sync {
    // Admin records
    async fn create_admin(&self, admin: NewAdmin) -> Result<AdminRecord, StoreError>;
    async fn find_admin_by_email(&self, email: &str) -> Result<Option<AdminRecord>, StoreError>;

    // User records
    async fn insert_user(&self, user: NewUser) -> Result<UserRecord, StoreError>;
    async fn insert_users(&self, users: Vec<NewUser>) -> Result<Vec<UserRecord>, StoreError>;
    async fn list_users(&self) -> Result<Vec<UserRecord>, StoreError>;
    async fn find_user(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError>;

    /// Replace the supplied fields on the matching record. Returns the
    /// updated record, or `None` if the id does not resolve.
    async fn update_user(
        &self,
        id: Uuid,
        changes: UserChanges,
    ) -> Result<Option<UserRecord>, StoreError>;

    /// Apply each field-set independently; returns only the modified count.
    async fn update_users(
        &self,
        updates: Vec<(Uuid, UserChanges)>,
    ) -> Result<u64, StoreError>;

    /// Returns whether a record was removed.
    async fn delete_user(&self, id: Uuid) -> Result<bool, StoreError>;

    /// Removes all matching records; zero matches is not an error.
    async fn delete_users(&self, ids: &[Uuid]) -> Result<u64, StoreError>;

    /// Case-insensitive substring match against name or email.
    async fn search_users(&self, key: &str) -> Result<Vec<UserRecord>, StoreError>;

    /// One page of users in the store's natural order, plus the total count
    /// of the full collection.
    async fn page_users(
        &self,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<UserRecord>, u64), StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;
}
