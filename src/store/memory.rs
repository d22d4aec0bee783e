//! In-memory store used as a test substitute for [`PgStore`].

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{AdminRecord, NewAdmin, NewUser, UserChanges, UserRecord};

use super::{Store, StoreError};

#[derive(Default)]
struct Collections {
    admins: Vec<AdminRecord>,
    users: Vec<UserRecord>,
}

/// Keeps both collections in insertion order, matching the Postgres store's
/// `created_at, id` ordering closely enough for the API surface.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches_key(user: &UserRecord, key: &str) -> bool {
    let key = key.to_lowercase();
    user.name.to_lowercase().contains(&key) || user.email.to_lowercase().contains(&key)
}

fn apply_changes(user: &mut UserRecord, changes: &UserChanges) {
    if let Some(name) = &changes.name {
        user.name = name.clone();
    }
    if let Some(email) = &changes.email {
        user.email = email.clone();
    }
    if let Some(age) = changes.age {
        user.age = Some(age);
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_admin(&self, admin: NewAdmin) -> Result<AdminRecord, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.admins.iter().any(|a| a.email == admin.email) {
            return Err(StoreError::Duplicate("email".to_string()));
        }

        let record = AdminRecord {
            id: Uuid::new_v4(),
            name: admin.name,
            email: admin.email,
            password_hash: admin.password_hash,
            created_at: Utc::now(),
        };
        inner.admins.push(record.clone());
        Ok(record)
    }

    async fn find_admin_by_email(&self, email: &str) -> Result<Option<AdminRecord>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.admins.iter().find(|a| a.email == email).cloned())
    }

    async fn insert_user(&self, user: NewUser) -> Result<UserRecord, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::Duplicate("email".to_string()));
        }

        let record = UserRecord {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            age: user.age,
            created_at: Utc::now(),
        };
        inner.users.push(record.clone());
        Ok(record)
    }

    async fn insert_users(&self, users: Vec<NewUser>) -> Result<Vec<UserRecord>, StoreError> {
        let mut inner = self.inner.write().await;
        let now = Utc::now();

        // Reject the whole batch on any duplicate, mirroring a multi-row
        // INSERT against a unique index.
        for (i, user) in users.iter().enumerate() {
            let dup_existing = inner.users.iter().any(|u| u.email == user.email);
            let dup_in_batch = users[..i].iter().any(|u| u.email == user.email);
            if dup_existing || dup_in_batch {
                return Err(StoreError::Duplicate("email".to_string()));
            }
        }

        let records: Vec<UserRecord> = users
            .into_iter()
            .map(|u| UserRecord {
                id: Uuid::new_v4(),
                name: u.name,
                email: u.email,
                age: u.age,
                created_at: now,
            })
            .collect();
        inner.users.extend(records.iter().cloned());
        Ok(records)
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.users.clone())
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.users.iter().find(|u| u.id == id).cloned())
    }

    async fn update_user(
        &self,
        id: Uuid,
        changes: UserChanges,
    ) -> Result<Option<UserRecord>, StoreError> {
        let mut inner = self.inner.write().await;

        if let Some(email) = &changes.email {
            if inner.users.iter().any(|u| u.email == *email && u.id != id) {
                return Err(StoreError::Duplicate("email".to_string()));
            }
        }

        match inner.users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                apply_changes(user, &changes);
                Ok(Some(user.clone()))
            }
            None => Ok(None),
        }
    }

    async fn update_users(
        &self,
        updates: Vec<(Uuid, UserChanges)>,
    ) -> Result<u64, StoreError> {
        let mut inner = self.inner.write().await;

        // Stage on a copy so a duplicate email anywhere in the batch leaves
        // the collection untouched, like a rolled-back transaction hitting
        // the unique index.
        let mut staged = inner.users.clone();
        let mut modified = 0u64;

        for (id, changes) in updates {
            if changes.is_empty() {
                continue;
            }
            if let Some(email) = &changes.email {
                if staged.iter().any(|u| u.email == *email && u.id != id) {
                    return Err(StoreError::Duplicate("email".to_string()));
                }
            }
            if let Some(user) = staged.iter_mut().find(|u| u.id == id) {
                apply_changes(user, &changes);
                modified += 1;
            }
        }

        inner.users = staged;
        Ok(modified)
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        let before = inner.users.len();
        inner.users.retain(|u| u.id != id);
        Ok(inner.users.len() < before)
    }

    async fn delete_users(&self, ids: &[Uuid]) -> Result<u64, StoreError> {
        let mut inner = self.inner.write().await;
        let before = inner.users.len();
        inner.users.retain(|u| !ids.contains(&u.id));
        Ok((before - inner.users.len()) as u64)
    }

    async fn search_users(&self, key: &str) -> Result<Vec<UserRecord>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .iter()
            .filter(|u| matches_key(u, key))
            .cloned()
            .collect())
    }

    async fn page_users(
        &self,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<UserRecord>, u64), StoreError> {
        let inner = self.inner.read().await;
        let total = inner.users.len() as u64;
        let items = inner
            .users
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect();
        Ok((items, total))
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
