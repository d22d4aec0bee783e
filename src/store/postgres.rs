use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, QueryBuilder, Row};
use uuid::Uuid;

use crate::models::{AdminRecord, NewAdmin, NewUser, UserChanges, UserRecord};

use super::{Store, StoreError};

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS admins (
    id UUID PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL
);
CREATE TABLE IF NOT EXISTS users (
    id UUID PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    age BIGINT,
    created_at TIMESTAMPTZ NOT NULL
);
"#;

const USER_COLUMNS: &str = "id, name, email, age, created_at";

/// Postgres-backed store. One pool per process, shared by cloning the
/// injected handle.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connect and bootstrap the schema. Callers are expected to treat a
    /// failure here as fatal at startup.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> Result<(), StoreError> {
        for statement in SCHEMA_SQL.split(';').filter(|s| !s.trim().is_empty()) {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(map_sqlx)?;
        }
        Ok(())
    }
}

fn map_sqlx(err: sqlx::Error) -> StoreError {
    match &err {
        // Unique-index violation; email is the only unique column.
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
            StoreError::Duplicate("email".to_string())
        }
        sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) => {
            StoreError::Unavailable(err.to_string())
        }
        _ => StoreError::Backend(err.to_string()),
    }
}

fn row_to_user(row: &PgRow) -> Result<UserRecord, StoreError> {
    let age: Option<i64> = row.try_get("age").map_err(map_sqlx)?;
    let age = age
        .map(u32::try_from)
        .transpose()
        .map_err(|e| StoreError::Backend(format!("corrupt age column: {}", e)))?;

    Ok(UserRecord {
        id: row.try_get("id").map_err(map_sqlx)?,
        name: row.try_get("name").map_err(map_sqlx)?,
        email: row.try_get("email").map_err(map_sqlx)?,
        age,
        created_at: row.try_get("created_at").map_err(map_sqlx)?,
    })
}

fn row_to_admin(row: &PgRow) -> Result<AdminRecord, StoreError> {
    Ok(AdminRecord {
        id: row.try_get("id").map_err(map_sqlx)?,
        name: row.try_get("name").map_err(map_sqlx)?,
        email: row.try_get("email").map_err(map_sqlx)?,
        password_hash: row.try_get("password_hash").map_err(map_sqlx)?,
        created_at: row.try_get("created_at").map_err(map_sqlx)?,
    })
}

/// Escape LIKE wildcards so a search key matches literally.
fn like_pattern(key: &str) -> String {
    let escaped = key
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[async_trait]
impl Store for PgStore {
    async fn create_admin(&self, admin: NewAdmin) -> Result<AdminRecord, StoreError> {
        let record = AdminRecord {
            id: Uuid::new_v4(),
            name: admin.name,
            email: admin.email,
            password_hash: admin.password_hash,
            created_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO admins (id, name, email, password_hash, created_at) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(record.id)
        .bind(&record.name)
        .bind(&record.email)
        .bind(&record.password_hash)
        .bind(record.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(record)
    }

    async fn find_admin_by_email(&self, email: &str) -> Result<Option<AdminRecord>, StoreError> {
        let row = sqlx::query(
            "SELECT id, name, email, password_hash, created_at FROM admins WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.as_ref().map(row_to_admin).transpose()
    }

    async fn insert_user(&self, user: NewUser) -> Result<UserRecord, StoreError> {
        let record = UserRecord {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            age: user.age,
            created_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO users (id, name, email, age, created_at) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(record.id)
        .bind(&record.name)
        .bind(&record.email)
        .bind(record.age.map(i64::from))
        .bind(record.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(record)
    }

    async fn insert_users(&self, users: Vec<NewUser>) -> Result<Vec<UserRecord>, StoreError> {
        let now = Utc::now();
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

        // Single batched insert; partial-insert semantics on failure are
        // whatever Postgres does with a multi-row INSERT (all or nothing).
        let mut qb: QueryBuilder<sqlx::Postgres> =
            QueryBuilder::new("INSERT INTO users (id, name, email, age, created_at) ");
        qb.push_values(records.iter(), |mut b, rec| {
            b.push_bind(rec.id)
                .push_bind(&rec.name)
                .push_bind(&rec.email)
                .push_bind(rec.age.map(i64::from))
                .push_bind(rec.created_at);
        });
        qb.build().execute(&self.pool).await.map_err(map_sqlx)?;

        Ok(records)
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>, StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM users ORDER BY created_at, id",
            USER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.iter().map(row_to_user).collect()
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn update_user(
        &self,
        id: Uuid,
        changes: UserChanges,
    ) -> Result<Option<UserRecord>, StoreError> {
        if changes.is_empty() {
            return self.find_user(id).await;
        }

        let mut qb: QueryBuilder<sqlx::Postgres> = QueryBuilder::new("UPDATE users SET ");
        let mut fields = qb.separated(", ");
        if let Some(name) = &changes.name {
            fields.push("name = ");
            fields.push_bind_unseparated(name);
        }
        if let Some(email) = &changes.email {
            fields.push("email = ");
            fields.push_bind_unseparated(email);
        }
        if let Some(age) = changes.age {
            fields.push("age = ");
            fields.push_bind_unseparated(i64::from(age));
        }
        qb.push(" WHERE id = ")
            .push_bind(id)
            .push(format!(" RETURNING {}", USER_COLUMNS));

        let row = qb
            .build()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn update_users(
        &self,
        updates: Vec<(Uuid, UserChanges)>,
    ) -> Result<u64, StoreError> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;
        let mut modified = 0u64;

        for (id, changes) in updates {
            if changes.is_empty() {
                continue;
            }

            let mut qb: QueryBuilder<sqlx::Postgres> = QueryBuilder::new("UPDATE users SET ");
            let mut fields = qb.separated(", ");
            if let Some(name) = &changes.name {
                fields.push("name = ");
                fields.push_bind_unseparated(name);
            }
            if let Some(email) = &changes.email {
                fields.push("email = ");
                fields.push_bind_unseparated(email);
            }
            if let Some(age) = changes.age {
                fields.push("age = ");
                fields.push_bind_unseparated(i64::from(age));
            }
            qb.push(" WHERE id = ").push_bind(id);

            let result = qb.build().execute(&mut *tx).await.map_err(map_sqlx)?;
            modified += result.rows_affected();
        }

        tx.commit().await.map_err(map_sqlx)?;
        Ok(modified)
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_users(&self, ids: &[Uuid]) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ANY($1)")
            .bind(ids.to_vec())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(result.rows_affected())
    }

    async fn search_users(&self, key: &str) -> Result<Vec<UserRecord>, StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM users WHERE name ILIKE $1 OR email ILIKE $1 \
             ORDER BY created_at, id",
            USER_COLUMNS
        ))
        .bind(like_pattern(key))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.iter().map(row_to_user).collect()
    }

    async fn page_users(
        &self,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<UserRecord>, u64), StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM users ORDER BY created_at, id LIMIT $1 OFFSET $2",
            USER_COLUMNS
        ))
        .bind(limit as i64)
        .bind(offset as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;
        let items = rows.iter().map(row_to_user).collect::<Result<Vec<_>, _>>()?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Ok((items, total as u64))
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(())
    }
}
