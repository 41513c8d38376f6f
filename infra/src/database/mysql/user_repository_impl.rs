//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use ag_core::domain::entities::user::User;
use ag_core::errors::DomainError;
use ag_core::repositories::UserRepository;

/// MySQL-backed user store.
///
/// The `id` column is a CHAR(36) UUID; `email` carries a unique index and is
/// stored normalized, so lookups are plain equality.
pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| db_error("id", e))?;

        Ok(User {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid UUID in users.id: {}", e),
            })?,
            email: row.try_get("email").map_err(|e| db_error("email", e))?,
            full_name: row
                .try_get("full_name")
                .map_err(|e| db_error("full_name", e))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| db_error("password_hash", e))?,
            is_active: row
                .try_get("is_active")
                .map_err(|e| db_error("is_active", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| db_error("created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| db_error("updated_at", e))?,
            last_login_at: row
                .try_get("last_login_at")
                .map_err(|e| db_error("last_login_at", e))?,
        })
    }
}

fn db_error(column: &str, e: sqlx::Error) -> DomainError {
    DomainError::Internal {
        message: format!("Failed to read column {}: {}", column, e),
    }
}

fn query_error(e: sqlx::Error) -> DomainError {
    DomainError::Internal {
        message: format!("Database query failed: {}", e),
    }
}

const USER_COLUMNS: &str = "id, email, full_name, password_hash, is_active, \
                            created_at, updated_at, last_login_at";

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = format!(
            "SELECT {} FROM users WHERE email = ? LIMIT 1",
            USER_COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE id = ? LIMIT 1", USER_COLUMNS);

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (id, email, full_name, password_hash, is_active,
                               created_at, updated_at, last_login_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.email)
            .bind(&user.full_name)
            .bind(&user.password_hash)
            .bind(user.is_active)
            .bind(user.created_at)
            .bind(user.updated_at)
            .bind(user.last_login_at)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                // Unique index on email; a duplicate insert surfaces as a
                // validation problem, not a server fault.
                sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                    DomainError::Validation {
                        message: "Email already registered".to_string(),
                    }
                }
                other => query_error(other),
            })?;

        Ok(user)
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE users
            SET password_hash = ?, updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(password_hash)
            .bind(Utc::now())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(query_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn touch_last_login(&self, id: Uuid) -> Result<(), DomainError> {
        let query = r#"
            UPDATE users
            SET last_login_at = ?, updated_at = ?
            WHERE id = ?
        "#;

        let now = Utc::now();
        sqlx::query(query)
            .bind(now)
            .bind(now)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(query_error)?;

        Ok(())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let query = "SELECT 1 FROM users WHERE email = ? LIMIT 1";

        let result = sqlx::query(query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?;

        Ok(result.is_some())
    }
}
