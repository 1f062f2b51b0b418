//! MySQL implementation of the UserRepository trait.
//!
//! This module provides the concrete user directory backed by a MySQL
//! `users` table keyed by email. Token version increments run inside a
//! transaction so concurrent revocations are never lost.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use ev_core::domain::entities::user::User;
use ev_core::errors::DomainError;
use ev_core::repositories::UserRepository;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        Ok(User {
            email: row
                .try_get("email")
                .map_err(|e| DomainError::Database(format!("Failed to get email: {}", e)))?,
            first_name: row
                .try_get("first_name")
                .map_err(|e| DomainError::Database(format!("Failed to get first_name: {}", e)))?,
            last_name: row
                .try_get("last_name")
                .map_err(|e| DomainError::Database(format!("Failed to get last_name: {}", e)))?,
            password_hash: row.try_get("password_hash").map_err(|e| {
                DomainError::Database(format!("Failed to get password_hash: {}", e))
            })?,
            token_version: row.try_get("token_version").map_err(|e| {
                DomainError::Database(format!("Failed to get token_version: {}", e))
            })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Database(format!("Failed to get created_at: {}", e)))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::Database(format!("Failed to get updated_at: {}", e)))?,
        })
    }

    fn is_duplicate_key(err: &sqlx::Error) -> bool {
        matches!(
            err,
            sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23000")
        )
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT email, first_name, last_name, password_hash,
                   token_version, created_at, updated_at
            FROM users
            WHERE email = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("Database query failed: {}", e)))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = ?")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("Database query failed: {}", e)))?;

        Ok(count > 0)
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (
                email, first_name, last_name, password_hash,
                token_version, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(&user.email)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.password_hash)
            .bind(user.token_version)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if Self::is_duplicate_key(&e) {
                    DomainError::Validation {
                        message: "Email already registered".to_string(),
                    }
                } else {
                    DomainError::Database(format!("Failed to create user: {}", e))
                }
            })?;

        Ok(user)
    }

    async fn increment_token_version(&self, email: &str) -> Result<Option<u64>, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::Database(format!("Failed to begin transaction: {}", e)))?;

        let result = sqlx::query(
            "UPDATE users SET token_version = token_version + 1, updated_at = ? WHERE email = ?",
        )
        .bind(Utc::now())
        .bind(email)
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::Database(format!("Failed to update token version: {}", e)))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        // The row lock taken by the UPDATE is held until commit
        let version: u64 = sqlx::query_scalar("SELECT token_version FROM users WHERE email = ?")
            .bind(email)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| DomainError::Database(format!("Failed to read token version: {}", e)))?;

        tx.commit()
            .await
            .map_err(|e| DomainError::Database(format!("Failed to commit transaction: {}", e)))?;

        Ok(Some(version))
    }
}
