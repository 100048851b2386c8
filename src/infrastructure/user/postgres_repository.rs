//! PostgreSQL user repository implementation
//!
//! Expects a `users` table with partial unique indexes on `username` and
//! `email` scoped to `deleted_at IS NULL`, so the database closes the
//! check-then-act window the service-level uniqueness checks leave open.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::user::{AccountLifecycle, User, UserId, UserRepository};
use crate::domain::DomainError;

/// PostgreSQL implementation of UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, password_hash, deleted_at, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get user: {}", e)))?;

        Ok(row.map(|row| row_to_user(&row)))
    }

    async fn find_active_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, password_hash, deleted_at, created_at, updated_at
            FROM users
            WHERE username = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get user by username: {}", e)))?;

        Ok(row.map(|row| row_to_user(&row)))
    }

    async fn find_active_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, password_hash, deleted_at, created_at, updated_at
            FROM users
            WHERE email = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get user by email: {}", e)))?;

        Ok(row.map(|row| row_to_user(&row)))
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, username, email, password_hash, deleted_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.id().as_uuid())
        .bind(user.username())
        .bind(user.email())
        .bind(user.password_hash())
        .bind(user.deleted_at())
        .bind(user.created_at())
        .bind(user.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, &user))?;

        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET username = $2, email = $3, password_hash = $4, deleted_at = $5, updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(user.id().as_uuid())
        .bind(user.username())
        .bind(user.email())
        .bind(user.password_hash())
        .bind(user.deleted_at())
        .bind(user.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, user))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "User '{}' not found",
                user.id()
            )));
        }

        Ok(user.clone())
    }

    async fn soft_delete(&self, id: UserId) -> Result<bool, DomainError> {
        let result = sqlx::query(
            "UPDATE users SET deleted_at = NOW(), updated_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to soft-delete user: {}", e)))?;

        if result.rows_affected() > 0 {
            return Ok(true);
        }

        // Nothing was touched: either already deleted or unknown
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(id.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to check user existence: {}", e)))?;

        if exists {
            Ok(false)
        } else {
            Err(DomainError::not_found(format!("User '{}' not found", id)))
        }
    }
}

fn map_unique_violation(e: sqlx::Error, user: &User) -> DomainError {
    let msg = e.to_string();

    if msg.contains("duplicate key") || msg.contains("unique constraint") {
        if msg.contains("email") {
            DomainError::conflict(format!("Email '{}' is already registered", user.email()))
        } else {
            DomainError::conflict(format!("Username '{}' is already taken", user.username()))
        }
    } else {
        DomainError::storage(format!("Failed to write user: {}", e))
    }
}

fn row_to_user(row: &sqlx::postgres::PgRow) -> User {
    let id: Uuid = row.get("id");
    let username: String = row.get("username");
    let email: String = row.get("email");
    let password_hash: String = row.get("password_hash");
    let deleted_at: Option<DateTime<Utc>> = row.get("deleted_at");
    let created_at: DateTime<Utc> = row.get("created_at");
    let updated_at: DateTime<Utc> = row.get("updated_at");

    let lifecycle = match deleted_at {
        None => AccountLifecycle::Active,
        Some(deleted_at) => AccountLifecycle::Deleted { deleted_at },
    };

    User::from_parts(
        UserId::from(id),
        username,
        email,
        password_hash,
        lifecycle,
        created_at,
        updated_at,
    )
}
