//! User repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{User, UserId};
use crate::domain::DomainError;

/// Repository trait for user storage
///
/// Soft-deleted users keep their rows, so `get` returns users in any
/// lifecycle state while the `find_active_*` lookups see active accounts
/// only. Uniqueness checks must run against active accounts.
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Get a user by ID, regardless of lifecycle state
    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError>;

    /// Find an active (non-deleted) user by username
    async fn find_active_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Find an active (non-deleted) user by email
    async fn find_active_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Create a new user
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Update an existing user
    async fn update(&self, user: &User) -> Result<User, DomainError>;

    /// Soft-delete a user by setting the deletion timestamp
    ///
    /// Returns `true` if the user was active and is now deleted, `false`
    /// if it was already deleted. Unknown ids are an error.
    async fn soft_delete(&self, id: UserId) -> Result<bool, DomainError>;

    /// Check if an active user holds this username
    async fn username_taken(&self, username: &str) -> Result<bool, DomainError> {
        Ok(self.find_active_by_username(username).await?.is_some())
    }

    /// Check if an active user holds this email
    async fn email_taken(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.find_active_by_email(email).await?.is_some())
    }
}
