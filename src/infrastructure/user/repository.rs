//! In-memory user repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;

/// In-memory implementation of UserRepository
///
/// Rows are kept across soft deletion; the active-only lookups filter on
/// lifecycle state the same way the SQL adapter filters on `deleted_at`.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn find_active_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.is_active() && u.username() == username)
            .cloned())
    }

    async fn find_active_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.is_active() && u.email() == email)
            .cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if users.contains_key(&user.id()) {
            return Err(DomainError::conflict(format!(
                "User with ID '{}' already exists",
                user.id()
            )));
        }

        users.insert(user.id(), user.clone());

        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if !users.contains_key(&user.id()) {
            return Err(DomainError::not_found(format!(
                "User '{}' not found",
                user.id()
            )));
        }

        users.insert(user.id(), user.clone());

        Ok(user.clone())
    }

    async fn soft_delete(&self, id: UserId) -> Result<bool, DomainError> {
        let mut users = self.users.write().await;

        let user = users
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))?;

        if !user.is_active() {
            return Ok(false);
        }

        user.mark_deleted();

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_user(username: &str, email: &str) -> User {
        User::new(UserId::generate(), username, email, "hashed_password")
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = InMemoryUserRepository::new();
        let user = create_test_user("alice", "alice@example.com");

        repo.create(user.clone()).await.unwrap();

        let retrieved = repo.get(user.id()).await.unwrap();
        assert!(retrieved.is_some());
        assert_eq!(retrieved.unwrap().username(), "alice");
    }

    #[tokio::test]
    async fn test_find_active_by_username_and_email() {
        let repo = InMemoryUserRepository::new();
        let user = create_test_user("alice", "alice@example.com");

        repo.create(user.clone()).await.unwrap();

        let by_username = repo.find_active_by_username("alice").await.unwrap();
        assert_eq!(by_username.unwrap().id(), user.id());

        let by_email = repo.find_active_by_email("alice@example.com").await.unwrap();
        assert_eq!(by_email.unwrap().id(), user.id());
    }

    #[tokio::test]
    async fn test_create_duplicate_id() {
        let repo = InMemoryUserRepository::new();
        let user = create_test_user("alice", "alice@example.com");

        repo.create(user.clone()).await.unwrap();

        let result = repo.create(user).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_soft_delete_hides_user_but_keeps_row() {
        let repo = InMemoryUserRepository::new();
        let user = create_test_user("alice", "alice@example.com");

        repo.create(user.clone()).await.unwrap();

        let deleted = repo.soft_delete(user.id()).await.unwrap();
        assert!(deleted);

        // Active lookups no longer see the user
        assert!(repo.find_active_by_username("alice").await.unwrap().is_none());
        assert!(repo
            .find_active_by_email("alice@example.com")
            .await
            .unwrap()
            .is_none());

        // But the row is still there with a deletion timestamp
        let row = repo.get(user.id()).await.unwrap().unwrap();
        assert!(row.deleted_at().is_some());
    }

    #[tokio::test]
    async fn test_soft_delete_twice() {
        let repo = InMemoryUserRepository::new();
        let user = create_test_user("alice", "alice@example.com");

        repo.create(user.clone()).await.unwrap();

        assert!(repo.soft_delete(user.id()).await.unwrap());
        assert!(!repo.soft_delete(user.id()).await.unwrap());
    }

    #[tokio::test]
    async fn test_soft_delete_unknown_user() {
        let repo = InMemoryUserRepository::new();

        let result = repo.soft_delete(UserId::generate()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_deleted_user_frees_username() {
        let repo = InMemoryUserRepository::new();
        let user = create_test_user("alice", "alice@example.com");

        repo.create(user.clone()).await.unwrap();
        repo.soft_delete(user.id()).await.unwrap();

        assert!(!repo.username_taken("alice").await.unwrap());
        assert!(!repo.email_taken("alice@example.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_update() {
        let repo = InMemoryUserRepository::new();
        let mut user = create_test_user("alice", "alice@example.com");

        repo.create(user.clone()).await.unwrap();

        user.set_username("alice2");
        repo.update(&user).await.unwrap();

        let retrieved = repo.get(user.id()).await.unwrap().unwrap();
        assert_eq!(retrieved.username(), "alice2");
    }

    #[tokio::test]
    async fn test_update_unknown_user() {
        let repo = InMemoryUserRepository::new();
        let user = create_test_user("alice", "alice@example.com");

        let result = repo.update(&user).await;
        assert!(result.is_err());
    }
}
