//! Account service for sign-up, sign-out, and account updates

use std::sync::Arc;

use tracing::debug;

use crate::domain::user::{
    validate_email, validate_password, validate_username, User, UserId, UserRepository,
};
use crate::domain::DomainError;

use super::password::PasswordHasher;

/// Request for creating a new account
#[derive(Debug, Clone)]
pub struct SignUpRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Request for updating an account
///
/// Partial update semantics: `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateAccountRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Account service enforcing the uniqueness invariant and the soft-delete
/// lifecycle
///
/// Username and email must each be unique among active (non-deleted)
/// accounts. The checks here are two sequential reads before the write, so
/// a caller colliding on both fields only sees the username failure, and
/// two concurrent sign-ups can still race each other; the Postgres adapter
/// backs this up with partial unique indexes.
#[derive(Debug)]
pub struct AccountService<R: UserRepository, H: PasswordHasher> {
    repository: Arc<R>,
    hasher: Arc<H>,
}

impl<R: UserRepository, H: PasswordHasher> AccountService<R, H> {
    /// Create a new account service
    pub fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self { repository, hasher }
    }

    /// Sign up a new account
    pub async fn sign_up(&self, request: SignUpRequest) -> Result<User, DomainError> {
        validate_username(&request.username).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_email(&request.email).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_password(&request.password).map_err(|e| DomainError::validation(e.to_string()))?;

        // Username first, then email: the first collision wins
        if self.repository.username_taken(&request.username).await? {
            return Err(DomainError::conflict(format!(
                "Username '{}' is already taken",
                request.username
            )));
        }

        if self.repository.email_taken(&request.email).await? {
            return Err(DomainError::conflict(format!(
                "Email '{}' is already registered",
                request.email
            )));
        }

        let password_hash = self.hasher.hash(&request.password)?;

        let user = User::new(
            UserId::generate(),
            &request.username,
            &request.email,
            password_hash,
        );

        debug!(user_id = %user.id(), username = %user.username(), "Signing up user");

        self.repository.create(user).await
    }

    /// Sign out an account by soft-deleting it
    ///
    /// Idempotent: signing out an already-deleted account succeeds without
    /// touching the row again.
    pub async fn sign_out(&self, user_id: UserId) -> Result<(), DomainError> {
        let was_active = self.repository.soft_delete(user_id).await?;

        if !was_active {
            debug!(user_id = %user_id, "Sign-out on already-deleted account");
        }

        Ok(())
    }

    /// Update an account with partial fields
    ///
    /// Provided username/email values are checked for uniqueness against
    /// other active accounts; the caller's own record never collides with
    /// itself. A provided password is hashed before being written.
    pub async fn update_account(
        &self,
        user_id: UserId,
        request: UpdateAccountRequest,
    ) -> Result<User, DomainError> {
        let mut user = self
            .repository
            .get(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", user_id)))?;

        if !user.is_active() {
            return Err(DomainError::not_found(format!(
                "User '{}' not found",
                user_id
            )));
        }

        if let Some(username) = &request.username {
            validate_username(username).map_err(|e| DomainError::validation(e.to_string()))?;

            match self.repository.find_active_by_username(username).await? {
                Some(holder) if holder.id() != user.id() => {
                    return Err(DomainError::conflict(format!(
                        "Username '{}' is already taken",
                        username
                    )));
                }
                _ => {}
            }
        }

        if let Some(email) = &request.email {
            validate_email(email).map_err(|e| DomainError::validation(e.to_string()))?;

            match self.repository.find_active_by_email(email).await? {
                Some(holder) if holder.id() != user.id() => {
                    return Err(DomainError::conflict(format!(
                        "Email '{}' is already registered",
                        email
                    )));
                }
                _ => {}
            }
        }

        if let Some(username) = request.username {
            user.set_username(username);
        }

        if let Some(email) = request.email {
            user.set_email(email);
        }

        if let Some(password) = request.password {
            validate_password(&password).map_err(|e| DomainError::validation(e.to_string()))?;
            let password_hash = self.hasher.hash(&password)?;
            user.set_password_hash(password_hash);
        }

        debug!(user_id = %user_id, "Updating account");

        self.repository.update(&user).await
    }

    /// Authenticate an active account with username and password
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError> {
        let user = match self.repository.find_active_by_username(username).await? {
            Some(u) => u,
            None => return Ok(None),
        };

        if !self.hasher.verify(password, user.password_hash()) {
            return Ok(None);
        }

        Ok(Some(user))
    }

    /// Get an active account by ID
    pub async fn get_active(&self, user_id: UserId) -> Result<Option<User>, DomainError> {
        let user = self.repository.get(user_id).await?;
        Ok(user.filter(User::is_active))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::user::password::Argon2Hasher;
    use crate::infrastructure::user::repository::InMemoryUserRepository;

    fn create_service() -> AccountService<InMemoryUserRepository, Argon2Hasher> {
        let repository = Arc::new(InMemoryUserRepository::new());
        let hasher = Arc::new(Argon2Hasher::new());
        AccountService::new(repository, hasher)
    }

    fn make_request(username: &str, email: &str, password: &str) -> SignUpRequest {
        SignUpRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_sign_up() {
        let service = create_service();

        let user = service
            .sign_up(make_request("alice", "alice@example.com", "secure_password"))
            .await
            .unwrap();

        assert_eq!(user.username(), "alice");
        assert_eq!(user.email(), "alice@example.com");
        assert!(user.is_active());

        // Stored password is hashed, not plaintext
        assert_ne!(user.password_hash(), "secure_password");
    }

    #[tokio::test]
    async fn test_sign_up_invalid_username() {
        let service = create_service();

        let result = service
            .sign_up(make_request("ab", "alice@example.com", "secure_password"))
            .await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_sign_up_invalid_email() {
        let service = create_service();

        let result = service
            .sign_up(make_request("alice", "not-an-email", "secure_password"))
            .await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_sign_up_short_password() {
        let service = create_service();

        let result = service
            .sign_up(make_request("alice", "alice@example.com", "short"))
            .await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_sign_up_duplicate_username() {
        let service = create_service();

        service
            .sign_up(make_request("alice", "alice@example.com", "secure_password"))
            .await
            .unwrap();

        let result = service
            .sign_up(make_request("alice", "other@example.com", "secure_password"))
            .await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));

        // No record was created for the failed sign-up
        let repo_hit = service
            .repository
            .find_active_by_email("other@example.com")
            .await
            .unwrap();
        assert!(repo_hit.is_none());
    }

    #[tokio::test]
    async fn test_sign_up_duplicate_email() {
        let service = create_service();

        service
            .sign_up(make_request("alice", "alice@example.com", "secure_password"))
            .await
            .unwrap();

        let result = service
            .sign_up(make_request("bob", "alice@example.com", "secure_password"))
            .await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_sign_up_collision_on_both_reports_username() {
        let service = create_service();

        service
            .sign_up(make_request("alice", "alice@example.com", "secure_password"))
            .await
            .unwrap();

        // Username is checked before email; the username failure wins
        let err = service
            .sign_up(make_request("alice", "alice@example.com", "secure_password"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Username"));
    }

    #[tokio::test]
    async fn test_sign_out_then_username_is_free() {
        let service = create_service();

        let user = service
            .sign_up(make_request("alice", "alice@example.com", "secure_password"))
            .await
            .unwrap();

        service.sign_out(user.id()).await.unwrap();

        // The record still exists with a deletion timestamp
        let row = service.repository.get(user.id()).await.unwrap().unwrap();
        assert!(row.deleted_at().is_some());

        // A new account can reuse the username and email
        let replacement = service
            .sign_up(make_request("alice", "alice@example.com", "secure_password"))
            .await
            .unwrap();
        assert_ne!(replacement.id(), user.id());
    }

    #[tokio::test]
    async fn test_sign_out_is_idempotent() {
        let service = create_service();

        let user = service
            .sign_up(make_request("alice", "alice@example.com", "secure_password"))
            .await
            .unwrap();

        service.sign_out(user.id()).await.unwrap();
        service.sign_out(user.id()).await.unwrap();
    }

    #[tokio::test]
    async fn test_sign_out_unknown_user() {
        let service = create_service();

        let result = service.sign_out(UserId::generate()).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_signed_out_user_cannot_authenticate() {
        let service = create_service();

        let user = service
            .sign_up(make_request("alice", "alice@example.com", "secure_password"))
            .await
            .unwrap();

        service.sign_out(user.id()).await.unwrap();

        let auth = service
            .authenticate("alice", "secure_password")
            .await
            .unwrap();
        assert!(auth.is_none());
    }

    #[tokio::test]
    async fn test_update_account_password_only() {
        let service = create_service();

        let user = service
            .sign_up(make_request("alice", "alice@example.com", "old_password1"))
            .await
            .unwrap();

        service
            .update_account(
                user.id(),
                UpdateAccountRequest {
                    password: Some("new_password1".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        // Username and email untouched
        let updated = service.repository.get(user.id()).await.unwrap().unwrap();
        assert_eq!(updated.username(), "alice");
        assert_eq!(updated.email(), "alice@example.com");

        // Old password no longer validates, new one does
        assert!(service
            .authenticate("alice", "old_password1")
            .await
            .unwrap()
            .is_none());
        assert!(service
            .authenticate("alice", "new_password1")
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_update_account_username_and_email() {
        let service = create_service();

        let user = service
            .sign_up(make_request("alice", "alice@example.com", "secure_password"))
            .await
            .unwrap();

        let updated = service
            .update_account(
                user.id(),
                UpdateAccountRequest {
                    username: Some("alice2".to_string()),
                    email: Some("alice2@example.com".to_string()),
                    password: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.username(), "alice2");
        assert_eq!(updated.email(), "alice2@example.com");

        // The password hash is untouched
        assert!(service
            .authenticate("alice2", "secure_password")
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_update_account_to_own_values_does_not_collide() {
        let service = create_service();

        let user = service
            .sign_up(make_request("alice", "alice@example.com", "secure_password"))
            .await
            .unwrap();

        let updated = service
            .update_account(
                user.id(),
                UpdateAccountRequest {
                    username: Some("alice".to_string()),
                    email: Some("alice@example.com".to_string()),
                    password: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.username(), "alice");
    }

    #[tokio::test]
    async fn test_update_account_duplicate_username() {
        let service = create_service();

        service
            .sign_up(make_request("alice", "alice@example.com", "secure_password"))
            .await
            .unwrap();
        let bob = service
            .sign_up(make_request("bob", "bob@example.com", "secure_password"))
            .await
            .unwrap();

        let result = service
            .update_account(
                bob.id(),
                UpdateAccountRequest {
                    username: Some("alice".to_string()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_update_account_duplicate_email() {
        let service = create_service();

        service
            .sign_up(make_request("alice", "alice@example.com", "secure_password"))
            .await
            .unwrap();
        let bob = service
            .sign_up(make_request("bob", "bob@example.com", "secure_password"))
            .await
            .unwrap();

        let result = service
            .update_account(
                bob.id(),
                UpdateAccountRequest {
                    email: Some("alice@example.com".to_string()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_update_account_on_deleted_user() {
        let service = create_service();

        let user = service
            .sign_up(make_request("alice", "alice@example.com", "secure_password"))
            .await
            .unwrap();
        service.sign_out(user.id()).await.unwrap();

        let result = service
            .update_account(
                user.id(),
                UpdateAccountRequest {
                    username: Some("alice2".to_string()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let service = create_service();

        service
            .sign_up(make_request("alice", "alice@example.com", "secure_password"))
            .await
            .unwrap();

        let user = service
            .authenticate("alice", "secure_password")
            .await
            .unwrap();
        assert!(user.is_some());
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let service = create_service();

        service
            .sign_up(make_request("alice", "alice@example.com", "secure_password"))
            .await
            .unwrap();

        let user = service.authenticate("alice", "wrong_password").await.unwrap();
        assert!(user.is_none());
    }

    #[tokio::test]
    async fn test_authenticate_unknown_user() {
        let service = create_service();

        let user = service.authenticate("nobody", "password123").await.unwrap();
        assert!(user.is_none());
    }

    #[tokio::test]
    async fn test_get_active_filters_deleted() {
        let service = create_service();

        let user = service
            .sign_up(make_request("alice", "alice@example.com", "secure_password"))
            .await
            .unwrap();

        assert!(service.get_active(user.id()).await.unwrap().is_some());

        service.sign_out(user.id()).await.unwrap();

        assert!(service.get_active(user.id()).await.unwrap().is_none());
    }
}
