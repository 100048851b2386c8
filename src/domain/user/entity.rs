//! User entity and account lifecycle types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::DomainError;

/// User identifier - opaque UUID, assigned at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a fresh identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier from its string form
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| DomainError::invalid_id(format!("'{}' is not a valid user id", s)))
    }

    /// Get the inner UUID value
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for UserId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle of a user account
///
/// Sign-out soft-deletes the account instead of removing the row, so every
/// query path has to say explicitly which states it cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AccountLifecycle {
    /// Account is live and participates in uniqueness checks and login
    Active,
    /// Account was signed out at the given time; the row is kept
    Deleted { deleted_at: DateTime<Utc> },
}

impl AccountLifecycle {
    /// Check whether the account is still active
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Deletion timestamp, if the account has been signed out
    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Active => None,
            Self::Deleted { deleted_at } => Some(*deleted_at),
        }
    }
}

/// User entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier, immutable
    id: UserId,
    /// Username, unique among active accounts
    username: String,
    /// Email, unique among active accounts
    email: String,
    /// Argon2 password hash - never exposed in serialization
    #[serde(skip_serializing)]
    password_hash: String,
    /// Active / soft-deleted state
    lifecycle: AccountLifecycle,
    /// Creation timestamp
    created_at: DateTime<Utc>,
    /// Last update timestamp
    updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new active user
    pub fn new(
        id: UserId,
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        let now = Utc::now();

        Self {
            id,
            username: username.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            lifecycle: AccountLifecycle::Active,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rehydrate a user from stored fields
    ///
    /// For persistence adapters only; skips validation and timestamping.
    pub(crate) fn from_parts(
        id: UserId,
        username: String,
        email: String,
        password_hash: String,
        lifecycle: AccountLifecycle,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username,
            email,
            password_hash,
            lifecycle,
            created_at,
            updated_at,
        }
    }

    // Getters

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn lifecycle(&self) -> AccountLifecycle {
        self.lifecycle
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Check if the account is active (not signed out)
    pub fn is_active(&self) -> bool {
        self.lifecycle.is_active()
    }

    /// Deletion timestamp, if any
    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.lifecycle.deleted_at()
    }

    // Mutators

    /// Update the username
    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = username.into();
        self.touch();
    }

    /// Update the email
    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
        self.touch();
    }

    /// Update the password hash
    pub fn set_password_hash(&mut self, password_hash: impl Into<String>) {
        self.password_hash = password_hash.into();
        self.touch();
    }

    /// Soft-delete the account
    ///
    /// Idempotent: an already-deleted account keeps its original timestamp.
    pub fn mark_deleted(&mut self) {
        if self.lifecycle.is_active() {
            self.lifecycle = AccountLifecycle::Deleted {
                deleted_at: Utc::now(),
            };
            self.touch();
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
