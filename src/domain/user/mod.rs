//! User domain
//!
//! Domain types for user accounts: the user entity with its soft-delete
//! lifecycle, field validation, and the repository trait.

mod entity;
mod repository;
mod validation;

pub use entity::{AccountLifecycle, User, UserId};
pub use repository::UserRepository;
pub use validation::{validate_email, validate_password, validate_username, UserValidationError};
