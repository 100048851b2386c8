//! User field validation

use thiserror::Error;

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("Username cannot be empty")]
    EmptyUsername,

    #[error("Username exceeds maximum length of {0} characters")]
    UsernameTooLong(usize),

    #[error("Username is too short. Minimum length is {0} characters")]
    UsernameTooShort(usize),

    #[error("Username contains invalid character: '{0}'. Only alphanumeric characters, underscores, and hyphens are allowed")]
    InvalidUsernameCharacter(char),

    #[error("Email cannot be empty")]
    EmptyEmail,

    #[error("Email exceeds maximum length of {0} characters")]
    EmailTooLong(usize),

    #[error("Email must contain a local part and a domain separated by '@'")]
    MalformedEmail,

    #[error("Password is too short. Minimum length is {0} characters")]
    PasswordTooShort(usize),

    #[error("Password exceeds maximum length of {0} characters")]
    PasswordTooLong(usize),
}

const MIN_USERNAME_LENGTH: usize = 3;
const MAX_USERNAME_LENGTH: usize = 50;
const MAX_EMAIL_LENGTH: usize = 254;
const MIN_PASSWORD_LENGTH: usize = 8;
const MAX_PASSWORD_LENGTH: usize = 128;

/// Validate a username
///
/// Rules:
/// - Cannot be empty
/// - Minimum 3 characters
/// - Maximum 50 characters
/// - Only alphanumeric characters, underscores, and hyphens
pub fn validate_username(username: &str) -> Result<(), UserValidationError> {
    if username.is_empty() {
        return Err(UserValidationError::EmptyUsername);
    }

    if username.len() < MIN_USERNAME_LENGTH {
        return Err(UserValidationError::UsernameTooShort(MIN_USERNAME_LENGTH));
    }

    if username.len() > MAX_USERNAME_LENGTH {
        return Err(UserValidationError::UsernameTooLong(MAX_USERNAME_LENGTH));
    }

    for c in username.chars() {
        if !c.is_ascii_alphanumeric() && c != '_' && c != '-' {
            return Err(UserValidationError::InvalidUsernameCharacter(c));
        }
    }

    Ok(())
}

/// Validate an email address
///
/// Rules:
/// - Cannot be empty
/// - Maximum 254 characters
/// - Must have a non-empty local part and domain around a single '@'
///
/// Deliverability is the mail server's problem; this only rejects values
/// that cannot possibly be an address.
pub fn validate_email(email: &str) -> Result<(), UserValidationError> {
    if email.is_empty() {
        return Err(UserValidationError::EmptyEmail);
    }

    if email.len() > MAX_EMAIL_LENGTH {
        return Err(UserValidationError::EmailTooLong(MAX_EMAIL_LENGTH));
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Err(UserValidationError::MalformedEmail);
    };

    if local.is_empty() || domain.is_empty() || domain.contains('@') || !domain.contains('.') {
        return Err(UserValidationError::MalformedEmail);
    }

    Ok(())
}

/// Validate a password
///
/// Rules:
/// - Minimum 8 characters
/// - Maximum 128 characters
pub fn validate_password(password: &str) -> Result<(), UserValidationError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(UserValidationError::PasswordTooShort(MIN_PASSWORD_LENGTH));
    }

    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(UserValidationError::PasswordTooLong(MAX_PASSWORD_LENGTH));
    }

    Ok(())
}
