//! JWT token generation and validation

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::domain::user::{User, UserId};
use crate::domain::DomainError;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Username
    pub username: String,
    /// Issued at timestamp (Unix epoch)
    pub iat: i64,
    /// Expiration timestamp (Unix epoch)
    pub exp: i64,
}

impl JwtClaims {
    /// Create new claims for a user
    pub fn new(user: &User, expiration_hours: u64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours as i64);

        Self {
            sub: user.id().to_string(),
            username: user.username().to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        }
    }

    /// Parse the user ID out of the subject claim
    pub fn user_id(&self) -> Result<UserId, DomainError> {
        UserId::parse(&self.sub)
    }
}

/// Configuration for JWT issuance
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Token expiration time in hours
    pub expiration_hours: u64,
}

impl JwtConfig {
    /// Create new JWT configuration
    pub fn new(secret: impl Into<String>, expiration_hours: u64) -> Self {
        Self {
            secret: secret.into(),
            expiration_hours,
        }
    }

    /// Configuration with a freshly generated random secret
    ///
    /// Tokens stop validating across restarts; fine for development,
    /// deployments should configure a stable secret.
    pub fn with_random_secret(expiration_hours: u64) -> Self {
        let secret: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(48)
            .map(char::from)
            .collect();

        Self {
            secret,
            expiration_hours,
        }
    }
}

/// Trait for token operations
pub trait TokenIssuer: Send + Sync + Debug {
    /// Generate a signed token for a user
    fn generate(&self, user: &User) -> Result<String, DomainError>;

    /// Validate a token and return the claims
    fn validate(&self, token: &str) -> Result<JwtClaims, DomainError>;

    /// Token lifetime in hours
    fn expiration_hours(&self) -> u64;
}

/// HMAC-secret JWT service
#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("expiration_hours", &self.config.expiration_hours)
            .field("secret", &"[hidden]")
            .finish()
    }
}

impl JwtService {
    /// Create a new JWT service with the given configuration
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }
}

impl TokenIssuer for JwtService {
    fn generate(&self, user: &User) -> Result<String, DomainError> {
        let claims = JwtClaims::new(user, self.config.expiration_hours);

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| DomainError::internal(format!("Failed to generate token: {}", e)))
    }

    fn validate(&self, token: &str) -> Result<JwtClaims, DomainError> {
        let validation = Validation::new(Algorithm::HS256);

        decode::<JwtClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| DomainError::credential(format!("Invalid token: {}", e)))
    }

    fn expiration_hours(&self) -> u64 {
        self.config.expiration_hours
    }
}
