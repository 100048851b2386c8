//! API error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Categories of API errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorType {
    InvalidRequestError,
    AuthenticationError,
    NotFoundError,
    ServerError,
}

impl std::fmt::Display for ApiErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequestError => write!(f, "invalid_request_error"),
            Self::AuthenticationError => write!(f, "authentication_error"),
            Self::NotFoundError => write!(f, "not_found_error"),
            Self::ServerError => write!(f, "server_error"),
        }
    }
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

/// Error detail structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: ApiErrorType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ApiErrorResponse,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status: StatusCode, error_type: ApiErrorType, message: impl Into<String>) -> Self {
        Self {
            status,
            response: ApiErrorResponse {
                error: ApiErrorDetail {
                    message: message.into(),
                    error_type,
                    param: None,
                },
            },
        }
    }

    /// Add parameter info
    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.response.error.param = Some(param.into());
        self
    }

    /// Bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            ApiErrorType::InvalidRequestError,
            message,
        )
    }

    /// Authentication error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            ApiErrorType::AuthenticationError,
            message,
        )
    }

    /// Not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, ApiErrorType::NotFoundError, message)
    }

    /// Internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiErrorType::ServerError,
            message,
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match &err {
            DomainError::NotFound { message } => Self::not_found(message),
            DomainError::Validation { message } => Self::bad_request(message),
            DomainError::InvalidId { message } => Self::bad_request(message).with_param("id"),
            // Duplicate username/email surfaces as a plain client error
            DomainError::Conflict { message } => Self::bad_request(message),
            DomainError::Credential { message } => Self::unauthorized(message),
            DomainError::Configuration { message } => Self::internal(message),
            DomainError::Storage { message } => Self::internal(message),
            DomainError::Internal { message } => Self::internal(message),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.response.error.error_type, self.response.error.message
        )
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_creation() {
        let err = ApiError::bad_request("Invalid article payload");
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            err.response.error.error_type,
            ApiErrorType::InvalidRequestError
        );
        assert_eq!(err.response.error.message, "Invalid article payload");
    }

    #[test]
    fn test_conflict_maps_to_bad_request() {
        let domain_err = DomainError::conflict("Username 'alice' is already taken");
        let api_err: ApiError = domain_err.into();

        assert_eq!(api_err.status, StatusCode::BAD_REQUEST);
        assert!(api_err.response.error.message.contains("alice"));
    }

    #[test]
    fn test_not_found_conversion() {
        let domain_err = DomainError::not_found("Article not found");
        let api_err: ApiError = domain_err.into();

        assert_eq!(api_err.status, StatusCode::NOT_FOUND);
        assert_eq!(api_err.response.error.error_type, ApiErrorType::NotFoundError);
    }

    #[test]
    fn test_credential_conversion() {
        let domain_err = DomainError::credential("Invalid token");
        let api_err: ApiError = domain_err.into();

        assert_eq!(api_err.status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_error_serialization() {
        let err = ApiError::unauthorized("Invalid credentials");
        let json = serde_json::to_string(&err.response).unwrap();

        assert!(json.contains("authentication_error"));
        assert!(json.contains("Invalid credentials"));
    }
}
