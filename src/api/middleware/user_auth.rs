//! User authentication middleware using JWT bearer tokens

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::user::User;

/// Extractor that requires a valid bearer token for an active account
///
/// Extracts the JWT from the `Authorization: Bearer <token>` header,
/// validates it, and resolves the active user it identifies. Signed-out
/// accounts are rejected even when their token has not expired yet.
#[derive(Debug, Clone)]
pub struct RequireUser(pub User);

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_bearer_token(&parts.headers)?;

        debug!("Validating bearer token");

        let claims = state.token_issuer.validate(&token).map_err(ApiError::from)?;

        let user_id = claims.user_id().map_err(ApiError::from)?;

        let user = state
            .account_service
            .get_active(user_id)
            .await
            .map_err(ApiError::from)?
            .ok_or_else(|| ApiError::unauthorized("Account not found or signed out"))?;

        Ok(RequireUser(user))
    }
}

/// Extract the bearer token from the Authorization header
pub fn extract_bearer_token(headers: &axum::http::HeaderMap) -> Result<String, ApiError> {
    if let Some(auth_header) = headers.get(header::AUTHORIZATION) {
        let auth_str = auth_header
            .to_str()
            .map_err(|_| ApiError::bad_request("Invalid Authorization header encoding"))?;

        if let Some(token) = auth_str.strip_prefix("Bearer ") {
            return Ok(token.trim().to_string());
        }
    }

    Err(ApiError::unauthorized(
        "Authentication required. Provide a token via 'Authorization: Bearer <token>' header",
    ))
}
