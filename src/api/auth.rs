//! Authentication endpoints

use axum::{extract::State, routing::post, Router};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};

/// Create the authentication router
pub fn create_auth_router() -> Router<AppState> {
    Router::new().route("/sign-in", post(sign_in))
}

/// Sign-in request
#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub username: String,
    pub password: String,
}

/// Sign-in response carrying the bearer token
#[derive(Debug, Serialize)]
pub struct SignInResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// POST /auth/sign-in
pub async fn sign_in(
    State(state): State<AppState>,
    Json(request): Json<SignInRequest>,
) -> Result<Json<SignInResponse>, ApiError> {
    debug!(username = %request.username, "Sign-in attempt");

    let user = state
        .account_service
        .authenticate(&request.username, &request.password)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::unauthorized("Invalid username or password"))?;

    let access_token = state.token_issuer.generate(&user).map_err(ApiError::from)?;

    Ok(Json(SignInResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: state.token_issuer.expiration_hours() * 3600,
    }))
}
