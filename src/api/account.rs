//! Account management endpoints

use axum::{
    extract::State,
    http::StatusCode,
    routing::{patch, post},
    Router,
};
use serde::Deserialize;
use tracing::debug;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::infrastructure::user::{SignUpRequest, UpdateAccountRequest};

/// Create the account router
pub fn create_account_router() -> Router<AppState> {
    Router::new()
        .route("/sign-up", post(sign_up))
        .route("/sign-out", post(sign_out))
        .route("/", patch(update_account))
}

/// Sign-up request body
#[derive(Debug, Deserialize)]
pub struct SignUpBody {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Account update request body; absent fields are left untouched
#[derive(Debug, Deserialize)]
pub struct UpdateAccountBody {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// POST /account/sign-up
pub async fn sign_up(
    State(state): State<AppState>,
    Json(body): Json<SignUpBody>,
) -> Result<StatusCode, ApiError> {
    debug!(username = %body.username, "Sign-up request");

    state
        .account_service
        .sign_up(SignUpRequest {
            username: body.username,
            email: body.email,
            password: body.password,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(StatusCode::CREATED)
}

/// POST /account/sign-out
pub async fn sign_out(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<StatusCode, ApiError> {
    debug!(user_id = %user.id(), "Sign-out request");

    state
        .account_service
        .sign_out(user.id())
        .await
        .map_err(ApiError::from)?;

    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /account/
pub async fn update_account(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(body): Json<UpdateAccountBody>,
) -> Result<StatusCode, ApiError> {
    debug!(user_id = %user.id(), "Account update request");

    state
        .account_service
        .update_account(
            user.id(),
            UpdateAccountRequest {
                username: body.username,
                email: body.email,
                password: body.password,
            },
        )
        .await
        .map_err(ApiError::from)?;

    Ok(StatusCode::NO_CONTENT)
}
