use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use super::account;
use super::article;
use super::auth;
use super::health;
use super::state::AppState;

/// Create the full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        // Authentication (no auth required for sign-in)
        .nest("/auth", auth::create_auth_router())
        // Account management
        .nest("/account", account::create_account_router())
        // Articles
        .nest("/article", article::create_article_router())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
