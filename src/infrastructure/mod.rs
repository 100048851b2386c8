//! Infrastructure layer - Adapters and service implementations

pub mod article;
pub mod auth;
pub mod logging;
pub mod user;
