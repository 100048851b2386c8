//! Domain layer - Core business entities and ports

pub mod article;
pub mod error;
pub mod user;

pub use article::{Article, ArticleId, ArticleOrder, ArticlePage, ArticleRepository};
pub use error::DomainError;
pub use user::{AccountLifecycle, User, UserId, UserRepository};
