//! Article domain

mod entity;
mod repository;

pub use entity::{Article, ArticleId, ArticleOrder, ArticlePage};
pub use repository::ArticleRepository;
