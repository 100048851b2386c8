//! Article repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{Article, ArticleId, ArticlePage};
use crate::domain::DomainError;

/// Repository trait for article storage
#[async_trait]
pub trait ArticleRepository: Send + Sync + Debug {
    /// Create a new article
    async fn create(&self, article: Article) -> Result<Article, DomainError>;

    /// Get an article by ID
    async fn get(&self, id: ArticleId) -> Result<Option<Article>, DomainError>;

    /// List a page of articles sorted by the page's order field
    async fn list(&self, page: ArticlePage) -> Result<Vec<Article>, DomainError>;

    /// Count all articles
    async fn count(&self) -> Result<u64, DomainError>;
}
