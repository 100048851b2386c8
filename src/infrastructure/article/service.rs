//! Article service for create and read use cases

use std::sync::Arc;

use tracing::debug;

use crate::domain::article::{Article, ArticleId, ArticleOrder, ArticlePage, ArticleRepository};
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Request for creating an article
#[derive(Debug, Clone)]
pub struct CreateArticleRequest {
    pub title: String,
    pub content: String,
    pub author_id: UserId,
}

/// Request for listing a page of articles
#[derive(Debug, Clone)]
pub struct ListArticlesRequest {
    pub offset: u64,
    pub limit: u64,
    /// Sort field name; `None` falls back to creation time
    pub order_by: Option<String>,
}

/// A page of articles plus the total number stored
#[derive(Debug, Clone)]
pub struct ArticleListResult {
    pub articles: Vec<Article>,
    pub total: u64,
}

/// Article service
///
/// Creation is an unconditional insert; required-field presence is the
/// request layer's concern. Reads either page through the store or fetch
/// by id, with a miss reported as `None` rather than an error.
#[derive(Debug)]
pub struct ArticleService<R: ArticleRepository> {
    repository: Arc<R>,
}

impl<R: ArticleRepository> ArticleService<R> {
    /// Create a new article service
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Create an article
    pub async fn create(&self, request: CreateArticleRequest) -> Result<Article, DomainError> {
        let article = Article::new(
            ArticleId::generate(),
            request.title,
            request.content,
            request.author_id,
        );

        debug!(article_id = %article.id(), author_id = %article.author_id(), "Creating article");

        self.repository.create(article).await
    }

    /// List a page of articles sorted by the requested field
    pub async fn list(&self, request: ListArticlesRequest) -> Result<ArticleListResult, DomainError> {
        let order = match request.order_by.as_deref() {
            Some(field) => field.parse::<ArticleOrder>()?,
            None => ArticleOrder::default(),
        };

        let page = ArticlePage {
            offset: request.offset,
            limit: request.limit,
            order,
        };

        let articles = self.repository.list(page).await?;
        let total = self.repository.count().await?;

        Ok(ArticleListResult { articles, total })
    }

    /// Get an article by ID
    pub async fn get(&self, id: ArticleId) -> Result<Option<Article>, DomainError> {
        self.repository.get(id).await
    }
}
