//! In-memory article repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::article::{Article, ArticleId, ArticleOrder, ArticlePage, ArticleRepository};
use crate::domain::DomainError;

/// In-memory implementation of ArticleRepository
#[derive(Debug, Default)]
pub struct InMemoryArticleRepository {
    articles: Arc<RwLock<HashMap<ArticleId, Article>>>,
}

impl InMemoryArticleRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ArticleRepository for InMemoryArticleRepository {
    async fn create(&self, article: Article) -> Result<Article, DomainError> {
        let mut articles = self.articles.write().await;

        if articles.contains_key(&article.id()) {
            return Err(DomainError::conflict(format!(
                "Article with ID '{}' already exists",
                article.id()
            )));
        }

        articles.insert(article.id(), article.clone());

        Ok(article)
    }

    async fn get(&self, id: ArticleId) -> Result<Option<Article>, DomainError> {
        let articles = self.articles.read().await;
        Ok(articles.get(&id).cloned())
    }

    async fn list(&self, page: ArticlePage) -> Result<Vec<Article>, DomainError> {
        let articles = self.articles.read().await;

        let mut result: Vec<Article> = articles.values().cloned().collect();

        match page.order {
            ArticleOrder::CreatedAt => result.sort_by_key(Article::created_at),
            ArticleOrder::Title => result.sort_by(|a, b| a.title().cmp(b.title())),
        }

        Ok(result
            .into_iter()
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .collect())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let articles = self.articles.read().await;
        Ok(articles.len() as u64)
    }
}
