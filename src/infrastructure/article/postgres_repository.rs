//! PostgreSQL article repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::article::{Article, ArticleId, ArticlePage, ArticleRepository};
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// PostgreSQL implementation of ArticleRepository
#[derive(Debug, Clone)]
pub struct PostgresArticleRepository {
    pool: PgPool,
}

impl PostgresArticleRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ArticleRepository for PostgresArticleRepository {
    async fn create(&self, article: Article) -> Result<Article, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO articles (id, title, content, author_id, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(article.id().as_uuid())
        .bind(article.title())
        .bind(article.content())
        .bind(article.author_id().as_uuid())
        .bind(article.created_at())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create article: {}", e)))?;

        Ok(article)
    }

    async fn get(&self, id: ArticleId) -> Result<Option<Article>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, title, content, author_id, created_at
            FROM articles
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get article: {}", e)))?;

        Ok(row.map(|row| row_to_article(&row)))
    }

    async fn list(&self, page: ArticlePage) -> Result<Vec<Article>, DomainError> {
        // The order column comes from the ArticleOrder allow-list, never
        // from raw caller input
        let query = format!(
            r#"
            SELECT id, title, content, author_id, created_at
            FROM articles
            ORDER BY {}
            OFFSET $1 LIMIT $2
            "#,
            page.order.column()
        );

        let rows = sqlx::query(&query)
            .bind(page.offset as i64)
            .bind(page.limit as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list articles: {}", e)))?;

        Ok(rows.iter().map(row_to_article).collect())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM articles")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count articles: {}", e)))?;

        Ok(count as u64)
    }
}

fn row_to_article(row: &sqlx::postgres::PgRow) -> Article {
    let id: Uuid = row.get("id");
    let title: String = row.get("title");
    let content: String = row.get("content");
    let author_id: Uuid = row.get("author_id");
    let created_at: DateTime<Utc> = row.get("created_at");

    Article::from_parts(
        ArticleId::from(id),
        title,
        content,
        UserId::from(author_id),
        created_at,
    )
}
