//! Article entity and listing types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Article identifier - opaque UUID, assigned at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleId(Uuid);

impl ArticleId {
    /// Generate a fresh identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier from its string form
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| DomainError::invalid_id(format!("'{}' is not a valid article id", s)))
    }

    /// Get the inner UUID value
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for ArticleId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ArticleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Article entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    /// Unique identifier
    id: ArticleId,
    title: String,
    content: String,
    /// Back-reference to the author, not an ownership claim
    author_id: UserId,
    /// Creation timestamp, default sort key for listings
    created_at: DateTime<Utc>,
}

impl Article {
    /// Create a new article
    pub fn new(
        id: ArticleId,
        title: impl Into<String>,
        content: impl Into<String>,
        author_id: UserId,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            author_id,
            created_at: Utc::now(),
        }
    }

    /// Rehydrate an article from stored fields
    ///
    /// For persistence adapters only.
    pub(crate) fn from_parts(
        id: ArticleId,
        title: String,
        content: String,
        author_id: UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            content,
            author_id,
            created_at,
        }
    }

    pub fn id(&self) -> ArticleId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn author_id(&self) -> UserId {
        self.author_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Sort field for article listings
///
/// Allow-list rather than passthrough: an unsupported field name is a
/// validation error, never forwarded to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArticleOrder {
    #[default]
    CreatedAt,
    Title,
}

impl ArticleOrder {
    /// Column name used by SQL adapters
    pub fn column(&self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::Title => "title",
        }
    }
}

impl FromStr for ArticleOrder {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created_at" => Ok(Self::CreatedAt),
            "title" => Ok(Self::Title),
            other => Err(DomainError::validation(format!(
                "Unsupported order_by field '{}'. Allowed: created_at, title",
                other
            ))),
        }
    }
}

/// Page parameters for article listings
#[derive(Debug, Clone, Copy)]
pub struct ArticlePage {
    /// Number of articles to skip
    pub offset: u64,
    /// Maximum number of articles to return
    pub limit: u64,
    /// Sort field
    pub order: ArticleOrder,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_creation() {
        let author = UserId::generate();
        let article = Article::new(ArticleId::generate(), "Title", "Content", author);

        assert_eq!(article.title(), "Title");
        assert_eq!(article.content(), "Content");
        assert_eq!(article.author_id(), author);
    }

    #[test]
    fn test_article_ids_are_distinct() {
        assert_ne!(ArticleId::generate(), ArticleId::generate());
    }

    #[test]
    fn test_article_id_parse_invalid() {
        assert!(ArticleId::parse("nope").is_err());
    }

    #[test]
    fn test_order_from_str() {
        assert_eq!("created_at".parse::<ArticleOrder>().unwrap(), ArticleOrder::CreatedAt);
        assert_eq!("title".parse::<ArticleOrder>().unwrap(), ArticleOrder::Title);
    }

    #[test]
    fn test_order_from_str_rejects_unknown_field() {
        let err = "author_id; DROP TABLE articles".parse::<ArticleOrder>();
        assert!(err.is_err());
    }

    #[test]
    fn test_order_default() {
        assert_eq!(ArticleOrder::default(), ArticleOrder::CreatedAt);
    }
}
