//! Article endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::article::{Article, ArticleId};
use crate::infrastructure::article::{CreateArticleRequest, ListArticlesRequest};

/// Create the article router
pub fn create_article_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_article).get(read_articles))
        .route("/{id}", get(read_article_by_id))
}

/// Article creation request body
#[derive(Debug, Deserialize)]
pub struct CreateArticleBody {
    pub title: String,
    pub content: String,
}

/// Listing query parameters
#[derive(Debug, Deserialize)]
pub struct ReadArticlesQuery {
    pub offset: u64,
    pub limit: u64,
    #[serde(default)]
    pub order_by: Option<String>,
}

/// Article payload
#[derive(Debug, Serialize)]
pub struct ArticleResponse {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author_id: Uuid,
    pub created_at: String,
}

impl From<&Article> for ArticleResponse {
    fn from(article: &Article) -> Self {
        Self {
            id: article.id().as_uuid(),
            title: article.title().to_string(),
            content: article.content().to_string(),
            author_id: article.author_id().as_uuid(),
            created_at: article.created_at().to_rfc3339(),
        }
    }
}

/// List payload
#[derive(Debug, Serialize)]
pub struct ReadArticleListResponse {
    pub articles: Vec<ArticleResponse>,
    pub total: u64,
}

/// POST /article/
///
/// The author is the authenticated caller, never part of the body.
pub async fn create_article(
    State(state): State<AppState>,
    RequireUser(author): RequireUser,
    Json(body): Json<CreateArticleBody>,
) -> Result<StatusCode, ApiError> {
    debug!(author_id = %author.id(), title = %body.title, "Creating article");

    state
        .article_service
        .create(CreateArticleRequest {
            title: body.title,
            content: body.content,
            author_id: author.id(),
        })
        .await
        .map_err(ApiError::from)?;

    Ok(StatusCode::CREATED)
}

/// GET /article/?offset=&limit=&order_by=
pub async fn read_articles(
    State(state): State<AppState>,
    Query(query): Query<ReadArticlesQuery>,
) -> Result<Json<ReadArticleListResponse>, ApiError> {
    let result = state
        .article_service
        .list(ListArticlesRequest {
            offset: query.offset,
            limit: query.limit,
            order_by: query.order_by,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Json(ReadArticleListResponse {
        articles: result.articles.iter().map(ArticleResponse::from).collect(),
        total: result.total,
    }))
}

/// GET /article/{id}
pub async fn read_article_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ArticleResponse>, ApiError> {
    let article_id = ArticleId::parse(&id).map_err(ApiError::from)?;

    let article = state
        .article_service
        .get(article_id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found(format!("The article of id {} doesn't exist", id)))?;

    Ok(Json(ArticleResponse::from(&article)))
}
