//! Article infrastructure - article service and repositories

mod postgres_repository;
mod repository;
mod service;

pub use postgres_repository::PostgresArticleRepository;
pub use repository::InMemoryArticleRepository;
pub use service::{ArticleListResult, ArticleService, CreateArticleRequest, ListArticlesRequest};
