//! Application state for shared services

use std::sync::Arc;

use crate::domain::article::{Article, ArticleId, ArticleRepository};
use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;
use crate::infrastructure::article::{
    ArticleListResult, ArticleService, CreateArticleRequest, ListArticlesRequest,
};
use crate::infrastructure::auth::TokenIssuer;
use crate::infrastructure::user::{
    AccountService, PasswordHasher, SignUpRequest, UpdateAccountRequest,
};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<dyn AccountServiceTrait>,
    pub article_service: Arc<dyn ArticleServiceTrait>,
    pub token_issuer: Arc<dyn TokenIssuer>,
}

/// Trait for account service operations
#[async_trait::async_trait]
pub trait AccountServiceTrait: Send + Sync {
    async fn sign_up(&self, request: SignUpRequest) -> Result<User, DomainError>;
    async fn sign_out(&self, user_id: UserId) -> Result<(), DomainError>;
    async fn update_account(
        &self,
        user_id: UserId,
        request: UpdateAccountRequest,
    ) -> Result<User, DomainError>;
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError>;
    async fn get_active(&self, user_id: UserId) -> Result<Option<User>, DomainError>;
}

/// Trait for article service operations
#[async_trait::async_trait]
pub trait ArticleServiceTrait: Send + Sync {
    async fn create(&self, request: CreateArticleRequest) -> Result<Article, DomainError>;
    async fn list(&self, request: ListArticlesRequest) -> Result<ArticleListResult, DomainError>;
    async fn get(&self, id: ArticleId) -> Result<Option<Article>, DomainError>;
}

// Implement traits for the actual services

#[async_trait::async_trait]
impl<R, H> AccountServiceTrait for AccountService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn sign_up(&self, request: SignUpRequest) -> Result<User, DomainError> {
        AccountService::sign_up(self, request).await
    }

    async fn sign_out(&self, user_id: UserId) -> Result<(), DomainError> {
        AccountService::sign_out(self, user_id).await
    }

    async fn update_account(
        &self,
        user_id: UserId,
        request: UpdateAccountRequest,
    ) -> Result<User, DomainError> {
        AccountService::update_account(self, user_id, request).await
    }

    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError> {
        AccountService::authenticate(self, username, password).await
    }

    async fn get_active(&self, user_id: UserId) -> Result<Option<User>, DomainError> {
        AccountService::get_active(self, user_id).await
    }
}

#[async_trait::async_trait]
impl<R> ArticleServiceTrait for ArticleService<R>
where
    R: ArticleRepository,
{
    async fn create(&self, request: CreateArticleRequest) -> Result<Article, DomainError> {
        ArticleService::create(self, request).await
    }

    async fn list(&self, request: ListArticlesRequest) -> Result<ArticleListResult, DomainError> {
        ArticleService::list(self, request).await
    }

    async fn get(&self, id: ArticleId) -> Result<Option<Article>, DomainError> {
        ArticleService::get(self, id).await
    }
}
