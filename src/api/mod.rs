//! API collaborator ports.
//!
//! The store never talks to a transport directly. Each domain gets an async
//! trait; the store holds them behind `Arc<dyn ...>` so the stubbed
//! [`MockApi`] and any real client are interchangeable.

mod mock;
mod types;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::entities::{Banner, Category, Material, User};

pub use mock::{Endpoint, MockApi, MockLatency};
pub use types::{
    BookmarkToggled, FiltersPatch, MaterialQuery, MaterialsPage, ProgressUpdated, SearchFilters,
    SortBy, SortOrder,
};

/// Failure reported by an API collaborator.
///
/// The `Display` text is what ends up in a slice's `error` field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Email '{0}' is already registered")]
    EmailTaken(String),

    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    /// Free-form rejection reason from the server.
    #[error("{0}")]
    Rejected(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> ApiResult<User>;

    async fn register(&self, email: &str, password: &str, name: &str) -> ApiResult<User>;
}

#[async_trait]
pub trait CategoriesApi: Send + Sync {
    async fn get_categories(&self) -> ApiResult<Vec<Category>>;

    async fn search_categories(&self, query: &str) -> ApiResult<Vec<Category>>;
}

#[async_trait]
pub trait MaterialsApi: Send + Sync {
    /// One page of the general material list.
    async fn get_materials(&self, query: &MaterialQuery) -> ApiResult<MaterialsPage>;

    async fn get_material(&self, id: &str) -> ApiResult<Material>;

    async fn search_materials(
        &self,
        query: &str,
        filters: &SearchFilters,
    ) -> ApiResult<MaterialsPage>;

    async fn get_recent_materials(&self, limit: u32) -> ApiResult<Vec<Material>>;

    async fn get_popular_materials(&self, limit: u32) -> ApiResult<Vec<Material>>;

    async fn get_bookmarked_materials(&self) -> ApiResult<Vec<Material>>;

    /// Flips the bookmark server-side and returns the resulting flag.
    async fn toggle_bookmark(&self, id: &str) -> ApiResult<BookmarkToggled>;

    async fn update_progress(&self, id: &str, progress: u8) -> ApiResult<ProgressUpdated>;

    async fn increment_views(&self, id: &str) -> ApiResult<()>;
}

#[async_trait]
pub trait BannersApi: Send + Sync {
    async fn get_banners(&self) -> ApiResult<Vec<Banner>>;

    async fn track_impression(&self, id: &str) -> ApiResult<()>;

    async fn track_click(&self, id: &str) -> ApiResult<()>;
}

/// The full set of ports a [`Store`](crate::store::Store) is built with.
#[derive(Clone)]
pub struct ApiClients {
    pub auth: Arc<dyn AuthApi>,
    pub categories: Arc<dyn CategoriesApi>,
    pub materials: Arc<dyn MaterialsApi>,
    pub banners: Arc<dyn BannersApi>,
}

impl ApiClients {
    /// Use one object for every domain.
    pub fn from_shared<T>(api: Arc<T>) -> Self
    where
        T: AuthApi + CategoriesApi + MaterialsApi + BannersApi + 'static,
    {
        Self {
            auth: api.clone(),
            categories: api.clone(),
            materials: api.clone(),
            banners: api,
        }
    }
}
