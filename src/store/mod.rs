use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Category, Product};

pub mod memory;
pub mod postgres;

pub use memory::MemStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("database error")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Typed client for the two catalog collections.
///
/// Every call is fallible and may suspend; callers issue their own retries
/// (this crate never does) and the store owns per-document atomicity.
/// List methods sort by name ascending so every backend agrees on view
/// order. `update_*` returns `None` when the key does not exist; removal of
/// an absent key is a success.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn find_category(&self, key: Uuid) -> StoreResult<Option<Category>>;
    async fn list_categories(&self) -> StoreResult<Vec<Category>>;
    async fn count_categories(&self) -> StoreResult<i64>;
    async fn insert_category(&self, category: Category) -> StoreResult<Category>;
    async fn update_category(&self, key: Uuid, category: Category)
    -> StoreResult<Option<Category>>;
    async fn remove_category(&self, key: Uuid) -> StoreResult<()>;

    async fn find_product(&self, key: Uuid) -> StoreResult<Option<Product>>;
    async fn list_products(&self) -> StoreResult<Vec<Product>>;
    async fn products_in_category(&self, category: Uuid) -> StoreResult<Vec<Product>>;
    async fn count_products(&self) -> StoreResult<i64>;
    async fn insert_product(&self, product: Product) -> StoreResult<Product>;
    async fn update_product(&self, key: Uuid, product: Product) -> StoreResult<Option<Product>>;
    async fn remove_product(&self, key: Uuid) -> StoreResult<()>;
}
