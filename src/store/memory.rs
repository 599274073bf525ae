use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Category, Product};

use super::{CatalogStore, StoreError, StoreResult};

/// In-memory store for callers that need the full persist path without a
/// database, the integration tests foremost.
#[derive(Default)]
pub struct MemStore {
    categories: RwLock<HashMap<Uuid, Category>>,
    products: RwLock<HashMap<Uuid, Product>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> StoreError {
    StoreError::Unavailable("store lock poisoned".to_string())
}

#[async_trait]
impl CatalogStore for MemStore {
    async fn find_category(&self, key: Uuid) -> StoreResult<Option<Category>> {
        let categories = self.categories.read().map_err(poisoned)?;
        Ok(categories.get(&key).cloned())
    }

    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        let categories = self.categories.read().map_err(poisoned)?;
        let mut all: Vec<Category> = categories.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn count_categories(&self) -> StoreResult<i64> {
        let categories = self.categories.read().map_err(poisoned)?;
        Ok(categories.len() as i64)
    }

    async fn insert_category(&self, category: Category) -> StoreResult<Category> {
        let mut categories = self.categories.write().map_err(poisoned)?;
        categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn update_category(
        &self,
        key: Uuid,
        category: Category,
    ) -> StoreResult<Option<Category>> {
        let mut categories = self.categories.write().map_err(poisoned)?;
        if !categories.contains_key(&key) {
            return Ok(None);
        }
        categories.insert(key, category.clone());
        Ok(Some(category))
    }

    async fn remove_category(&self, key: Uuid) -> StoreResult<()> {
        let mut categories = self.categories.write().map_err(poisoned)?;
        categories.remove(&key);
        Ok(())
    }

    async fn find_product(&self, key: Uuid) -> StoreResult<Option<Product>> {
        let products = self.products.read().map_err(poisoned)?;
        Ok(products.get(&key).cloned())
    }

    async fn list_products(&self) -> StoreResult<Vec<Product>> {
        let products = self.products.read().map_err(poisoned)?;
        let mut all: Vec<Product> = products.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn products_in_category(&self, category: Uuid) -> StoreResult<Vec<Product>> {
        let products = self.products.read().map_err(poisoned)?;
        let mut matching: Vec<Product> = products
            .values()
            .filter(|p| p.categories.contains(&category))
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(matching)
    }

    async fn count_products(&self) -> StoreResult<i64> {
        let products = self.products.read().map_err(poisoned)?;
        Ok(products.len() as i64)
    }

    async fn insert_product(&self, product: Product) -> StoreResult<Product> {
        let mut products = self.products.write().map_err(poisoned)?;
        products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn update_product(&self, key: Uuid, product: Product) -> StoreResult<Option<Product>> {
        let mut products = self.products.write().map_err(poisoned)?;
        if !products.contains_key(&key) {
            return Ok(None);
        }
        products.insert(key, product.clone());
        Ok(Some(product))
    }

    async fn remove_product(&self, key: Uuid) -> StoreResult<()> {
        let mut products = self.products.write().map_err(poisoned)?;
        products.remove(&key);
        Ok(())
    }
}
