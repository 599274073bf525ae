use async_trait::async_trait;
use uuid::Uuid;

use crate::db::DbPool;
use crate::models::{Category, Product};

use super::{CatalogStore, StoreResult};

/// Postgres-backed store. Category references live in a `uuid[]` column with
/// no foreign key, so writes never fail on a dangling reference.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for PgStore {
    async fn find_category(&self, key: Uuid) -> StoreResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(category)
    }

    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(categories)
    }

    async fn count_categories(&self) -> StoreResult<i64> {
        let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await?;
        Ok(total.0)
    }

    async fn insert_category(&self, category: Category) -> StoreResult<Category> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (id, name, description, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(category.id)
        .bind(category.name)
        .bind(category.description)
        .bind(category.created_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(category)
    }

    async fn update_category(
        &self,
        key: Uuid,
        category: Category,
    ) -> StoreResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET name = $2, description = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(key)
        .bind(category.name)
        .bind(category.description)
        .fetch_optional(&self.pool)
        .await?;
        Ok(category)
    }

    async fn remove_category(&self, key: Uuid) -> StoreResult<()> {
        sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find_product(&self, key: Uuid) -> StoreResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(product)
    }

    async fn list_products(&self) -> StoreResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>("SELECT * FROM products ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(products)
    }

    async fn products_in_category(&self, category: Uuid) -> StoreResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE $1 = ANY(categories) ORDER BY name",
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    async fn count_products(&self) -> StoreResult<i64> {
        let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;
        Ok(total.0)
    }

    async fn insert_product(&self, product: Product) -> StoreResult<Product> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (id, name, description, price, number_in_stock, categories, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(product.id)
        .bind(product.name)
        .bind(product.description)
        .bind(product.price)
        .bind(product.number_in_stock)
        .bind(product.categories)
        .bind(product.created_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(product)
    }

    async fn update_product(&self, key: Uuid, product: Product) -> StoreResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name = $2, description = $3, price = $4, number_in_stock = $5, categories = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(key)
        .bind(product.name)
        .bind(product.description)
        .bind(product.price)
        .bind(product.number_in_stock)
        .bind(product.categories)
        .fetch_optional(&self.pool)
        .await?;
        Ok(product)
    }

    async fn remove_product(&self, key: Uuid) -> StoreResult<()> {
        sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
