use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl Category {
    /// Canonical path for this category's detail view.
    pub fn url(&self) -> String {
        format!("/catalog/category/{}", self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub number_in_stock: i32,
    /// Ordered category references. Not enforced by the store; readers must
    /// tolerate entries that no longer resolve.
    pub categories: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Canonical path for this product's detail view.
    pub fn url(&self) -> String {
        format!("/catalog/product/{}", self.id)
    }
}
