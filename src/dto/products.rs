use uuid::Uuid;

use crate::form::{FormFields, MultiValue};
use crate::models::Category;

/// Raw product submission. Numbers stay text until validation; the category
/// field keeps its scalar-or-sequence shape until normalization.
#[derive(Debug, Clone, Default)]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub price: String,
    pub number_in_stock: String,
    pub category: MultiValue,
}

impl ProductInput {
    pub fn from_fields(fields: &FormFields) -> Self {
        Self {
            name: fields.value("name"),
            description: fields.value("description"),
            price: fields.value("price"),
            number_in_stock: fields.value("number_in_stock"),
            category: fields.multi("category"),
        }
    }
}

/// Sanitized product values for form prefill and redisplay.
#[derive(Debug, Clone, Default)]
pub struct ProductDraft {
    pub id: Option<Uuid>,
    pub name: String,
    pub description: String,
    pub price: String,
    pub number_in_stock: String,
    pub categories: Vec<Uuid>,
}

/// A category paired with whether the draft references it. Built fresh for
/// each redisplay instead of flagging the fetched entities themselves.
#[derive(Debug, Clone)]
pub struct CategoryOption {
    pub category: Category,
    pub checked: bool,
}

pub fn category_options(categories: Vec<Category>, selected: &[Uuid]) -> Vec<CategoryOption> {
    categories
        .into_iter()
        .map(|category| {
            let checked = selected.contains(&category.id);
            CategoryOption { category, checked }
        })
        .collect()
}
