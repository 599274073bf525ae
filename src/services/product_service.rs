use chrono::Utc;
use uuid::Uuid;

use crate::{
    dto::products::{CategoryOption, ProductDraft, ProductInput, category_options},
    error::AppResult,
    fetch::{join2, require_found},
    form::{IntegerRule, NumberRule, ReferenceRule, TextRule, Violation},
    models::{Category, Product},
    state::AppState,
};

const NAME_RULE: TextRule = TextRule::new("name", "Name must be specified");
const DESCRIPTION_RULE: TextRule = TextRule::new("description", "Description must be specified");
const PRICE_RULE: NumberRule = NumberRule::new("price", "Price must be a non-negative number");
const STOCK_RULE: IntegerRule = IntegerRule::new(
    "number_in_stock",
    "Number in stock must be a non-negative integer",
);
const CATEGORY_RULE: ReferenceRule = ReferenceRule::new("category", "Invalid category reference");

/// Outcome of a product create/update submission.
#[derive(Debug)]
pub enum ProductMutation {
    Saved(Product),
    Redisplay {
        draft: ProductDraft,
        violations: Vec<Violation>,
        options: Vec<CategoryOption>,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct IndexCounts {
    pub products: i64,
    pub categories: i64,
}

pub async fn catalog_counts(state: &AppState) -> AppResult<IndexCounts> {
    let (products, categories) = join2(
        state.store.count_products(),
        state.store.count_categories(),
    )
    .await?;
    Ok(IndexCounts {
        products,
        categories,
    })
}

pub async fn list_products(state: &AppState) -> AppResult<Vec<Product>> {
    Ok(state.store.list_products().await?)
}

/// Product plus its resolved categories, in reference order. References
/// that no longer resolve are skipped rather than failing the view.
pub async fn product_detail(state: &AppState, id: Uuid) -> AppResult<(Product, Vec<Category>)> {
    let (product, categories) = join2(
        state.store.find_product(id),
        state.store.list_categories(),
    )
    .await?;
    let product = require_found(product)?;
    let resolved = product
        .categories
        .iter()
        .filter_map(|id| categories.iter().find(|c| c.id == *id).cloned())
        .collect();
    Ok((product, resolved))
}

pub async fn create_form(state: &AppState) -> AppResult<Vec<CategoryOption>> {
    let categories = state.store.list_categories().await?;
    Ok(category_options(categories, &[]))
}

fn validate(input: &ProductInput) -> (ProductDraft, Vec<Violation>, Option<(f64, i32)>) {
    let mut violations = Vec::new();
    let name = NAME_RULE.apply(&input.name, &mut violations);
    let description = DESCRIPTION_RULE.apply(&input.description, &mut violations);
    let (price_text, price) = PRICE_RULE.apply(&input.price, &mut violations);
    let (stock_text, stock) = STOCK_RULE.apply(&input.number_in_stock, &mut violations);
    // Normalize the scalar-or-sequence field before its rule runs.
    let categories = CATEGORY_RULE.apply(input.category.clone().normalize(), &mut violations);

    let draft = ProductDraft {
        id: None,
        name,
        description,
        price: price_text,
        number_in_stock: stock_text,
        categories,
    };
    let parsed = match (price, stock) {
        (Some(price), Some(stock)) => Some((price, stock)),
        _ => None,
    };
    (draft, violations, parsed)
}

pub async fn create_product(state: &AppState, input: ProductInput) -> AppResult<ProductMutation> {
    let (draft, violations, parsed) = validate(&input);
    match parsed {
        Some((price, number_in_stock)) if violations.is_empty() => {
            let product = Product {
                id: Uuid::new_v4(),
                name: draft.name,
                description: draft.description,
                price,
                number_in_stock,
                categories: draft.categories,
                created_at: Utc::now(),
            };
            let product = state.store.insert_product(product).await?;
            Ok(ProductMutation::Saved(product))
        }
        _ => {
            // Rejected submissions still need the full category list so the
            // form can re-check what was selected.
            let categories = state.store.list_categories().await?;
            let options = category_options(categories, &draft.categories);
            Ok(ProductMutation::Redisplay {
                draft,
                violations,
                options,
            })
        }
    }
}

pub async fn update_form(
    state: &AppState,
    id: Uuid,
) -> AppResult<(ProductDraft, Vec<CategoryOption>)> {
    let (product, categories) = join2(
        state.store.find_product(id),
        state.store.list_categories(),
    )
    .await?;
    let product = require_found(product)?;
    let draft = ProductDraft {
        id: Some(product.id),
        name: product.name,
        description: product.description,
        price: product.price.to_string(),
        number_in_stock: product.number_in_stock.to_string(),
        categories: product.categories,
    };
    let options = category_options(categories, &draft.categories);
    Ok((draft, options))
}

pub async fn update_product(
    state: &AppState,
    id: Uuid,
    input: ProductInput,
) -> AppResult<ProductMutation> {
    let (mut draft, violations, parsed) = validate(&input);
    draft.id = Some(id);
    match parsed {
        Some((price, number_in_stock)) if violations.is_empty() => {
            let existing = require_found(state.store.find_product(id).await?)?;
            // The identifier goes into the entity before persisting so the
            // store replaces this record instead of inserting a new one.
            let product = Product {
                id,
                name: draft.name,
                description: draft.description,
                price,
                number_in_stock,
                categories: draft.categories,
                created_at: existing.created_at,
            };
            let updated = require_found(state.store.update_product(id, product).await?)?;
            Ok(ProductMutation::Saved(updated))
        }
        _ => {
            let categories = state.store.list_categories().await?;
            let options = category_options(categories, &draft.categories);
            Ok(ProductMutation::Redisplay {
                draft,
                violations,
                options,
            })
        }
    }
}

/// Products have no dependents, so the delete view only needs presence:
/// absent means already deleted and the handler redirects.
pub async fn delete_view(state: &AppState, id: Uuid) -> AppResult<Option<Product>> {
    Ok(state.store.find_product(id).await?)
}

pub async fn delete_product(state: &AppState, id: Uuid) -> AppResult<()> {
    state.store.remove_product(id).await?;
    Ok(())
}
