use chrono::Utc;
use uuid::Uuid;

use crate::{
    dto::categories::{CategoryDraft, CategoryInput},
    error::AppResult,
    fetch::{DeleteFetch, delete_policy, join2, require_found},
    form::{TextRule, Violation},
    models::{Category, Product},
    state::AppState,
};

const NAME_RULE: TextRule = TextRule::new("name", "Name must be specified");
const DESCRIPTION_RULE: TextRule = TextRule::new("description", "Description must be specified");

/// Outcome of a category create/update submission.
#[derive(Debug)]
pub enum CategoryMutation {
    Saved(Category),
    Redisplay {
        draft: CategoryDraft,
        violations: Vec<Violation>,
    },
}

pub async fn list_categories(state: &AppState) -> AppResult<Vec<Category>> {
    Ok(state.store.list_categories().await?)
}

pub async fn category_detail(state: &AppState, id: Uuid) -> AppResult<(Category, Vec<Product>)> {
    let (category, products) = join2(
        state.store.find_category(id),
        state.store.products_in_category(id),
    )
    .await?;
    let category = require_found(category)?;
    Ok((category, products))
}

fn validate(input: &CategoryInput) -> (CategoryDraft, Vec<Violation>) {
    let mut violations = Vec::new();
    let draft = CategoryDraft {
        id: None,
        name: NAME_RULE.apply(&input.name, &mut violations),
        description: DESCRIPTION_RULE.apply(&input.description, &mut violations),
    };
    (draft, violations)
}

pub async fn create_category(
    state: &AppState,
    input: CategoryInput,
) -> AppResult<CategoryMutation> {
    let (draft, violations) = validate(&input);
    if !violations.is_empty() {
        return Ok(CategoryMutation::Redisplay { draft, violations });
    }

    let category = Category {
        id: Uuid::new_v4(),
        name: draft.name,
        description: draft.description,
        created_at: Utc::now(),
    };
    let category = state.store.insert_category(category).await?;
    Ok(CategoryMutation::Saved(category))
}

pub async fn update_form(state: &AppState, id: Uuid) -> AppResult<CategoryDraft> {
    let category = require_found(state.store.find_category(id).await?)?;
    Ok(CategoryDraft {
        id: Some(category.id),
        name: category.name,
        description: category.description,
    })
}

pub async fn update_category(
    state: &AppState,
    id: Uuid,
    input: CategoryInput,
) -> AppResult<CategoryMutation> {
    let (mut draft, violations) = validate(&input);
    draft.id = Some(id);
    if !violations.is_empty() {
        return Ok(CategoryMutation::Redisplay { draft, violations });
    }

    let existing = require_found(state.store.find_category(id).await?)?;
    // The identifier goes into the entity before persisting so the store
    // replaces this record instead of inserting a new one.
    let category = Category {
        id,
        name: draft.name,
        description: draft.description,
        created_at: existing.created_at,
    };
    let updated = require_found(state.store.update_category(id, category).await?)?;
    Ok(CategoryMutation::Saved(updated))
}

/// Shared aggregate fetch for both halves of the delete flow: the category
/// and its dependent products, read concurrently, folded through the delete
/// policy.
pub async fn delete_view(state: &AppState, id: Uuid) -> AppResult<DeleteFetch<Category, Product>> {
    let (category, products) = join2(
        state.store.find_category(id),
        state.store.products_in_category(id),
    )
    .await?;
    Ok(delete_policy(category, products))
}

pub async fn delete_category(
    state: &AppState,
    id: Uuid,
) -> AppResult<DeleteFetch<Category, Product>> {
    let outcome = delete_view(state, id).await?;
    if let DeleteFetch::Clear { .. } = &outcome {
        state.store.remove_category(id).await?;
    }
    Ok(outcome)
}
