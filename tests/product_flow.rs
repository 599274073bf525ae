use std::sync::Arc;

use uuid::Uuid;

use axum_inventory_catalog::{
    dto::{categories::CategoryInput, products::ProductInput},
    error::AppError,
    form::MultiValue,
    models::{Category, Product},
    services::{
        category_service::{self, CategoryMutation},
        product_service::{self, ProductMutation},
    },
    state::AppState,
    store::{CatalogStore, MemStore},
};

fn mem_state() -> AppState {
    AppState::new(Arc::new(MemStore::new()))
}

async fn saved_category(state: &AppState, name: &str) -> Category {
    let input = CategoryInput {
        name: name.to_string(),
        description: "Generic Text".to_string(),
    };
    match category_service::create_category(state, input).await.unwrap() {
        CategoryMutation::Saved(category) => category,
        other => panic!("expected a saved category, got {other:?}"),
    }
}

fn product_input(name: &str, category: MultiValue) -> ProductInput {
    ProductInput {
        name: name.to_string(),
        description: "Freshly baked bread".to_string(),
        price: "1.50".to_string(),
        number_in_stock: "40".to_string(),
        category,
    }
}

async fn saved_product(state: &AppState, input: ProductInput) -> Product {
    match product_service::create_product(state, input).await.unwrap() {
        ProductMutation::Saved(product) => product,
        other => panic!("expected a saved product, got {other:?}"),
    }
}

#[tokio::test]
async fn scalar_category_submission_is_normalized_into_a_list() {
    let state = mem_state();
    let category = saved_category(&state, "Baked Goods").await;

    let product = saved_product(
        &state,
        product_input("Bread", MultiValue::One(category.id.to_string())),
    )
    .await;

    assert_eq!(product.categories, vec![category.id]);
    assert_eq!(product.price, 1.5);
    assert_eq!(product.number_in_stock, 40);
}

#[tokio::test]
async fn absent_category_field_becomes_an_empty_list() {
    let state = mem_state();
    let product = saved_product(&state, product_input("Bread", MultiValue::Absent)).await;
    assert!(product.categories.is_empty());
}

#[tokio::test]
async fn category_order_is_preserved_on_multi_submissions() {
    let state = mem_state();
    let meat = saved_category(&state, "Meat").await;
    let baked = saved_category(&state, "Baked Goods").await;

    let product = saved_product(
        &state,
        product_input(
            "Empanada",
            MultiValue::Many(vec![meat.id.to_string(), baked.id.to_string()]),
        ),
    )
    .await;

    assert_eq!(product.categories, vec![meat.id, baked.id]);
}

#[tokio::test]
async fn detail_of_a_missing_product_is_not_found() {
    let state = mem_state();
    let result = product_service::product_detail(&state, Uuid::new_v4()).await;
    assert!(matches!(result, Err(AppError::NotFound)));
}

#[tokio::test]
async fn detail_skips_dangling_category_references() {
    let state = mem_state();
    let live = saved_category(&state, "Produce").await;
    let dangling = Uuid::new_v4();

    let product = saved_product(
        &state,
        product_input(
            "Romaine",
            MultiValue::Many(vec![dangling.to_string(), live.id.to_string()]),
        ),
    )
    .await;

    let (fetched, resolved) = product_service::product_detail(&state, product.id).await.unwrap();
    assert_eq!(fetched.categories, vec![dangling, live.id]);
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].id, live.id);
}

#[tokio::test]
async fn update_replaces_the_record_instead_of_inserting() {
    let state = mem_state();
    let category = saved_category(&state, "Meat").await;
    let product = saved_product(&state, product_input("A5 Wagyu", MultiValue::Absent)).await;

    let update = ProductInput {
        name: "A5 Wagyu".to_string(),
        description: "The best steak from Japan".to_string(),
        price: "135".to_string(),
        number_in_stock: "0".to_string(),
        category: MultiValue::One(category.id.to_string()),
    };
    let updated = match product_service::update_product(&state, product.id, update)
        .await
        .unwrap()
    {
        ProductMutation::Saved(product) => product,
        other => panic!("expected a saved product, got {other:?}"),
    };

    assert_eq!(updated.id, product.id);
    assert_eq!(updated.price, 135.0);
    assert_eq!(updated.categories, vec![category.id]);

    let all = state.store.list_products().await.unwrap();
    assert_eq!(all.len(), 1, "update must never create a second record");
    assert_eq!(all[0].description, "The best steak from Japan");
}

#[tokio::test]
async fn rejected_submission_redisplays_with_checked_options_and_persists_nothing() {
    let state = mem_state();
    let selected = saved_category(&state, "Produce").await;
    let unselected = saved_category(&state, "Meat").await;

    let input = ProductInput {
        name: String::new(),
        description: "This stuff always has some CDC warning".to_string(),
        price: "-1".to_string(),
        number_in_stock: "12".to_string(),
        category: MultiValue::One(selected.id.to_string()),
    };

    match product_service::create_product(&state, input).await.unwrap() {
        ProductMutation::Redisplay {
            draft,
            violations,
            options,
        } => {
            let fields: Vec<&str> = violations.iter().map(|v| v.field).collect();
            assert_eq!(fields, vec!["name", "price"]);
            assert_eq!(draft.categories, vec![selected.id]);
            assert_eq!(draft.number_in_stock, "12");

            let checked: Vec<Uuid> = options
                .iter()
                .filter(|o| o.checked)
                .map(|o| o.category.id)
                .collect();
            assert_eq!(checked, vec![selected.id]);
            assert!(options.iter().any(|o| o.category.id == unselected.id && !o.checked));
        }
        other => panic!("expected a redisplay, got {other:?}"),
    }

    assert_eq!(state.store.count_products().await.unwrap(), 0);
}

#[tokio::test]
async fn index_counts_both_collections() {
    let state = mem_state();
    let category = saved_category(&state, "Baked Goods").await;
    saved_product(
        &state,
        product_input("Bread", MultiValue::One(category.id.to_string())),
    )
    .await;
    saved_product(
        &state,
        product_input("Apple Pie", MultiValue::One(category.id.to_string())),
    )
    .await;

    let counts = product_service::catalog_counts(&state).await.unwrap();
    assert_eq!(counts.products, 2);
    assert_eq!(counts.categories, 1);
}

#[tokio::test]
async fn delete_view_of_a_missing_product_reports_already_gone() {
    let state = mem_state();
    let gone = product_service::delete_view(&state, Uuid::new_v4()).await.unwrap();
    assert!(gone.is_none());

    let product = saved_product(&state, product_input("Bread", MultiValue::Absent)).await;
    product_service::delete_product(&state, product.id).await.unwrap();
    assert!(
        state
            .store
            .find_product(product.id)
            .await
            .unwrap()
            .is_none()
    );
}
