use std::sync::Arc;

use uuid::Uuid;

use axum_inventory_catalog::{
    config::AppConfig,
    db::create_pool,
    dto::{categories::CategoryInput, products::ProductInput},
    form::MultiValue,
    services::{
        category_service::{self, CategoryMutation},
        product_service::{self, ProductMutation},
    },
    state::AppState,
    store::PgStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    // Ensure migrations are applied.
    sqlx::migrate!("./migrations").run(&pool).await?;

    let state = AppState::new(Arc::new(PgStore::new(pool)));

    let produce = create_category(
        &state,
        "Produce",
        "Farm-produced crops, including fruits and vegetables.",
    )
    .await?;
    let meat = create_category(&state, "Meat", "Animal flesh that is eaten as food").await?;
    let baked = create_category(
        &state,
        "Baked Goods",
        "Foods made from dough or batter and cooked by baking",
    )
    .await?;

    create_product(&state, "Bread", "Freshly baked bread", "1.50", "40", &[baked]).await?;
    create_product(
        &state,
        "Empanada",
        "Empanadas made fresh by Abuella",
        "3.00",
        "12",
        &[meat, baked],
    )
    .await?;
    create_product(
        &state,
        "Apple Pie",
        "Pie made with tart apples and the sweetest sugar",
        "5",
        "15",
        &[produce, baked],
    )
    .await?;
    create_product(&state, "A5 Wagyu", "The best steak from Japan", "135", "0", &[meat]).await?;
    create_product(
        &state,
        "Romaine",
        "This stuff always has some CDC warning",
        "2.99",
        "12",
        &[produce],
    )
    .await?;
    create_product(&state, "Test Product 1", "Generic Text", "1", "100", &[baked]).await?;
    create_product(&state, "Test Product 2", "Generic Text", "4", "0", &[meat]).await?;

    println!("Populated catalog: 3 categories, 7 products");
    Ok(())
}

async fn create_category(state: &AppState, name: &str, description: &str) -> anyhow::Result<Uuid> {
    let input = CategoryInput {
        name: name.to_string(),
        description: description.to_string(),
    };
    match category_service::create_category(state, input).await? {
        CategoryMutation::Saved(category) => {
            println!("New category: {}", category.name);
            Ok(category.id)
        }
        CategoryMutation::Redisplay { violations, .. } => {
            anyhow::bail!("seed category {name:?} rejected: {violations:?}")
        }
    }
}

async fn create_product(
    state: &AppState,
    name: &str,
    description: &str,
    price: &str,
    number_in_stock: &str,
    categories: &[Uuid],
) -> anyhow::Result<()> {
    let input = ProductInput {
        name: name.to_string(),
        description: description.to_string(),
        price: price.to_string(),
        number_in_stock: number_in_stock.to_string(),
        category: MultiValue::Many(categories.iter().map(Uuid::to_string).collect()),
    };
    match product_service::create_product(state, input).await? {
        ProductMutation::Saved(product) => {
            println!("New product: {}", product.name);
            Ok(())
        }
        ProductMutation::Redisplay { violations, .. } => {
            anyhow::bail!("seed product {name:?} rejected: {violations:?}")
        }
    }
}
