use axum::{
    Form, Router,
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::products::{ProductDraft, ProductInput},
    error::AppResult,
    form::FormFields,
    services::product_service::{self, ProductMutation},
    state::AppState,
    views,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/product/create", get(create_get).post(create_post))
        .route("/product/{id}/delete", get(delete_get).post(delete_post))
        .route("/product/{id}/update", get(update_get).post(update_post))
        .route("/product/{id}", get(detail))
        .route("/products", get(list))
}

pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let counts = product_service::catalog_counts(&state).await?;
    Ok(Html(views::index(&counts)))
}

pub async fn list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let products = product_service::list_products(&state).await?;
    Ok(Html(views::product_list(&products)))
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Html<String>> {
    let (product, categories) = product_service::product_detail(&state, id).await?;
    Ok(Html(views::product_detail(&product, &categories)))
}

pub async fn create_get(State(state): State<AppState>) -> AppResult<Html<String>> {
    let options = product_service::create_form(&state).await?;
    Ok(Html(views::product_form(
        "Create New Product",
        &ProductDraft::default(),
        &options,
        &[],
    )))
}

pub async fn create_post(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    let input = ProductInput::from_fields(&FormFields::new(pairs));
    let response = match product_service::create_product(&state, input).await? {
        ProductMutation::Saved(product) => Redirect::to(&product.url()).into_response(),
        ProductMutation::Redisplay {
            draft,
            violations,
            options,
        } => Html(views::product_form(
            "Create New Product",
            &draft,
            &options,
            &violations,
        ))
        .into_response(),
    };
    Ok(response)
}

pub async fn update_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Html<String>> {
    let (draft, options) = product_service::update_form(&state, id).await?;
    Ok(Html(views::product_form(
        "Update Product",
        &draft,
        &options,
        &[],
    )))
}

pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    let input = ProductInput::from_fields(&FormFields::new(pairs));
    let response = match product_service::update_product(&state, id, input).await? {
        ProductMutation::Saved(product) => Redirect::to(&product.url()).into_response(),
        ProductMutation::Redisplay {
            draft,
            violations,
            options,
        } => Html(views::product_form(
            "Update Product",
            &draft,
            &options,
            &violations,
        ))
        .into_response(),
    };
    Ok(response)
}

pub async fn delete_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    let response = match product_service::delete_view(&state, id).await? {
        Some(product) => Html(views::product_delete(&product)).into_response(),
        // Already gone: treat as deleted rather than erroring.
        None => Redirect::to("/catalog/products").into_response(),
    };
    Ok(response)
}

pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Redirect> {
    product_service::delete_product(&state, id).await?;
    Ok(Redirect::to("/catalog/products"))
}
