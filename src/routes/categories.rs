use axum::{
    Form, Router,
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::categories::{CategoryDraft, CategoryInput},
    error::AppResult,
    fetch::DeleteFetch,
    form::FormFields,
    services::category_service::{self, CategoryMutation},
    state::AppState,
    views,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/category/create", get(create_get).post(create_post))
        .route("/category/{id}/delete", get(delete_get).post(delete_post))
        .route("/category/{id}/update", get(update_get).post(update_post))
        .route("/category/{id}", get(detail))
        .route("/categories", get(list))
}

pub async fn list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let categories = category_service::list_categories(&state).await?;
    Ok(Html(views::category_list(&categories)))
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Html<String>> {
    let (category, products) = category_service::category_detail(&state, id).await?;
    Ok(Html(views::category_detail(&category, &products)))
}

pub async fn create_get() -> Html<String> {
    Html(views::category_form(
        "Create New Category",
        &CategoryDraft::default(),
        &[],
    ))
}

pub async fn create_post(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    let input = CategoryInput::from_fields(&FormFields::new(pairs));
    let response = match category_service::create_category(&state, input).await? {
        CategoryMutation::Saved(category) => Redirect::to(&category.url()).into_response(),
        CategoryMutation::Redisplay { draft, violations } => Html(views::category_form(
            "Create New Category",
            &draft,
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
    let draft = category_service::update_form(&state, id).await?;
    Ok(Html(views::category_form("Update Category", &draft, &[])))
}

pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    let input = CategoryInput::from_fields(&FormFields::new(pairs));
    let response = match category_service::update_category(&state, id, input).await? {
        CategoryMutation::Saved(category) => Redirect::to(&category.url()).into_response(),
        CategoryMutation::Redisplay { draft, violations } => {
            Html(views::category_form("Update Category", &draft, &violations)).into_response()
        }
    };
    Ok(response)
}

pub async fn delete_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    let response = match category_service::delete_view(&state, id).await? {
        // Already gone: redirect and stop, no further view work.
        DeleteFetch::Missing => Redirect::to("/catalog/categories").into_response(),
        DeleteFetch::Blocked {
            primary,
            dependents,
        } => Html(views::category_delete(&primary, &dependents)).into_response(),
        DeleteFetch::Clear { primary } => Html(views::category_delete(&primary, &[])).into_response(),
    };
    Ok(response)
}

pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    let response = match category_service::delete_category(&state, id).await? {
        DeleteFetch::Missing => Redirect::to("/catalog/categories").into_response(),
        // Still referenced: back to the confirmation view with the blockers.
        DeleteFetch::Blocked {
            primary,
            dependents,
        } => Html(views::category_delete(&primary, &dependents)).into_response(),
        DeleteFetch::Clear { .. } => Redirect::to("/catalog/categories").into_response(),
    };
    Ok(response)
}
