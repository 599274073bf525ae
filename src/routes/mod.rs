use axum::Router;

use crate::state::AppState;

pub mod categories;
pub mod health;
pub mod products;

// Build the catalog router without binding state; it will be provided at the
// top level.
pub fn create_catalog_router() -> Router<AppState> {
    Router::new()
        .merge(products::router())
        .merge(categories::router())
}
