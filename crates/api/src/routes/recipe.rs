//! Route definitions for the `/recipes` resource.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::recipe;
use crate::state::AppState;

/// Routes mounted at `/recipes`.
///
/// ```text
/// GET    /                -> list (?limit, offset, category_id, ingredient_id)
/// POST   /                -> create
/// GET    /{id}/summary    -> get_summary
/// PATCH  /{id}            -> update
/// DELETE /{id}            -> delete (?actor=)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(recipe::list).post(recipe::create))
        .route("/{id}", patch(recipe::update).delete(recipe::delete))
        .route("/{id}/summary", get(recipe::get_summary))
}
