//! Route definitions for the `/recipe-ingredients` resource.

use axum::routing::{patch, post};
use axum::Router;

use crate::handlers::recipe_ingredient;
use crate::state::AppState;

/// Routes mounted at `/recipe-ingredients`.
///
/// ```text
/// POST   /        -> bulk_create
/// PATCH  /{id}    -> update
/// DELETE /{id}    -> delete (?actor=)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(recipe_ingredient::bulk_create))
        .route(
            "/{id}",
            patch(recipe_ingredient::update).delete(recipe_ingredient::delete),
        )
}
