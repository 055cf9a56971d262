//! Route definitions shared by the three catalogs.

use axum::routing::get;
use axum::Router;

use crate::handlers::catalog::{self, CatalogResource};
use crate::state::AppState;

/// Routes mounted at `/categories`, `/ingredients` or `/ingredient-units`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PATCH  /{id}    -> update
/// DELETE /{id}    -> delete (?actor=)
/// ```
pub fn router<E: CatalogResource>() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::list::<E>).post(catalog::create::<E>))
        .route(
            "/{id}",
            get(catalog::get_by_id::<E>)
                .patch(catalog::update::<E>)
                .delete(catalog::delete::<E>),
        )
}
