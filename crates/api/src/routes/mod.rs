pub mod catalog;
pub mod health;
pub mod recipe;
pub mod recipe_ingredient;

use axum::Router;
use cookbook_db::models::catalog::{Category, Ingredient, IngredientUnit};

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /recipes                         list, create
/// /recipes/{id}                    update, delete
/// /recipes/{id}/summary            recipe with ordered ingredient lines
///
/// /recipe-ingredients              bulk create for an existing recipe
/// /recipe-ingredients/{id}         update, delete
///
/// /categories                      list, create
/// /categories/{id}                 get, update, delete
/// /ingredients                     list, create
/// /ingredients/{id}                get, update, delete
/// /ingredient-units                list, create
/// /ingredient-units/{id}           get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/recipes", recipe::router())
        .nest("/recipe-ingredients", recipe_ingredient::router())
        .nest("/categories", catalog::router::<Category>())
        .nest("/ingredients", catalog::router::<Ingredient>())
        .nest("/ingredient-units", catalog::router::<IngredientUnit>())
}
