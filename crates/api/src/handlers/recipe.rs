//! Handlers for the `/recipes` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use cookbook_core::presence::present;
use cookbook_core::validation::validate_input;
use cookbook_db::models::recipe::{CreateRecipe, Recipe, RecipePatch, RecipeSummary};
use serde::Deserialize;
use validator::Validate;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::handlers::recipe_ingredient::{into_line_inputs, RecipeIngredientRequest};
use crate::handlers::{body_reference, path_id};
use crate::query::{ActorParams, RecipeListParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of `POST /recipes`: the recipe header plus its ingredient lines.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRecipeRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category_id: u64,
    #[serde(default)]
    pub actor: String,
    #[serde(default)]
    pub ingredients: Vec<RecipeIngredientRequest>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateRecipeRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category_id: Option<u64>,
    #[serde(default)]
    pub actor: String,
}

/// Lines created with a recipe are attributed to the recipe's actor.
fn into_create_recipe(input: CreateRecipeRequest) -> AppResult<CreateRecipe> {
    let mut ingredients = into_line_inputs(input.ingredients)?;
    for line in &mut ingredients {
        line.actor.clone_from(&input.actor);
    }
    Ok(CreateRecipe {
        category_id: body_reference(input.category_id)?,
        ingredients,
        name: input.name,
        description: input.description,
        actor: input.actor,
    })
}

/// Build the patch for an update request, dropping absent fields.
pub fn normalize_update(input: UpdateRecipeRequest) -> AppResult<RecipePatch> {
    let category_id = present(input.category_id).map(body_reference).transpose()?;
    Ok(RecipePatch {
        name: input.name,
        description: input.description,
        category_id,
        actor: input.actor,
    }
    .normalized())
}

/// POST /api/v1/recipes
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateRecipeRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<RecipeSummary>>)> {
    validate_input(&input)?;
    let input = into_create_recipe(input)?;

    let summary = state.recipes.create_recipe(&input).await?;

    tracing::info!(
        recipe_id = summary.recipe.id,
        lines = summary.ingredients.len(),
        actor = %input.actor,
        "Recipe created",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: summary })))
}

/// GET /api/v1/recipes
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<RecipeListParams>,
) -> AppResult<Json<DataResponse<Vec<Recipe>>>> {
    let page = params.pagination.page();
    let recipes = state
        .recipes
        .list_recipes(&params.filter(), page.limit, page.offset)
        .await?;
    Ok(Json(DataResponse { data: recipes }))
}

/// GET /api/v1/recipes/{id}/summary
pub async fn get_summary(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<DataResponse<RecipeSummary>>> {
    let id = path_id(&raw_id)?;
    let summary = state.recipes.get_recipe_summary(id).await?;
    Ok(Json(DataResponse { data: summary }))
}

/// PATCH /api/v1/recipes/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    AppJson(input): AppJson<UpdateRecipeRequest>,
) -> AppResult<Json<DataResponse<Recipe>>> {
    let id = path_id(&raw_id)?;
    let patch = normalize_update(input)?;
    let recipe = state.recipes.update_recipe(id, &patch).await?;

    tracing::info!(recipe_id = id, actor = %patch.actor, "Recipe updated");
    Ok(Json(DataResponse { data: recipe }))
}

/// DELETE /api/v1/recipes/{id}?actor=
pub async fn delete(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Query(params): Query<ActorParams>,
) -> AppResult<StatusCode> {
    let id = path_id(&raw_id)?;
    state.recipes.delete_recipe(id, &params.actor).await?;

    tracing::info!(recipe_id = id, actor = %params.actor, "Recipe deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::error::AppError;

    #[test]
    fn zero_category_and_empty_strings_are_dropped() {
        let patch = normalize_update(UpdateRecipeRequest {
            name: Some(String::new()),
            description: Some("Rich".into()),
            category_id: Some(0),
            actor: "bob".into(),
        })
        .unwrap();

        assert_eq!(patch.name, None);
        assert_eq!(patch.description.as_deref(), Some("Rich"));
        assert_eq!(patch.category_id, None);
        assert_eq!(patch.actor, "bob");
    }

    #[test]
    fn oversized_category_is_rejected() {
        let result = normalize_update(UpdateRecipeRequest {
            category_id: Some(u64::MAX),
            ..Default::default()
        });
        assert_matches!(result, Err(AppError::BadRequest(_)));
    }

    #[test]
    fn create_request_keeps_line_order() {
        let request: CreateRecipeRequest = serde_json::from_value(serde_json::json!({
            "name": "Soup",
            "category_id": 1,
            "actor": "alice",
            "ingredients": [
                { "ingredient_id": 2, "ordering_index": 1, "amount": 200.0 },
                { "ingredient_id": 3, "ordering_index": 0, "amount": 50.0 }
            ]
        }))
        .unwrap();

        let input = into_create_recipe(request).unwrap();
        let ids: Vec<_> = input.ingredients.iter().map(|l| l.ingredient_id).collect();
        assert_eq!(ids, vec![2, 3]);
        assert_eq!(input.category_id, 1);
    }

    #[test]
    fn lines_take_the_recipe_actor() {
        let request: CreateRecipeRequest = serde_json::from_value(serde_json::json!({
            "name": "Soup",
            "actor": "alice",
            "ingredients": [
                { "ingredient_id": 2, "ordering_index": 1 },
                { "ingredient_id": 3, "ordering_index": 0, "actor": "mallory" }
            ]
        }))
        .unwrap();

        let input = into_create_recipe(request).unwrap();
        assert_eq!(input.actor, "alice");
        assert!(input.ingredients.iter().all(|l| l.actor == "alice"));
    }
}
