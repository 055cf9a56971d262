//! Handlers for the `/recipe-ingredients` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use cookbook_core::presence::present;
use cookbook_db::models::recipe_ingredient::{
    CreateRecipeIngredient, RecipeIngredient, RecipeIngredientPatch,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::handlers::{body_id, body_reference, path_id};
use crate::query::ActorParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// One ingredient line as sent by clients.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RecipeIngredientRequest {
    pub amount: f64,
    pub ingredient_id: u64,
    pub ingredient_name: String,
    pub ingredient_unit_name: String,
    pub ordering_index: i32,
    pub notes: String,
    pub actor: String,
}

#[derive(Debug, Deserialize)]
pub struct BulkCreateRecipeIngredientsRequest {
    pub recipe_id: u64,
    #[serde(default)]
    pub ingredients: Vec<RecipeIngredientRequest>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateRecipeIngredientRequest {
    pub amount: Option<f64>,
    pub ingredient_id: Option<u64>,
    pub ingredient_name: Option<String>,
    pub ingredient_unit_name: Option<String>,
    pub ordering_index: Option<i32>,
    pub notes: Option<String>,
    pub actor: String,
}

/// Convert request lines, keeping their order.
pub(crate) fn into_line_inputs(
    lines: Vec<RecipeIngredientRequest>,
) -> AppResult<Vec<CreateRecipeIngredient>> {
    lines
        .into_iter()
        .map(|line| {
            Ok(CreateRecipeIngredient {
                amount: line.amount,
                ingredient_id: body_reference(line.ingredient_id)?,
                ingredient_name: line.ingredient_name,
                ingredient_unit_name: line.ingredient_unit_name,
                ordering_index: line.ordering_index,
                notes: line.notes,
                actor: line.actor,
            })
        })
        .collect()
}

/// Build the patch for an update request, dropping absent fields.
pub fn normalize_update(input: UpdateRecipeIngredientRequest) -> AppResult<RecipeIngredientPatch> {
    let ingredient_id = present(input.ingredient_id).map(body_reference).transpose()?;
    Ok(RecipeIngredientPatch {
        amount: input.amount,
        ingredient_id,
        ingredient_name: input.ingredient_name,
        ingredient_unit_name: input.ingredient_unit_name,
        ordering_index: input.ordering_index,
        notes: input.notes,
        actor: input.actor,
    }
    .normalized())
}

/// POST /api/v1/recipe-ingredients
pub async fn bulk_create(
    State(state): State<AppState>,
    AppJson(input): AppJson<BulkCreateRecipeIngredientsRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Vec<RecipeIngredient>>>)> {
    let recipe_id = body_id(input.recipe_id)?;
    let lines = into_line_inputs(input.ingredients)?;

    let inserted = state
        .recipes
        .bulk_create_recipe_ingredients(recipe_id, &lines)
        .await?;

    tracing::info!(recipe_id, lines = inserted.len(), "Recipe ingredients added");
    Ok((StatusCode::CREATED, Json(DataResponse { data: inserted })))
}

/// PATCH /api/v1/recipe-ingredients/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    AppJson(input): AppJson<UpdateRecipeIngredientRequest>,
) -> AppResult<Json<DataResponse<RecipeIngredient>>> {
    let id = path_id(&raw_id)?;
    let patch = normalize_update(input)?;
    let line = state.recipes.update_recipe_ingredient(id, &patch).await?;

    tracing::info!(recipe_ingredient_id = id, actor = %patch.actor, "Recipe ingredient updated");
    Ok(Json(DataResponse { data: line }))
}

/// DELETE /api/v1/recipe-ingredients/{id}?actor=
pub async fn delete(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Query(params): Query<ActorParams>,
) -> AppResult<StatusCode> {
    let id = path_id(&raw_id)?;
    state
        .recipes
        .delete_recipe_ingredient(id, &params.actor)
        .await?;

    tracing::info!(recipe_ingredient_id = id, actor = %params.actor, "Recipe ingredient deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_numbers_and_empty_strings_mean_no_change() {
        let patch = normalize_update(UpdateRecipeIngredientRequest {
            amount: Some(0.0),
            ingredient_id: Some(0),
            ingredient_name: Some(String::new()),
            ingredient_unit_name: Some("kg".into()),
            ordering_index: Some(0),
            notes: Some(String::new()),
            actor: "carol".into(),
        })
        .unwrap();

        assert_eq!(
            patch,
            RecipeIngredientPatch {
                ingredient_unit_name: Some("kg".into()),
                actor: "carol".into(),
                ..Default::default()
            }
        );
    }

    #[test]
    fn missing_fields_deserialize_as_absent() {
        let request: UpdateRecipeIngredientRequest =
            serde_json::from_value(serde_json::json!({ "amount": 2.5, "actor": "dan" })).unwrap();
        let patch = normalize_update(request).unwrap();

        assert_eq!(patch.amount, Some(2.5));
        assert_eq!(patch.ordering_index, None);
        assert_eq!(patch.actor, "dan");
    }
}
