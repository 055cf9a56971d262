//! Handlers shared by `/categories`, `/ingredients` and `/ingredient-units`.
//!
//! Each handler is generic over the catalog entity; the router instantiates
//! it once per catalog.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use cookbook_core::validation::validate_input;
use cookbook_db::models::catalog::{
    CatalogEntity, CatalogPatch, Category, CreateCatalogEntry, Ingredient, IngredientUnit,
};
use serde::Deserialize;
use validator::Validate;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::handlers::path_id;
use crate::query::{ActorParams, PaginationParams};
use crate::response::DataResponse;
use crate::state::{AppState, CatalogService};

/// A catalog entity reachable through [`AppState`].
pub trait CatalogResource: CatalogEntity {
    fn service(state: &AppState) -> &CatalogService<Self>;
}

impl CatalogResource for Category {
    fn service(state: &AppState) -> &CatalogService<Self> {
        &state.categories
    }
}

impl CatalogResource for Ingredient {
    fn service(state: &AppState) -> &CatalogService<Self> {
        &state.ingredients
    }
}

impl CatalogResource for IngredientUnit {
    fn service(state: &AppState) -> &CatalogService<Self> {
        &state.ingredient_units
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCatalogRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[serde(default)]
    pub actor: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateCatalogRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub actor: String,
}

/// Build the patch for an update request; an empty name means "no change".
pub fn normalize_update(input: UpdateCatalogRequest) -> CatalogPatch {
    CatalogPatch {
        name: input.name,
        actor: input.actor,
    }
    .normalized()
}

/// POST /api/v1/{catalog}
pub async fn create<E: CatalogResource>(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateCatalogRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<E>>)> {
    validate_input(&input)?;

    let entry = CreateCatalogEntry {
        name: input.name,
        actor: input.actor,
    };
    let created = E::service(&state).create(&entry).await?;

    tracing::info!(entity = %E::KIND, id = created.id(), actor = %entry.actor, "Catalog entry created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /api/v1/{catalog}
pub async fn list<E: CatalogResource>(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<E>>>> {
    let page = params.page();
    let rows = E::service(&state).list(page.limit, page.offset).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/{catalog}/{id}
pub async fn get_by_id<E: CatalogResource>(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<DataResponse<E>>> {
    let id = path_id(&raw_id)?;
    let row = E::service(&state).get(id).await?;
    Ok(Json(DataResponse { data: row }))
}

/// PATCH /api/v1/{catalog}/{id}
pub async fn update<E: CatalogResource>(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    AppJson(input): AppJson<UpdateCatalogRequest>,
) -> AppResult<Json<DataResponse<E>>> {
    let id = path_id(&raw_id)?;
    let patch = normalize_update(input);
    let updated = E::service(&state).update(id, &patch).await?;

    tracing::info!(entity = %E::KIND, id, actor = %patch.actor, "Catalog entry updated");
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/{catalog}/{id}?actor=
pub async fn delete<E: CatalogResource>(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Query(params): Query<ActorParams>,
) -> AppResult<StatusCode> {
    let id = path_id(&raw_id)?;
    E::service(&state).delete(id, &params.actor).await?;

    tracing::info!(entity = %E::KIND, id, actor = %params.actor, "Catalog entry deleted");
    Ok(StatusCode::NO_CONTENT)
}
