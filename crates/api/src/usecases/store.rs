//! Storage seams for the use-case layer.
//!
//! Use-cases depend on these traits rather than on the repositories
//! directly; the `Pg*` implementations forward to `cookbook_db`.

use std::marker::PhantomData;

use async_trait::async_trait;
use cookbook_core::pagination::Page;
use cookbook_core::types::DbId;
use cookbook_db::error::AggregateWriteError;
use cookbook_db::models::catalog::{CatalogEntity, CatalogPatch, CreateCatalogEntry};
use cookbook_db::models::recipe::{
    CreateRecipe, Recipe, RecipeFilter, RecipePatch, RecipeSummary, RecipeSummaryLookup,
};
use cookbook_db::models::recipe_ingredient::{
    CreateRecipeIngredient, RecipeIngredient, RecipeIngredientPatch,
};
use cookbook_db::repositories::{CatalogRepo, RecipeIngredientRepo, RecipeRepo};
use cookbook_db::DbPool;

/// A soft-deletable, partially-updatable catalog collection.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    type Entity: CatalogEntity;

    async fn create(&self, input: &CreateCatalogEntry) -> Result<Self::Entity, sqlx::Error>;
    async fn find_by_id(&self, id: DbId) -> Result<Option<Self::Entity>, sqlx::Error>;
    async fn list(&self, page: Page) -> Result<Vec<Self::Entity>, sqlx::Error>;
    async fn update(
        &self,
        id: DbId,
        patch: &CatalogPatch,
    ) -> Result<Option<Self::Entity>, sqlx::Error>;
    async fn soft_delete(&self, id: DbId, actor: &str)
        -> Result<Option<Self::Entity>, sqlx::Error>;
}

/// Recipe headers and the recipe aggregate.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    async fn create_with_ingredients(
        &self,
        input: &CreateRecipe,
    ) -> Result<RecipeSummary, AggregateWriteError>;
    async fn list(&self, filter: &RecipeFilter, page: Page) -> Result<Vec<Recipe>, sqlx::Error>;
    async fn update(&self, id: DbId, patch: &RecipePatch) -> Result<Option<Recipe>, sqlx::Error>;
    async fn soft_delete(&self, id: DbId, actor: &str) -> Result<Option<Recipe>, sqlx::Error>;
    async fn get_summary(&self, id: DbId) -> Result<RecipeSummaryLookup, sqlx::Error>;
}

/// Recipe ingredient lines.
#[async_trait]
pub trait RecipeIngredientStore: Send + Sync {
    /// Append lines to a live recipe; `None` if there is none with this id.
    async fn bulk_create(
        &self,
        recipe_id: DbId,
        lines: &[CreateRecipeIngredient],
    ) -> Result<Option<Vec<RecipeIngredient>>, sqlx::Error>;
    async fn update(
        &self,
        id: DbId,
        patch: &RecipeIngredientPatch,
    ) -> Result<Option<RecipeIngredient>, sqlx::Error>;
    async fn soft_delete(
        &self,
        id: DbId,
        actor: &str,
    ) -> Result<Option<RecipeIngredient>, sqlx::Error>;
}

// ---------------------------------------------------------------------------
// PostgreSQL implementations
// ---------------------------------------------------------------------------

/// [`CatalogStore`] backed by [`CatalogRepo`].
pub struct PgCatalogStore<E> {
    pool: DbPool,
    _entity: PhantomData<fn() -> E>,
}

impl<E> PgCatalogStore<E> {
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<E: CatalogEntity> CatalogStore for PgCatalogStore<E> {
    type Entity = E;

    async fn create(&self, input: &CreateCatalogEntry) -> Result<E, sqlx::Error> {
        CatalogRepo::<E>::create(&self.pool, input).await
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<E>, sqlx::Error> {
        CatalogRepo::<E>::find_by_id(&self.pool, id).await
    }

    async fn list(&self, page: Page) -> Result<Vec<E>, sqlx::Error> {
        CatalogRepo::<E>::list(&self.pool, page).await
    }

    async fn update(&self, id: DbId, patch: &CatalogPatch) -> Result<Option<E>, sqlx::Error> {
        CatalogRepo::<E>::update(&self.pool, id, patch).await
    }

    async fn soft_delete(&self, id: DbId, actor: &str) -> Result<Option<E>, sqlx::Error> {
        CatalogRepo::<E>::soft_delete(&self.pool, id, actor).await
    }
}

/// [`RecipeStore`] backed by [`RecipeRepo`].
pub struct PgRecipeStore {
    pool: DbPool,
}

impl PgRecipeStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecipeStore for PgRecipeStore {
    async fn create_with_ingredients(
        &self,
        input: &CreateRecipe,
    ) -> Result<RecipeSummary, AggregateWriteError> {
        RecipeRepo::create_with_ingredients(&self.pool, input).await
    }

    async fn list(&self, filter: &RecipeFilter, page: Page) -> Result<Vec<Recipe>, sqlx::Error> {
        RecipeRepo::list(&self.pool, filter, page).await
    }

    async fn update(&self, id: DbId, patch: &RecipePatch) -> Result<Option<Recipe>, sqlx::Error> {
        RecipeRepo::update(&self.pool, id, patch).await
    }

    async fn soft_delete(&self, id: DbId, actor: &str) -> Result<Option<Recipe>, sqlx::Error> {
        RecipeRepo::soft_delete(&self.pool, id, actor).await
    }

    async fn get_summary(&self, id: DbId) -> Result<RecipeSummaryLookup, sqlx::Error> {
        RecipeRepo::get_summary(&self.pool, id).await
    }
}

/// [`RecipeIngredientStore`] backed by [`RecipeIngredientRepo`]; appends go
/// through [`RecipeRepo::append_ingredients`] to lock the recipe.
pub struct PgRecipeIngredientStore {
    pool: DbPool,
}

impl PgRecipeIngredientStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecipeIngredientStore for PgRecipeIngredientStore {
    async fn bulk_create(
        &self,
        recipe_id: DbId,
        lines: &[CreateRecipeIngredient],
    ) -> Result<Option<Vec<RecipeIngredient>>, sqlx::Error> {
        RecipeRepo::append_ingredients(&self.pool, recipe_id, lines).await
    }

    async fn update(
        &self,
        id: DbId,
        patch: &RecipeIngredientPatch,
    ) -> Result<Option<RecipeIngredient>, sqlx::Error> {
        RecipeIngredientRepo::update(&self.pool, id, patch).await
    }

    async fn soft_delete(
        &self,
        id: DbId,
        actor: &str,
    ) -> Result<Option<RecipeIngredient>, sqlx::Error> {
        RecipeIngredientRepo::soft_delete(&self.pool, id, actor).await
    }
}
