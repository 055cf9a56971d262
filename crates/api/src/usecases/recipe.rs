//! Recipe aggregate use-case: recipes, their ingredient lines and summaries.

use cookbook_core::error::{CoreError, EntityKind};
use cookbook_core::pagination::Page;
use cookbook_core::types::DbId;
use cookbook_db::models::recipe::{
    CreateRecipe, Recipe, RecipeFilter, RecipePatch, RecipeSummary, RecipeSummaryLookup,
};
use cookbook_db::models::recipe_ingredient::{
    CreateRecipeIngredient, RecipeIngredient, RecipeIngredientPatch,
};

use crate::error::AppResult;
use crate::usecases::store::{RecipeIngredientStore, RecipeStore};

pub struct RecipeUsecase<R, L> {
    recipes: R,
    lines: L,
}

impl<R: RecipeStore, L: RecipeIngredientStore> RecipeUsecase<R, L> {
    pub fn new(recipes: R, lines: L) -> Self {
        Self { recipes, lines }
    }

    /// Create a recipe and its ingredient lines as one unit.
    ///
    /// A failure leaves nothing behind; the returned error carries the stage
    /// that failed.
    pub async fn create_recipe(&self, input: &CreateRecipe) -> AppResult<RecipeSummary> {
        Ok(self.recipes.create_with_ingredients(input).await?)
    }

    /// Append lines to an existing live recipe.
    pub async fn bulk_create_recipe_ingredients(
        &self,
        recipe_id: DbId,
        lines: &[CreateRecipeIngredient],
    ) -> AppResult<Vec<RecipeIngredient>> {
        self.lines
            .bulk_create(recipe_id, lines)
            .await?
            .ok_or_else(|| CoreError::not_found(EntityKind::Recipe, recipe_id).into())
    }

    pub async fn update_recipe(&self, id: DbId, patch: &RecipePatch) -> AppResult<Recipe> {
        self.recipes
            .update(id, patch)
            .await?
            .ok_or_else(|| CoreError::not_found(EntityKind::Recipe, id).into())
    }

    pub async fn delete_recipe(&self, id: DbId, actor: &str) -> AppResult<Recipe> {
        self.recipes
            .soft_delete(id, actor)
            .await?
            .ok_or_else(|| CoreError::not_found(EntityKind::Recipe, id).into())
    }

    pub async fn update_recipe_ingredient(
        &self,
        id: DbId,
        patch: &RecipeIngredientPatch,
    ) -> AppResult<RecipeIngredient> {
        self.lines
            .update(id, patch)
            .await?
            .ok_or_else(|| CoreError::not_found(EntityKind::RecipeIngredient, id).into())
    }

    pub async fn delete_recipe_ingredient(
        &self,
        id: DbId,
        actor: &str,
    ) -> AppResult<RecipeIngredient> {
        self.lines
            .soft_delete(id, actor)
            .await?
            .ok_or_else(|| CoreError::not_found(EntityKind::RecipeIngredient, id).into())
    }

    pub async fn list_recipes(
        &self,
        filter: &RecipeFilter,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<Recipe>> {
        Ok(self
            .recipes
            .list(filter, Page::resolve(limit, offset))
            .await?)
    }

    /// Missing and soft-deleted recipes are both reported as not found.
    pub async fn get_recipe_summary(&self, id: DbId) -> AppResult<RecipeSummary> {
        match self.recipes.get_summary(id).await? {
            RecipeSummaryLookup::Found(summary) => Ok(summary),
            RecipeSummaryLookup::Missing | RecipeSummaryLookup::Deleted => {
                Err(CoreError::not_found(EntityKind::Recipe, id).into())
            }
        }
    }
}
