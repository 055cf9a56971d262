//! Recipe models and the recipe summary projection.

use cookbook_core::presence::present;
use cookbook_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::recipe_ingredient::{CreateRecipeIngredient, RecipeIngredient};

/// A row from the `recipes` table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, FromRow)]
pub struct Recipe {
    pub id: DbId,
    pub name: String,
    pub description: String,
    /// Soft reference to `categories.id`.
    pub category_id: DbId,
    pub created_at: Timestamp,
    pub created_by: String,
    pub updated_at: Option<Timestamp>,
    pub updated_by: Option<String>,
    pub is_deleted: bool,
}

/// Values for creating a recipe together with its ingredient lines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateRecipe {
    pub name: String,
    pub description: String,
    pub category_id: DbId,
    pub actor: String,
    /// Inserted in this order, `ordering_index` kept verbatim.
    pub ingredients: Vec<CreateRecipeIngredient>,
}

/// Partial update for a recipe.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<DbId>,
    /// Always written to `updated_by`.
    pub actor: String,
}

impl RecipePatch {
    /// Drop every field that fails the presence rule.
    pub fn normalized(self) -> Self {
        Self {
            name: present(self.name),
            description: present(self.description),
            category_id: present(self.category_id),
            actor: self.actor,
        }
    }
}

/// Optional filters for listing recipes. Both combine with AND.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    pub category_id: Option<DbId>,
    /// Matches recipes with at least one live line using this ingredient.
    pub ingredient_id: Option<DbId>,
}

impl RecipeFilter {
    /// Build a filter from raw ids where zero means "not filtered".
    pub fn from_ids(category_id: DbId, ingredient_id: DbId) -> Self {
        Self {
            category_id: present(Some(category_id)),
            ingredient_id: present(Some(ingredient_id)),
        }
    }
}

/// A recipe with its live ingredient lines ordered by `ordering_index`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecipeSummary {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub ingredients: Vec<RecipeIngredient>,
}

/// Outcome of looking up a recipe summary.
#[derive(Debug, Clone, PartialEq)]
pub enum RecipeSummaryLookup {
    /// No recipe row has this id.
    Missing,
    /// The recipe exists but is soft-deleted.
    Deleted,
    /// The recipe is live; `ingredients` may be empty.
    Found(RecipeSummary),
}

impl RecipeSummaryLookup {
    /// The summary if the recipe is live.
    pub fn into_found(self) -> Option<RecipeSummary> {
        match self {
            Self::Found(summary) => Some(summary),
            Self::Missing | Self::Deleted => None,
        }
    }

    /// The summary, or a zero-value summary when the recipe is missing or
    /// soft-deleted.
    pub fn into_summary_or_default(self) -> RecipeSummary {
        self.into_found().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_ignores_zero_ids() {
        assert_eq!(RecipeFilter::from_ids(0, 0), RecipeFilter::default());
        assert_eq!(
            RecipeFilter::from_ids(5, 9),
            RecipeFilter {
                category_id: Some(5),
                ingredient_id: Some(9),
            }
        );
        assert_eq!(RecipeFilter::from_ids(0, 9).category_id, None);
    }

    #[test]
    fn patch_normalization_drops_zero_category() {
        let patch = RecipePatch {
            name: Some("Stew".into()),
            description: Some(String::new()),
            category_id: Some(0),
            actor: "alice".into(),
        }
        .normalized();

        assert_eq!(patch.name.as_deref(), Some("Stew"));
        assert_eq!(patch.description, None);
        assert_eq!(patch.category_id, None);
        assert_eq!(patch.clone().normalized(), patch);
    }

    #[test]
    fn missing_and_deleted_fall_back_to_zero_summary() {
        assert_eq!(
            RecipeSummaryLookup::Missing.into_summary_or_default(),
            RecipeSummary::default()
        );
        assert_eq!(RecipeSummaryLookup::Deleted.into_found(), None);
    }
}
