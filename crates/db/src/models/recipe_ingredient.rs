//! Recipe ingredient line models.

use cookbook_core::presence::present;
use cookbook_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `recipe_ingredients` table.
///
/// `ingredient_name` and `ingredient_unit_name` are snapshots taken when the
/// line was written; they do not follow later catalog renames.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct RecipeIngredient {
    pub id: DbId,
    pub recipe_id: DbId,
    pub ingredient_id: DbId,
    pub ingredient_name: String,
    pub ingredient_unit_name: String,
    pub amount: f64,
    pub ordering_index: i32,
    pub notes: String,
    pub created_at: Timestamp,
    pub created_by: String,
    pub updated_at: Option<Timestamp>,
    pub updated_by: Option<String>,
    pub is_deleted: bool,
}

/// Values for one ingredient line in a bulk insert.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateRecipeIngredient {
    pub amount: f64,
    pub ingredient_id: DbId,
    pub ingredient_name: String,
    pub ingredient_unit_name: String,
    /// Stored verbatim; uniqueness and contiguity are not checked.
    pub ordering_index: i32,
    pub notes: String,
    pub actor: String,
}

/// Partial update for an ingredient line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeIngredientPatch {
    pub amount: Option<f64>,
    pub ingredient_id: Option<DbId>,
    pub ingredient_name: Option<String>,
    pub ingredient_unit_name: Option<String>,
    pub ordering_index: Option<i32>,
    pub notes: Option<String>,
    /// Always written to `updated_by`.
    pub actor: String,
}

impl RecipeIngredientPatch {
    /// Drop every field that fails the presence rule.
    pub fn normalized(self) -> Self {
        Self {
            amount: present(self.amount),
            ingredient_id: present(self.ingredient_id),
            ingredient_name: present(self.ingredient_name),
            ingredient_unit_name: present(self.ingredient_unit_name),
            ordering_index: present(self.ordering_index),
            notes: present(self.notes),
            actor: self.actor,
        }
    }
}
