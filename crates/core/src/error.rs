use std::fmt;

use crate::types::DbId;

/// Entities that can be addressed by id through the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Category,
    Ingredient,
    IngredientUnit,
    Recipe,
    RecipeIngredient,
}

impl EntityKind {
    /// Human-readable entity name used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Category => "Category",
            Self::Ingredient => "Ingredient",
            Self::IngredientUnit => "Ingredient unit",
            Self::Recipe => "Recipe",
            Self::RecipeIngredient => "Recipe ingredient",
        }
    }

    /// Stable machine-readable code returned when the entity is missing.
    pub const fn not_found_code(self) -> &'static str {
        match self {
            Self::Category => "CATEGORY_NOT_FOUND",
            Self::Ingredient => "INGREDIENT_NOT_FOUND",
            Self::IngredientUnit => "INGREDIENT_UNIT_NOT_FOUND",
            Self::Recipe => "RECIPE_NOT_FOUND",
            Self::RecipeIngredient => "RECIPE_INGREDIENT_NOT_FOUND",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} is not found (id {id})")]
    NotFound { entity: EntityKind, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),
}

impl CoreError {
    /// Shorthand for [`CoreError::NotFound`].
    pub const fn not_found(entity: EntityKind, id: DbId) -> Self {
        Self::NotFound { entity, id }
    }

    /// Stable machine-readable code for this error.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NotFound { entity, .. } => entity.not_found_code(),
            Self::Validation(_) => "VALIDATION_ERROR",
        }
    }
}
