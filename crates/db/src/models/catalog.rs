//! Catalog models: categories, ingredients and ingredient units.
//!
//! The three catalogs share one row shape and one parameter shape; they
//! differ only in the table they live in.

use cookbook_core::error::EntityKind;
use cookbook_core::presence::present;
use cookbook_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::postgres::PgRow;
use sqlx::FromRow;

/// A soft-deletable, partially-updatable catalog row type.
pub trait CatalogEntity:
    for<'r> FromRow<'r, PgRow> + Serialize + Send + Sync + Unpin + 'static
{
    /// Table the rows live in.
    const TABLE: &'static str;
    /// Entity reported in not-found errors.
    const KIND: EntityKind;

    fn id(&self) -> DbId;
}

/// A row from the `categories` table.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub created_by: String,
    pub updated_at: Option<Timestamp>,
    pub updated_by: Option<String>,
    pub is_deleted: bool,
}

impl CatalogEntity for Category {
    const TABLE: &'static str = "categories";
    const KIND: EntityKind = EntityKind::Category;

    fn id(&self) -> DbId {
        self.id
    }
}

/// A row from the `ingredients` table.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Ingredient {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub created_by: String,
    pub updated_at: Option<Timestamp>,
    pub updated_by: Option<String>,
    pub is_deleted: bool,
}

impl CatalogEntity for Ingredient {
    const TABLE: &'static str = "ingredients";
    const KIND: EntityKind = EntityKind::Ingredient;

    fn id(&self) -> DbId {
        self.id
    }
}

/// A row from the `ingredient_units` table.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct IngredientUnit {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub created_by: String,
    pub updated_at: Option<Timestamp>,
    pub updated_by: Option<String>,
    pub is_deleted: bool,
}

impl CatalogEntity for IngredientUnit {
    const TABLE: &'static str = "ingredient_units";
    const KIND: EntityKind = EntityKind::IngredientUnit;

    fn id(&self) -> DbId {
        self.id
    }
}

/// Values for inserting a catalog row.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateCatalogEntry {
    pub name: String,
    pub actor: String,
}

/// Partial update for a catalog row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogPatch {
    pub name: Option<String>,
    /// Always written to `updated_by`.
    pub actor: String,
}

impl CatalogPatch {
    /// Drop every field that fails the presence rule.
    pub fn normalized(self) -> Self {
        Self {
            name: present(self.name),
            actor: self.actor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_drops_empty_name_but_keeps_actor() {
        let patch = CatalogPatch {
            name: Some(String::new()),
            actor: "bob".into(),
        }
        .normalized();

        assert_eq!(patch.name, None);
        assert_eq!(patch.actor, "bob");
    }

    #[test]
    fn normalized_is_idempotent() {
        let patch = CatalogPatch {
            name: Some("Dessert".into()),
            actor: "alice".into(),
        };
        let once = patch.clone().normalized();
        assert_eq!(once.clone().normalized(), once);
    }
}
