//! Repository shared by the `categories`, `ingredients` and
//! `ingredient_units` tables.

use std::marker::PhantomData;

use cookbook_core::pagination::Page;
use cookbook_core::types::DbId;
use sqlx::PgPool;

use crate::models::catalog::{
    CatalogEntity, CatalogPatch, Category, CreateCatalogEntry, Ingredient, IngredientUnit,
};
use crate::repositories::update_statement::UpdateStatement;

/// Column list shared by all catalog tables.
const COLUMNS: &str = "id, name, created_at, created_by, updated_at, updated_by, is_deleted";

/// Provides CRUD operations for a catalog table; `E` selects the table.
pub struct CatalogRepo<E>(PhantomData<E>);

pub type CategoryRepo = CatalogRepo<Category>;
pub type IngredientRepo = CatalogRepo<Ingredient>;
pub type IngredientUnitRepo = CatalogRepo<IngredientUnit>;

impl<E: CatalogEntity> CatalogRepo<E> {
    /// Insert a new row, returning it.
    pub async fn create(pool: &PgPool, input: &CreateCatalogEntry) -> Result<E, sqlx::Error> {
        let query = format!(
            "INSERT INTO {} (name, created_by) VALUES ($1, $2) RETURNING {COLUMNS}",
            E::TABLE
        );
        sqlx::query_as::<_, E>(&query)
            .bind(&input.name)
            .bind(&input.actor)
            .fetch_one(pool)
            .await
    }

    /// Find a live row by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<E>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM {} WHERE id = $1 AND is_deleted = FALSE",
            E::TABLE
        );
        sqlx::query_as::<_, E>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List live rows ordered by id.
    pub async fn list(pool: &PgPool, page: Page) -> Result<Vec<E>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM {} WHERE is_deleted = FALSE ORDER BY id ASC LIMIT $1 OFFSET $2",
            E::TABLE
        );
        sqlx::query_as::<_, E>(&query)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(pool)
            .await
    }

    /// Apply a partial update. Returns `None` if no live row has this id.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        patch: &CatalogPatch,
    ) -> Result<Option<E>, sqlx::Error> {
        let mut statement = UpdateStatement::new(E::TABLE);
        statement.set("name", patch.name.clone());
        statement
            .finish(id, patch.actor.clone(), COLUMNS)
            .build_query_as::<E>()
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a row. Returns `None` if no live row has this id.
    pub async fn soft_delete(
        pool: &PgPool,
        id: DbId,
        actor: &str,
    ) -> Result<Option<E>, sqlx::Error> {
        let mut statement = UpdateStatement::new(E::TABLE);
        statement.mark_deleted();
        statement
            .finish(id, actor.to_string(), COLUMNS)
            .build_query_as::<E>()
            .fetch_optional(pool)
            .await
    }
}
