//! Repository for the `recipe_ingredients` table.

use cookbook_core::types::DbId;
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};

use crate::models::recipe_ingredient::{
    CreateRecipeIngredient, RecipeIngredient, RecipeIngredientPatch,
};
use crate::repositories::update_statement::UpdateStatement;

/// Column list for recipe_ingredients queries.
const COLUMNS: &str = "id, recipe_id, ingredient_id, ingredient_name, ingredient_unit_name, \
                       amount, ordering_index, notes, created_at, created_by, updated_at, \
                       updated_by, is_deleted";

/// Columns written by a bulk insert, in bind order.
const INSERT_COLUMNS: &str = "recipe_id, ingredient_id, ingredient_name, ingredient_unit_name, \
                              amount, ordering_index, notes, created_by";

/// Bind parameters per inserted line.
const BINDS_PER_LINE: usize = 8;

/// Lines per `INSERT`; PostgreSQL caps a statement at 65535 bind parameters.
pub const MAX_LINES_PER_STATEMENT: usize = u16::MAX as usize / BINDS_PER_LINE;

/// Provides bulk insert and maintenance operations for ingredient lines.
pub struct RecipeIngredientRepo;

impl RecipeIngredientRepo {
    /// Insert all `lines` for `recipe_id` with multi-row statements.
    ///
    /// Lines are written in input order with `ordering_index` kept verbatim,
    /// at most [`MAX_LINES_PER_STATEMENT`] per statement. Callers wanting
    /// all-or-nothing pass a transaction's connection. An empty slice is a
    /// no-op.
    pub async fn bulk_create(
        conn: &mut PgConnection,
        recipe_id: DbId,
        lines: &[CreateRecipeIngredient],
    ) -> Result<Vec<RecipeIngredient>, sqlx::Error> {
        let mut inserted = Vec::with_capacity(lines.len());
        for batch in lines.chunks(MAX_LINES_PER_STATEMENT) {
            let mut builder = bulk_insert_query(recipe_id, batch);
            let rows = builder
                .build_query_as::<RecipeIngredient>()
                .fetch_all(&mut *conn)
                .await?;
            inserted.extend(rows);
        }

        tracing::debug!(recipe_id, count = inserted.len(), "Inserted recipe ingredient lines");
        Ok(inserted)
    }

    /// Apply a partial update. Returns `None` if no live line has this id.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        patch: &RecipeIngredientPatch,
    ) -> Result<Option<RecipeIngredient>, sqlx::Error> {
        let mut statement = UpdateStatement::new("recipe_ingredients");
        statement
            .set("amount", patch.amount)
            .set("ingredient_id", patch.ingredient_id)
            .set("ingredient_name", patch.ingredient_name.clone())
            .set("ingredient_unit_name", patch.ingredient_unit_name.clone())
            .set("ordering_index", patch.ordering_index)
            .set("notes", patch.notes.clone());
        statement
            .finish(id, patch.actor.clone(), COLUMNS)
            .build_query_as::<RecipeIngredient>()
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a line. Returns `None` if no live line has this id.
    pub async fn soft_delete(
        pool: &PgPool,
        id: DbId,
        actor: &str,
    ) -> Result<Option<RecipeIngredient>, sqlx::Error> {
        let mut statement = UpdateStatement::new("recipe_ingredients");
        statement.mark_deleted();
        statement
            .finish(id, actor.to_string(), COLUMNS)
            .build_query_as::<RecipeIngredient>()
            .fetch_optional(pool)
            .await
    }
}

/// `INSERT ... VALUES (...), (...) RETURNING ...` for a non-empty batch.
fn bulk_insert_query<'args>(
    recipe_id: DbId,
    lines: &'args [CreateRecipeIngredient],
) -> QueryBuilder<'args, Postgres> {
    let mut builder = QueryBuilder::new(format!(
        "INSERT INTO recipe_ingredients ({INSERT_COLUMNS}) "
    ));
    builder.push_values(lines, |mut row, line| {
        row.push_bind(recipe_id)
            .push_bind(line.ingredient_id)
            .push_bind(&line.ingredient_name)
            .push_bind(&line.ingredient_unit_name)
            .push_bind(line.amount)
            .push_bind(line.ordering_index)
            .push_bind(&line.notes)
            .push_bind(&line.actor);
    });
    builder.push(" RETURNING ").push(COLUMNS);
    builder
}
