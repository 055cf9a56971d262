//! Repository for the `recipes` table and the recipe aggregate.

use cookbook_core::pagination::Page;
use cookbook_core::types::{DbId, Timestamp};
use sqlx::{Executor, FromRow, PgPool, Postgres, QueryBuilder};

use crate::error::{AggregateStage, AggregateWriteError};
use crate::models::recipe::{
    CreateRecipe, Recipe, RecipeFilter, RecipePatch, RecipeSummary, RecipeSummaryLookup,
};
use crate::models::recipe_ingredient::{CreateRecipeIngredient, RecipeIngredient};
use crate::repositories::recipe_ingredient_repo::RecipeIngredientRepo;
use crate::repositories::update_statement::UpdateStatement;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, category_id, created_at, created_by, \
                       updated_at, updated_by, is_deleted";

/// Recipe header joined with its live lines, ordered for folding.
///
/// Line columns are aliased with a `line_` prefix and are all `NULL` when
/// the recipe has no live lines.
const SUMMARY_QUERY: &str = "\
    SELECT r.id, r.name, r.description, r.category_id, r.created_at, r.created_by, \
           r.updated_at, r.updated_by, r.is_deleted, \
           ri.id AS line_id, ri.ingredient_id AS line_ingredient_id, \
           ri.ingredient_name AS line_ingredient_name, \
           ri.ingredient_unit_name AS line_ingredient_unit_name, \
           ri.amount AS line_amount, ri.ordering_index AS line_ordering_index, \
           ri.notes AS line_notes, ri.created_at AS line_created_at, \
           ri.created_by AS line_created_by, ri.updated_at AS line_updated_at, \
           ri.updated_by AS line_updated_by \
    FROM recipes r \
    LEFT JOIN recipe_ingredients ri ON ri.recipe_id = r.id AND ri.is_deleted = FALSE \
    WHERE r.id = $1 \
    ORDER BY ri.ordering_index ASC NULLS LAST, ri.id ASC";

/// Provides CRUD operations for recipes.
pub struct RecipeRepo;

impl RecipeRepo {
    /// Insert a recipe row only, returning it.
    pub async fn create<'e, E>(executor: E, input: &CreateRecipe) -> Result<Recipe, sqlx::Error>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let query = format!(
            "INSERT INTO recipes (name, description, category_id, created_by)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Recipe>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.category_id)
            .bind(&input.actor)
            .fetch_one(executor)
            .await
    }

    /// Insert a recipe and all of its ingredient lines in one transaction.
    ///
    /// Nothing is persisted unless both steps succeed.
    pub async fn create_with_ingredients(
        pool: &PgPool,
        input: &CreateRecipe,
    ) -> Result<RecipeSummary, AggregateWriteError> {
        let mut tx = pool
            .begin()
            .await
            .map_err(AggregateWriteError::at(AggregateStage::Recipe))?;

        let recipe = Self::create(&mut *tx, input)
            .await
            .map_err(AggregateWriteError::at(AggregateStage::Recipe))?;

        let ingredients = RecipeIngredientRepo::bulk_create(&mut *tx, recipe.id, &input.ingredients)
            .await
            .map_err(AggregateWriteError::at(AggregateStage::Ingredients))?;

        tx.commit()
            .await
            .map_err(AggregateWriteError::at(AggregateStage::Commit))?;

        Ok(RecipeSummary {
            recipe,
            ingredients,
        })
    }

    /// Append lines to a live recipe. Returns `None`, inserting nothing, if
    /// no live recipe has this id.
    ///
    /// The recipe row stays locked until the lines are committed, so a
    /// concurrent soft delete either lands first or waits.
    pub async fn append_ingredients(
        pool: &PgPool,
        recipe_id: DbId,
        lines: &[CreateRecipeIngredient],
    ) -> Result<Option<Vec<RecipeIngredient>>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let locked = sqlx::query_scalar::<_, DbId>(
            "SELECT id FROM recipes WHERE id = $1 AND is_deleted = FALSE FOR UPDATE",
        )
        .bind(recipe_id)
        .fetch_optional(&mut *tx)
        .await?;
        if locked.is_none() {
            return Ok(None);
        }

        let inserted = RecipeIngredientRepo::bulk_create(&mut *tx, recipe_id, lines).await?;
        tx.commit().await?;
        Ok(Some(inserted))
    }

    /// List live recipes matching `filter`, ordered by id.
    pub async fn list(
        pool: &PgPool,
        filter: &RecipeFilter,
        page: Page,
    ) -> Result<Vec<Recipe>, sqlx::Error> {
        let mut builder = list_query(filter, page);
        let recipes = builder.build_query_as::<Recipe>().fetch_all(pool).await?;
        Ok(recipes)
    }

    /// Apply a partial update. Returns `None` if no live recipe has this id.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        patch: &RecipePatch,
    ) -> Result<Option<Recipe>, sqlx::Error> {
        let mut statement = UpdateStatement::new("recipes");
        statement
            .set("name", patch.name.clone())
            .set("description", patch.description.clone())
            .set("category_id", patch.category_id);
        statement
            .finish(id, patch.actor.clone(), COLUMNS)
            .build_query_as::<Recipe>()
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a recipe. Returns `None` if no live recipe has this id.
    ///
    /// The recipe's lines are left as they are; they stop appearing anywhere
    /// because every read goes through the recipe.
    pub async fn soft_delete(
        pool: &PgPool,
        id: DbId,
        actor: &str,
    ) -> Result<Option<Recipe>, sqlx::Error> {
        let mut statement = UpdateStatement::new("recipes");
        statement.mark_deleted();
        statement
            .finish(id, actor.to_string(), COLUMNS)
            .build_query_as::<Recipe>()
            .fetch_optional(pool)
            .await
    }

    /// Fetch a recipe with its live ingredient lines.
    pub async fn get_summary(pool: &PgPool, id: DbId) -> Result<RecipeSummaryLookup, sqlx::Error> {
        let rows = sqlx::query_as::<_, SummaryRow>(SUMMARY_QUERY)
            .bind(id)
            .fetch_all(pool)
            .await?;
        Ok(fold_summary_rows(rows))
    }
}

/// `SELECT` for [`RecipeRepo::list`]; filters are added only when set.
fn list_query(filter: &RecipeFilter, page: Page) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!(
        "SELECT {COLUMNS} FROM recipes r WHERE r.is_deleted = FALSE"
    ));

    if let Some(category_id) = filter.category_id {
        builder.push(" AND r.category_id = ").push_bind(category_id);
    }

    if let Some(ingredient_id) = filter.ingredient_id {
        builder
            .push(
                " AND EXISTS (SELECT 1 FROM recipe_ingredients ri \
                 WHERE ri.recipe_id = r.id AND ri.is_deleted = FALSE AND ri.ingredient_id = ",
            )
            .push_bind(ingredient_id)
            .push(")");
    }

    builder
        .push(" ORDER BY r.id ASC LIMIT ")
        .push_bind(page.limit)
        .push(" OFFSET ")
        .push_bind(page.offset);
    builder
}

/// One row of [`SUMMARY_QUERY`].
#[derive(Debug, FromRow)]
struct SummaryRow {
    #[sqlx(flatten)]
    recipe: Recipe,
    line_id: Option<DbId>,
    line_ingredient_id: Option<DbId>,
    line_ingredient_name: Option<String>,
    line_ingredient_unit_name: Option<String>,
    line_amount: Option<f64>,
    line_ordering_index: Option<i32>,
    line_notes: Option<String>,
    line_created_at: Option<Timestamp>,
    line_created_by: Option<String>,
    line_updated_at: Option<Timestamp>,
    line_updated_by: Option<String>,
}

impl SummaryRow {
    /// The joined line, if the left join matched one.
    fn into_line(self) -> Option<RecipeIngredient> {
        let (Some(id), Some(created_at)) = (self.line_id, self.line_created_at) else {
            return None;
        };

        Some(RecipeIngredient {
            id,
            recipe_id: self.recipe.id,
            ingredient_id: self.line_ingredient_id.unwrap_or_default(),
            ingredient_name: self.line_ingredient_name.unwrap_or_default(),
            ingredient_unit_name: self.line_ingredient_unit_name.unwrap_or_default(),
            amount: self.line_amount.unwrap_or_default(),
            ordering_index: self.line_ordering_index.unwrap_or_default(),
            notes: self.line_notes.unwrap_or_default(),
            created_at,
            created_by: self.line_created_by.unwrap_or_default(),
            updated_at: self.line_updated_at,
            updated_by: self.line_updated_by,
            is_deleted: false,
        })
    }
}

/// Fold the flat join rows into one header plus its ordered lines.
fn fold_summary_rows(rows: Vec<SummaryRow>) -> RecipeSummaryLookup {
    let Some(recipe) = rows.first().map(|row| row.recipe.clone()) else {
        return RecipeSummaryLookup::Missing;
    };

    if recipe.is_deleted {
        return RecipeSummaryLookup::Deleted;
    }

    let ingredients = rows.into_iter().filter_map(SummaryRow::into_line).collect();

    RecipeSummaryLookup::Found(RecipeSummary {
        recipe,
        ingredients,
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn header(id: DbId, is_deleted: bool) -> Recipe {
        Recipe {
            id,
            name: "Soup".into(),
            category_id: 1,
            created_by: "alice".into(),
            is_deleted,
            ..Default::default()
        }
    }

    fn row(recipe: &Recipe, line: Option<(DbId, DbId, i32)>) -> SummaryRow {
        SummaryRow {
            recipe: recipe.clone(),
            line_id: line.map(|(id, _, _)| id),
            line_ingredient_id: line.map(|(_, ingredient_id, _)| ingredient_id),
            line_ingredient_name: line.map(|_| "Carrot".to_string()),
            line_ingredient_unit_name: line.map(|_| "g".to_string()),
            line_amount: line.map(|_| 50.0),
            line_ordering_index: line.map(|(_, _, index)| index),
            line_notes: line.map(|_| String::new()),
            line_created_at: line.map(|_| Timestamp::default()),
            line_created_by: line.map(|_| "alice".to_string()),
            line_updated_at: None,
            line_updated_by: None,
        }
    }

    #[test]
    fn no_rows_means_missing() {
        assert_eq!(fold_summary_rows(Vec::new()), RecipeSummaryLookup::Missing);
    }

    #[test]
    fn deleted_header_means_deleted() {
        let recipe = header(4, true);
        let rows = vec![row(&recipe, Some((1, 2, 0)))];
        assert_eq!(fold_summary_rows(rows), RecipeSummaryLookup::Deleted);
    }

    #[test]
    fn unmatched_left_join_yields_empty_line_list() {
        let recipe = header(4, false);
        let lookup = fold_summary_rows(vec![row(&recipe, None)]);

        assert_matches!(lookup, RecipeSummaryLookup::Found(summary) => {
            assert_eq!(summary.recipe, recipe);
            assert!(summary.ingredients.is_empty());
        });
    }

    #[test]
    fn lines_keep_row_order_and_take_recipe_id_from_header() {
        let recipe = header(9, false);
        let rows = vec![
            row(&recipe, Some((21, 3, 0))),
            row(&recipe, Some((20, 2, 1))),
        ];

        let summary = fold_summary_rows(rows).into_found().unwrap();
        let ids: Vec<_> = summary.ingredients.iter().map(|l| l.ingredient_id).collect();

        assert_eq!(ids, vec![3, 2]);
        assert!(summary.ingredients.iter().all(|l| l.recipe_id == 9));
    }

    #[test]
    fn list_query_without_filters() {
        let builder = list_query(&RecipeFilter::default(), Page::default());
        let sql = builder.sql();

        assert!(sql.ends_with("WHERE r.is_deleted = FALSE ORDER BY r.id ASC LIMIT $1 OFFSET $2"));
        assert!(!sql.contains("category_id ="));
        assert!(!sql.contains("EXISTS"));
    }

    #[test]
    fn list_query_combines_both_filters() {
        let filter = RecipeFilter::from_ids(5, 9);
        let builder = list_query(&filter, Page::resolve(20, 40));
        let sql = builder.sql();

        assert!(sql.contains(" AND r.category_id = $1"));
        assert!(sql.contains("AND ri.ingredient_id = $2)"));
        assert!(sql.ends_with("LIMIT $3 OFFSET $4"));
    }

    #[test]
    fn list_query_with_ingredient_filter_only() {
        let filter = RecipeFilter::from_ids(0, 9);
        let builder = list_query(&filter, Page::default());
        let sql = builder.sql();

        assert!(!sql.contains("r.category_id ="));
        assert!(sql.contains("AND ri.ingredient_id = $1)"));
        assert!(sql.ends_with("LIMIT $2 OFFSET $3"));
    }
}
