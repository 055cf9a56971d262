//! Builder for `UPDATE` statements that touch only the provided columns.
//!
//! Column names are always `&'static str` constants; every value goes
//! through `push_bind`, so caller data never reaches the SQL text.

use cookbook_core::types::DbId;
use sqlx::{Encode, Postgres, QueryBuilder, Type};

/// Columns stamped on every update, soft deletes included.
pub const AUDIT_COLUMNS: [&str; 2] = ["updated_at", "updated_by"];

/// An `UPDATE <table> SET ...` under construction.
///
/// Business columns are appended with [`set`](Self::set); the audit columns
/// and the `WHERE` clause are added by [`finish`](Self::finish). Because the
/// audit columns always close the `SET` list, any subset of business columns
/// (including none) produces valid SQL.
pub struct UpdateStatement<'args> {
    builder: QueryBuilder<'args, Postgres>,
}

impl<'args> UpdateStatement<'args> {
    pub fn new(table: &'static str) -> Self {
        let mut builder = QueryBuilder::new("UPDATE ");
        builder.push(table).push(" SET ");
        Self { builder }
    }

    /// Assign `column` if `value` is `Some`.
    pub fn set<T>(&mut self, column: &'static str, value: Option<T>) -> &mut Self
    where
        T: 'args + Encode<'args, Postgres> + Type<Postgres> + Send,
    {
        if let Some(value) = value {
            self.builder.push(column).push(" = ").push_bind(value).push(", ");
        }
        self
    }

    /// Flag the row as soft-deleted.
    pub fn mark_deleted(&mut self) -> &mut Self {
        self.builder.push("is_deleted = TRUE, ");
        self
    }

    /// Stamp the audit columns and target the live row with `id`.
    ///
    /// Soft-deleted rows never match, so updating or deleting them again
    /// returns no row.
    pub fn finish(
        mut self,
        id: DbId,
        actor: String,
        returning: &'static str,
    ) -> QueryBuilder<'args, Postgres> {
        let [updated_at, updated_by] = AUDIT_COLUMNS;
        self.builder
            .push(updated_at)
            .push(" = NOW(), ")
            .push(updated_by)
            .push(" = ")
            .push_bind(actor)
            .push(" WHERE id = ")
            .push_bind(id)
            .push(" AND is_deleted = FALSE RETURNING ")
            .push(returning);
        self.builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RETURNING: &str = "id, name";

    #[test]
    fn all_absent_sets_only_audit_columns() {
        let mut statement = UpdateStatement::new("categories");
        statement.set::<String>("name", None);
        let builder = statement.finish(1, "bob".into(), RETURNING);

        assert_eq!(
            builder.sql(),
            "UPDATE categories SET updated_at = NOW(), updated_by = $1 \
             WHERE id = $2 AND is_deleted = FALSE RETURNING id, name"
        );
    }

    #[test]
    fn present_columns_get_sequential_placeholders() {
        let mut statement = UpdateStatement::new("recipes");
        statement
            .set("name", Some("Soup".to_string()))
            .set::<String>("description", None)
            .set("category_id", Some(4_i64));
        let builder = statement.finish(7, "alice".into(), RETURNING);

        assert_eq!(
            builder.sql(),
            "UPDATE recipes SET name = $1, category_id = $2, updated_at = NOW(), \
             updated_by = $3 WHERE id = $4 AND is_deleted = FALSE RETURNING id, name"
        );
    }

    #[test]
    fn soft_delete_touches_only_flag_and_audit_columns() {
        let mut statement = UpdateStatement::new("ingredients");
        statement.mark_deleted();
        let builder = statement.finish(3, String::new(), RETURNING);
        let sql = builder.sql();

        assert!(sql.starts_with(
            "UPDATE ingredients SET is_deleted = TRUE, updated_at = NOW(), updated_by = $1 "
        ));
        assert!(!sql.contains("name ="));
    }

    #[test]
    fn caller_values_never_reach_sql_text() {
        let mut statement = UpdateStatement::new("categories");
        statement.set("name", Some("x'; DROP TABLE categories; --".to_string()));
        let builder = statement.finish(1, "mallory".into(), RETURNING);

        assert!(!builder.sql().contains("DROP TABLE"));
        assert!(!builder.sql().contains("mallory"));
    }
}
