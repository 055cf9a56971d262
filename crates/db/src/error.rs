use std::fmt;

/// Step of the recipe aggregate write that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateStage {
    /// Opening the transaction or inserting the recipe row.
    Recipe,
    /// Bulk-inserting the ingredient lines.
    Ingredients,
    /// Committing the transaction.
    Commit,
}

impl fmt::Display for AggregateStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Recipe => "recipe",
            Self::Ingredients => "ingredients",
            Self::Commit => "commit",
        })
    }
}

/// Failure while writing a recipe together with its ingredient lines.
///
/// The write is transactional, so a failure at any stage leaves no recipe row
/// behind; `stage` records how far it got.
#[derive(Debug, thiserror::Error)]
#[error("recipe aggregate write failed at the {stage} stage")]
pub struct AggregateWriteError {
    pub stage: AggregateStage,
    #[source]
    pub source: sqlx::Error,
}

impl AggregateWriteError {
    /// Adapter for `map_err` that tags a sqlx error with `stage`.
    pub fn at(stage: AggregateStage) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| Self { stage, source }
    }
}
