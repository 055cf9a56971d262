//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&PgPool` (or a transaction's connection, for statements that join a
//! transaction) as the first argument.

pub mod catalog_repo;
pub mod recipe_ingredient_repo;
pub mod recipe_repo;
pub mod update_statement;

pub use catalog_repo::{CatalogRepo, CategoryRepo, IngredientRepo, IngredientUnitRepo};
pub use recipe_ingredient_repo::RecipeIngredientRepo;
pub use recipe_repo::RecipeRepo;
