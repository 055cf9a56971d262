//! Use-case layer: pagination defaults, not-found mapping and the recipe
//! aggregate workflow, independent of HTTP.

pub mod catalog;
pub mod recipe;
pub mod store;

pub use catalog::CatalogUsecase;
pub use recipe::RecipeUsecase;
