//! Row models and the parameter objects accepted by repositories.
//!
//! Row structs derive `FromRow` + `Serialize`; `Create*` structs carry insert
//! values and `*Patch` structs carry partial updates where `None` means
//! "leave the column untouched".

pub mod catalog;
pub mod recipe;
pub mod recipe_ingredient;
