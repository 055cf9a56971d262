//! Shared query parameter types for API handlers.
//!
//! Query values are taken as raw strings so that absent or unparseable
//! values fall back to defaults instead of rejecting the request.

use cookbook_core::pagination::Page;
use cookbook_core::types::DbId;
use cookbook_db::models::recipe::RecipeFilter;
use serde::Deserialize;

/// Parse an optional query value, treating anything unparseable as `0`.
fn lenient<T: std::str::FromStr + Default>(raw: Option<&str>) -> T {
    raw.and_then(|value| value.trim().parse().ok())
        .unwrap_or_default()
}

/// Filter ids are unsigned on the wire; anything outside `0..=i64::MAX`
/// is treated as "no filter".
fn lenient_id(raw: Option<&str>) -> DbId {
    DbId::try_from(lenient::<u64>(raw)).unwrap_or_default()
}

/// Generic pagination parameters (`?limit=&offset=`).
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl PaginationParams {
    /// Resolve to a [`Page`], applying the process-wide defaults.
    pub fn page(&self) -> Page {
        Page::resolve(
            lenient(self.limit.as_deref()),
            lenient(self.offset.as_deref()),
        )
    }
}

/// Query parameters for `GET /recipes`.
#[derive(Debug, Default, Deserialize)]
pub struct RecipeListParams {
    #[serde(flatten)]
    pub pagination: PaginationParams,
    pub category_id: Option<String>,
    pub ingredient_id: Option<String>,
}

impl RecipeListParams {
    pub fn filter(&self) -> RecipeFilter {
        RecipeFilter::from_ids(
            lenient_id(self.category_id.as_deref()),
            lenient_id(self.ingredient_id.as_deref()),
        )
    }
}

/// `?actor=` on delete endpoints. Absent means an empty actor.
#[derive(Debug, Default, Deserialize)]
pub struct ActorParams {
    #[serde(default)]
    pub actor: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use cookbook_core::pagination::{DEFAULT_LIMIT, MAX_LIMIT};

    fn pagination(limit: &str, offset: &str) -> PaginationParams {
        PaginationParams {
            limit: Some(limit.to_string()),
            offset: Some(offset.to_string()),
        }
    }

    #[test]
    fn absent_params_use_defaults() {
        assert_eq!(PaginationParams::default().page(), Page::default());
    }

    #[test]
    fn garbage_params_use_defaults() {
        assert_eq!(pagination("ten", "-x").page(), Page::default());
        assert_eq!(pagination("0", "-1").page().limit, DEFAULT_LIMIT);
    }

    #[test]
    fn valid_params_pass_through_and_limit_is_capped() {
        assert_eq!(pagination("5", "20").page(), Page::resolve(5, 20));
        assert_eq!(pagination("5000", "0").page().limit, MAX_LIMIT);
    }

    #[test]
    fn recipe_filter_ignores_zero_and_garbage() {
        let params = RecipeListParams {
            category_id: Some("5".into()),
            ingredient_id: Some("nine".into()),
            ..Default::default()
        };
        let filter = params.filter();
        assert_eq!(filter.category_id, Some(5));
        assert_eq!(filter.ingredient_id, None);

        let params = RecipeListParams {
            category_id: Some("0".into()),
            ingredient_id: Some("18446744073709551615".into()),
            ..Default::default()
        };
        assert_eq!(params.filter(), RecipeFilter::default());
    }
}
