pub mod catalog;
pub mod recipe;
pub mod recipe_ingredient;

use cookbook_core::error::CoreError;
use cookbook_core::types::{id_from_wire, parse_id, reference_from_wire, DbId};

use crate::error::{AppError, AppResult};

/// Malformed identifiers are a bad request, not a domain validation failure.
fn bad_request(err: CoreError) -> AppError {
    match err {
        CoreError::Validation(msg) => AppError::BadRequest(msg),
        other => AppError::Core(other),
    }
}

/// Parse the `{id}` path segment.
pub(crate) fn path_id(raw: &str) -> AppResult<DbId> {
    parse_id(raw).map_err(bad_request)
}

/// Convert a required id from a JSON body.
pub(crate) fn body_id(raw: u64) -> AppResult<DbId> {
    id_from_wire(raw).map_err(bad_request)
}

/// Convert an optional reference (`0` = none) from a JSON body.
pub(crate) fn body_reference(raw: u64) -> AppResult<DbId> {
    reference_from_wire(raw).map_err(bad_request)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn unparseable_path_id_is_bad_request() {
        assert_eq!(path_id("12").unwrap(), 12);
        assert_matches!(path_id("twelve"), Err(AppError::BadRequest(_)));
        assert_matches!(path_id("0"), Err(AppError::BadRequest(_)));
    }

    #[test]
    fn body_ids_outside_bigserial_range_are_bad_request() {
        assert_matches!(body_id(0), Err(AppError::BadRequest(_)));
        assert_matches!(body_id(u64::MAX), Err(AppError::BadRequest(_)));
        assert_eq!(body_reference(0).unwrap(), 0);
    }
}
