//! Shared response envelope for API handlers.
//!
//! Successful responses use a `{ "data": ... }` envelope; errors use
//! `{ "error", "code" }` (see [`crate::error::AppError`]).

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: recipes }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
