//! Request extractors that reject with [`AppError`].

use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;

use crate::error::AppError;

/// `axum::Json` whose rejections render as a `BAD_REQUEST` JSON error.
///
/// ```ignore
/// async fn create(AppJson(input): AppJson<CreateRecipeRequest>) -> AppResult<StatusCode> {
///     ...
/// }
/// ```
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}
