use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cookbook_core::error::CoreError;
use cookbook_db::error::{AggregateStage, AggregateWriteError};
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `cookbook_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The transactional recipe + ingredients write failed.
    #[error(transparent)]
    Aggregate(#[from] AggregateWriteError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::NotFound { .. } => {
                    (StatusCode::NOT_FOUND, core.code(), core.to_string())
                }
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, core.code(), msg.clone())
                }
            },

            AppError::Database(err) => classify_sqlx_error(err),

            AppError::Aggregate(err) => {
                tracing::error!(stage = %err.stage, error = %err.source, "Recipe aggregate write failed");
                let (code, message) = match err.stage {
                    AggregateStage::Ingredients => (
                        "RECIPE_INGREDIENTS_CREATE_FAILED",
                        "Failed to create recipe ingredients",
                    ),
                    AggregateStage::Recipe | AggregateStage::Commit => {
                        ("RECIPE_CREATE_FAILED", "Failed to create recipe")
                    }
                };
                (StatusCode::INTERNAL_SERVER_ERROR, code, message.to_string())
            }

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
