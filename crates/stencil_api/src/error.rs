//! HTTP error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use stencil_core::{EngineError, StoreError};

/// Application-level error type for HTTP handlers.
///
/// Wraps [`EngineError`] and maps each variant to a status code and a
/// consistent JSON error body.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Convenience type alias for handler return values.
pub type ApiResult<T> = Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let ApiError::Engine(engine) = self;
        let (status, code, message) = match &engine {
            EngineError::TemplateNotFound(id) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("Template with id {id} not found"),
            ),
            EngineError::NameNotFound(name) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("No template named '{name}'"),
            ),
            EngineError::NameTaken(name) => (
                StatusCode::CONFLICT,
                "CONFLICT",
                format!("Template name already in use: {name}"),
            ),
            EngineError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            EngineError::Store(store) => match store {
                StoreError::NotFound(what) => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("Record not found: {what}"),
                ),
                StoreError::Constraint(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                StoreError::Backend(msg) => {
                    tracing::error!(error = %msg, "Store backend error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "STORE_ERROR",
                        msg.clone(),
                    )
                }
            },
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
