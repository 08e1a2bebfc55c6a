use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::normalizer::ParseFailure;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every variant renders as a JSON body with an `error` string; the HTTP layer
/// never sees a panic or a bare error message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Model output could not be parsed")]
    Parse(ParseFailure),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ParseFailure> for AppError {
    fn from(failure: ParseFailure) -> Self {
        AppError::Parse(failure)
    }
}

/// Malformed or mistyped request bodies render as a 400 `{error}` like any
/// other validation failure.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::Llm(e) => {
                tracing::error!("LLM error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    json!({ "error": "The AI service could not complete the request. Please try again." }),
                )
            }
            AppError::Parse(failure) => {
                tracing::warn!("Unparseable model output ({} chars)", failure.raw.len());
                (
                    StatusCode::BAD_GATEWAY,
                    json!({ "error": failure.reason, "raw": failure.raw }),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "An internal server error occurred" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
