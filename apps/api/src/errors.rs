use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extract::ExtractionError;
use crate::llm_client::LlmError;

/// Message shown to clients for every failure that is not their fault.
/// The real cause is only logged.
pub const GENERIC_FAILURE: &str = "Failed to process CV";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// A selected provider has no credential. The message names the missing key.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Upstream error: {0}")]
    Upstream(LlmError),

    #[error("Parse error: {reason}")]
    Parse { raw: String, reason: String },
}

impl From<LlmError> for AppError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::MissingCredential(_) => AppError::Configuration(e.to_string()),
            LlmError::InvalidModel(_) => AppError::Validation(e.to_string()),
            LlmError::Parse { raw, reason } => AppError::Parse { raw, reason },
            other => AppError::Upstream(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::PayloadTooLarge(msg) => {
                tracing::warn!("Upload rejected: {msg}");
                (
                    StatusCode::PAYLOAD_TOO_LARGE,
                    "Uploaded file is too large".to_string(),
                )
            }
            AppError::Configuration(msg) => {
                tracing::error!("Configuration error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
            AppError::Extraction(e) => {
                tracing::error!("Text extraction failed: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE.to_string())
            }
            AppError::Upstream(e) => {
                tracing::error!("Upstream LLM error: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE.to_string())
            }
            AppError::Parse { raw, reason } => {
                tracing::error!(raw_output = %raw, "Model output is not valid JSON: {reason}");
                (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE.to_string())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
