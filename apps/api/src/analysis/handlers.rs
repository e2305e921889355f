//! Axum route handlers for the Analysis API.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use tracing::debug;

use crate::analysis::language::OutputLanguage;
use crate::analysis::pipeline::{run_analysis, AnalysisRequest, AnalysisResponse};
use crate::errors::AppError;
use crate::llm_client::provider::ModelSelector;
use crate::state::AppState;

pub const MISSING_FIELDS: &str = "File and objective are required";

/// Raw multipart fields before defaults and validation.
#[derive(Debug, Default)]
struct AnalyzeForm {
    file: Option<Bytes>,
    objective: Option<String>,
    language: Option<String>,
    model: Option<String>,
}

/// POST /api/analyze
///
/// Multipart form: `file` (required), `objective` (required),
/// `language` (default `pt`), `model` (default from config).
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisResponse>, AppError> {
    let form = read_form(multipart).await?;
    let request = validate_form(form, &state.config.default_model)?;
    let response = run_analysis(&state, request).await?;
    Ok(Json(response))
}

async fn read_form(mut multipart: Multipart) -> Result<AnalyzeForm, AppError> {
    let mut form = AnalyzeForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                debug!(
                    filename = field.file_name().unwrap_or("unknown"),
                    content_type = field.content_type().unwrap_or("application/octet-stream"),
                    "Receiving upload"
                );
                form.file = Some(field.bytes().await.map_err(multipart_error)?);
            }
            "objective" => form.objective = Some(field.text().await.map_err(multipart_error)?),
            "language" => form.language = Some(field.text().await.map_err(multipart_error)?),
            "model" => form.model = Some(field.text().await.map_err(multipart_error)?),
            other => debug!(field = other, "Ignoring unknown form field"),
        }
    }

    Ok(form)
}

fn validate_form(form: AnalyzeForm, default_model: &str) -> Result<AnalysisRequest, AppError> {
    let objective = form.objective.filter(|o| !o.trim().is_empty());
    let (Some(document), Some(objective)) = (form.file, objective) else {
        return Err(AppError::Validation(MISSING_FIELDS.to_string()));
    };

    if document.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }

    let language = match form.language.as_deref().map(str::trim) {
        None | Some("") => OutputLanguage::default(),
        Some(tag) => OutputLanguage::from_tag(tag)
            .ok_or_else(|| AppError::Validation(format!("Unsupported language: {tag}")))?,
    };

    let model = match form.model.as_deref().map(str::trim) {
        None | Some("") => default_model,
        Some(raw) => raw,
    };

    Ok(AnalysisRequest {
        document,
        objective,
        language,
        model: ModelSelector::parse(model),
    })
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::Validation(format!("Failed to read multipart: {}", e.body_text()))
    }
}
