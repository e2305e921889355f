//! Axum route handlers for the Export API.

use axum::{extract::rejection::JsonRejection, Json};
use tracing::info;

use crate::errors::AppError;
use crate::export::finalize::{finalize, ExportRequest, RenderDocument};

/// POST /api/export
///
/// Applies accept/decline selections to an analysis result and returns the
/// document the renderer consumes.
pub async fn handle_export(
    payload: Result<Json<ExportRequest>, JsonRejection>,
) -> Result<Json<RenderDocument>, AppError> {
    let Json(request) = payload.map_err(|e| {
        AppError::Validation(format!("Invalid export request: {}", e.body_text()))
    })?;

    let document = finalize(request);
    info!(
        theme = ?document.theme.id,
        language = ?document.language,
        experiences = document.data.experiences.len(),
        "Export document finalized"
    );
    Ok(Json(document))
}
