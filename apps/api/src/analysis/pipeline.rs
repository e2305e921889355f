//! Analysis pipeline: one linear pass per request.
//!
//! Flow: select provider (credential check, no I/O) → extract text →
//!       [`none` short-circuit] → require some text → build prompt → provider call →
//!       normalize → assemble.

use bytes::Bytes;
use serde::Serialize;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::analysis::insights::{response_schema, CvInsights, TextPair};
use crate::analysis::language::OutputLanguage;
use crate::analysis::normalizer::normalize;
use crate::analysis::prompts::build_prompt;
use crate::errors::AppError;
use crate::extract::ExtractionError;
use crate::llm_client::provider::{select_provider, ModelSelector};
use crate::state::AppState;

/// A validated analysis request, built from the multipart form.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub document: Bytes,
    pub objective: String,
    pub language: OutputLanguage,
    pub model: ModelSelector,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    pub success: bool,
    pub original_text_length: usize,
    pub insights: CvInsights,
}

/// Result for the `none` selector: only `summary.original` is filled, with the
/// first `preview_chars` characters of the extracted text.
pub fn preview_insights(text: &str, preview_chars: usize) -> CvInsights {
    CvInsights {
        summary: TextPair {
            original: text.chars().take(preview_chars).collect(),
            suggested: String::new(),
        },
        ..CvInsights::default()
    }
}

pub fn assemble(original_text_length: usize, insights: CvInsights) -> AnalysisResponse {
    AnalysisResponse {
        success: true,
        original_text_length,
        insights,
    }
}

/// Runs the whole pipeline. Either a complete response or an error; never partial.
pub async fn run_analysis(
    state: &AppState,
    request: AnalysisRequest,
) -> Result<AnalysisResponse, AppError> {
    let (provider_tag, model_name) = match &request.model {
        ModelSelector::None => ("none", ModelSelector::NONE.to_string()),
        ModelSelector::Model { provider, model } => (provider.tag(), model.clone()),
    };
    let span = info_span!(
        "analysis",
        analysis_id = %Uuid::new_v4(),
        provider = provider_tag,
        model = %model_name,
        language = ?request.language,
    );

    analyze(state, request).instrument(span).await
}

async fn analyze(state: &AppState, request: AnalysisRequest) -> Result<AnalysisResponse, AppError> {
    let adapter = select_provider(
        &request.model,
        &state.config.providers,
        &state.http,
        &state.config.app_url,
    )?;

    let text = state.extractor.extract(request.document).await?;
    let text_length = text.chars().count();
    info!(chars = text_length, "Document text extracted");

    let Some(adapter) = adapter else {
        info!("No model selected, returning extracted text preview");
        return Ok(assemble(
            text_length,
            preview_insights(&text, state.config.preview_chars),
        ));
    };

    if text.trim().is_empty() {
        return Err(ExtractionError::NoText.into());
    }

    let prompt = build_prompt(&request.objective, request.language, &text);
    info!(
        provider = adapter.provider().tag(),
        model = adapter.model(),
        prompt_chars = prompt.len(),
        "Calling provider"
    );
    let raw = adapter.complete(&prompt, &response_schema()).await?;
    info!(
        response_chars = raw.len(),
        schema_enforced = adapter.provider().enforces_schema(),
        "Model responded"
    );

    let insights = normalize(&raw)?;
    info!(
        experiences = insights.experiences.len(),
        titles = insights.target_titles.len(),
        "Analysis complete"
    );

    Ok(assemble(text_length, insights))
}
