use axum::{extract::State, Json};
use serde::Serialize;

use crate::llm_client::provider::{catalog_for, ModelSelector, Provider};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ModelEntry {
    pub id: &'static str,
    pub label: &'static str,
    /// `None` for the extraction-only entry.
    pub provider: Option<Provider>,
    /// Whether the provider's credential is configured on this server.
    pub available: bool,
}

#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    pub default: String,
    pub models: Vec<ModelEntry>,
}

/// GET /api/models
/// Lists the selectable models and whether each one can be used right now.
pub async fn models_handler(State(state): State<AppState>) -> Json<ModelsResponse> {
    let providers = &state.config.providers;
    let mut models: Vec<ModelEntry> = Provider::ALL
        .into_iter()
        .flat_map(|provider| {
            let available = providers.is_configured(provider);
            catalog_for(provider).iter().map(move |m| ModelEntry {
                id: m.id,
                label: m.label,
                provider: Some(provider),
                available,
            })
        })
        .collect();

    models.push(ModelEntry {
        id: ModelSelector::NONE,
        label: "No AI (text extraction only)",
        provider: None,
        available: true,
    });

    Json(ModelsResponse {
        default: state.config.default_model.clone(),
        models,
    })
}
