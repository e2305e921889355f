use std::sync::Arc;

use reqwest::Client;

use crate::config::Config;
use crate::extract::TextExtractor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Shared connection pool for every upstream provider call.
    pub http: Client,
    pub extractor: Arc<dyn TextExtractor>,
}
