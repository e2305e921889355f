mod analysis;
mod config;
mod errors;
mod export;
mod extract;
mod llm_client;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::extract::PdfTextExtractor;
use crate::llm_client::build_http_client;
use crate::llm_client::provider::Provider;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first so the log level is known
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},tower_http={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log,
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Analyzer API v{}", env!("CARGO_PKG_VERSION"));

    for provider in Provider::ALL {
        if config.providers.is_configured(provider) {
            info!(provider = provider.tag(), "Provider credential configured");
        } else {
            warn!(
                provider = provider.tag(),
                "{} not set; models from this provider will be rejected",
                provider.credential_env()
            );
        }
    }

    // One HTTP client for every upstream call; its timeout bounds each provider request
    let http = build_http_client(Duration::from_secs(config.llm_timeout_secs))?;
    info!("HTTP client initialized (timeout: {}s)", config.llm_timeout_secs);

    let state = AppState {
        config: Arc::new(config.clone()),
        http,
        extractor: Arc::new(PdfTextExtractor),
    };

    // TODO: restrict CORS origins to APP_URL once the client is deployed
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
