use anyhow::{Context, Result};

use crate::llm_client::provider::Provider;

/// Application configuration loaded from environment variables.
/// Provider credentials are optional here; a missing one only fails the
/// requests that select that provider.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Upper bound for a single upstream LLM call, in seconds.
    pub llm_timeout_secs: u64,
    /// Characters of extracted text returned as `summary.original` when no model is used.
    pub preview_chars: usize,
    pub max_upload_bytes: usize,
    pub default_model: String,
    /// Public URL of the client app, sent as the OpenRouter referer.
    pub app_url: String,
    pub providers: ProviderConfig,
}

/// Credential and base URL for one upstream provider.
#[derive(Debug, Clone, Default)]
pub struct ProviderSettings {
    pub api_key: Option<String>,
    pub base_url: String,
}

impl ProviderSettings {
    fn from_env(provider: Provider) -> Self {
        let base_url = optional_env(provider.base_url_env())
            .unwrap_or_else(|| provider.default_base_url().to_string());
        Self {
            api_key: optional_env(provider.credential_env()),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProviderConfig {
    pub gemini: ProviderSettings,
    pub groq: ProviderSettings,
    pub openrouter: ProviderSettings,
    pub mistral: ProviderSettings,
}

impl ProviderConfig {
    pub fn from_env() -> Self {
        Self {
            gemini: ProviderSettings::from_env(Provider::Gemini),
            groq: ProviderSettings::from_env(Provider::Groq),
            openrouter: ProviderSettings::from_env(Provider::OpenRouter),
            mistral: ProviderSettings::from_env(Provider::Mistral),
        }
    }

    pub fn settings(&self, provider: Provider) -> &ProviderSettings {
        match provider {
            Provider::Gemini => &self.gemini,
            Provider::Groq => &self.groq,
            Provider::OpenRouter => &self.openrouter,
            Provider::Mistral => &self.mistral,
        }
    }

    pub fn is_configured(&self, provider: Provider) -> bool {
        self.settings(provider).api_key.is_some()
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_env("PORT", 8080).context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            llm_timeout_secs: parse_env("LLM_TIMEOUT_SECS", 60)
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            preview_chars: parse_env("PREVIEW_CHARS", 500)
                .context("PREVIEW_CHARS must be a non-negative integer")?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)
                .context("MAX_UPLOAD_BYTES must be a non-negative integer")?,
            default_model: std::env::var("DEFAULT_MODEL")
                .unwrap_or_else(|_| "gemini-2.0-flash".to_string()),
            app_url: std::env::var("APP_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            providers: ProviderConfig::from_env(),
        })
    }
}

/// Empty values count as unset so `GROQ_API_KEY=` in a .env file does not
/// route requests with a blank bearer token.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Invalid value '{raw}' for environment variable '{key}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
impl Config {
    /// Config with no credentials and no env lookups, for router and pipeline tests.
    pub fn for_tests() -> Self {
        let providers = ProviderConfig {
            gemini: ProviderSettings {
                api_key: None,
                base_url: Provider::Gemini.default_base_url().to_string(),
            },
            groq: ProviderSettings {
                api_key: None,
                base_url: Provider::Groq.default_base_url().to_string(),
            },
            openrouter: ProviderSettings {
                api_key: None,
                base_url: Provider::OpenRouter.default_base_url().to_string(),
            },
            mistral: ProviderSettings {
                api_key: None,
                base_url: Provider::Mistral.default_base_url().to_string(),
            },
        };
        Config {
            port: 0,
            rust_log: "debug".to_string(),
            llm_timeout_secs: 5,
            preview_chars: 500,
            max_upload_bytes: 1024 * 1024,
            default_model: "gemini-2.0-flash".to_string(),
            app_url: "http://localhost:3000".to_string(),
            providers,
        }
    }
}
