//! Provider selection: maps a model selector string to exactly one upstream adapter.
//!
//! Selector grammar:
//! - `none`: no model; the caller skips generation entirely.
//! - `<tag>:<model>` with a known tag: that provider, model = text after the FIRST colon.
//! - anything else: the schema-enforcing provider (Gemini), whole string as model name.
//!
//! Credentials are checked here, before any network call is attempted.

use reqwest::Client;
use serde::Serialize;

use crate::config::ProviderConfig;
use crate::llm_client::gemini::GeminiProvider;
use crate::llm_client::openai_compat::ChatCompletionProvider;
use crate::llm_client::{CompletionProvider, LlmError};

/// The closed set of upstream provider families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Schema-enforcing structured-output provider.
    Gemini,
    Groq,
    OpenRouter,
    Mistral,
}

impl Provider {
    pub const ALL: [Provider; 4] = [
        Provider::Gemini,
        Provider::Groq,
        Provider::OpenRouter,
        Provider::Mistral,
    ];

    pub const fn tag(self) -> &'static str {
        match self {
            Provider::Gemini => "gemini",
            Provider::Groq => "groq",
            Provider::OpenRouter => "openrouter",
            Provider::Mistral => "mistral",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.tag() == tag)
    }

    /// Environment variable holding this provider's API key.
    pub const fn credential_env(self) -> &'static str {
        match self {
            Provider::Gemini => "GEMINI_API_KEY",
            Provider::Groq => "GROQ_API_KEY",
            Provider::OpenRouter => "OPENROUTER_API_KEY",
            Provider::Mistral => "MISTRAL_API_KEY",
        }
    }

    pub const fn base_url_env(self) -> &'static str {
        match self {
            Provider::Gemini => "GEMINI_BASE_URL",
            Provider::Groq => "GROQ_BASE_URL",
            Provider::OpenRouter => "OPENROUTER_BASE_URL",
            Provider::Mistral => "MISTRAL_BASE_URL",
        }
    }

    pub const fn default_base_url(self) -> &'static str {
        match self {
            Provider::Gemini => "https://generativelanguage.googleapis.com",
            Provider::Groq => "https://api.groq.com/openai/v1",
            Provider::OpenRouter => "https://openrouter.ai/api/v1",
            Provider::Mistral => "https://api.mistral.ai/v1",
        }
    }

    pub const fn enforces_schema(self) -> bool {
        matches!(self, Provider::Gemini)
    }
}

/// Parsed form of the `model` form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSelector {
    None,
    Model { provider: Provider, model: String },
}

impl ModelSelector {
    pub const NONE: &'static str = "none";

    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw == Self::NONE {
            return ModelSelector::None;
        }

        if let Some((tag, model)) = raw.split_once(':') {
            if let Some(provider) = Provider::from_tag(tag) {
                if !model.is_empty() {
                    return ModelSelector::Model {
                        provider,
                        model: model.to_string(),
                    };
                }
            }
        }

        ModelSelector::Model {
            provider: Provider::Gemini,
            model: raw.to_string(),
        }
    }
}

/// Resolves a selector into a ready-to-call adapter.
///
/// Returns `Ok(None)` for `ModelSelector::None`. Fails with
/// `LlmError::MissingCredential` when the selected provider has no API key.
pub fn select_provider(
    selector: &ModelSelector,
    providers: &ProviderConfig,
    http: &Client,
    app_url: &str,
) -> Result<Option<Box<dyn CompletionProvider>>, LlmError> {
    let (provider, model) = match selector {
        ModelSelector::None => return Ok(None),
        ModelSelector::Model { provider, model } => (*provider, model.clone()),
    };

    // Gemini takes the model name as a URL path segment.
    if provider == Provider::Gemini && !is_path_safe_model(&model) {
        return Err(LlmError::InvalidModel(model));
    }

    let settings = providers.settings(provider);
    let api_key = settings
        .api_key
        .clone()
        .ok_or(LlmError::MissingCredential(provider.credential_env()))?;

    let adapter: Box<dyn CompletionProvider> = match provider {
        Provider::Gemini => Box::new(GeminiProvider::new(
            http.clone(),
            &settings.base_url,
            api_key,
            model,
        )),
        Provider::OpenRouter => Box::new(
            ChatCompletionProvider::new(provider, http.clone(), &settings.base_url, api_key, model)
                .with_header("HTTP-Referer", app_url)
                .with_header("X-Title", "Resume AI Analyzer"),
        ),
        Provider::Groq | Provider::Mistral => Box::new(ChatCompletionProvider::new(
            provider,
            http.clone(),
            &settings.base_url,
            api_key,
            model,
        )),
    };

    Ok(Some(adapter))
}

fn is_path_safe_model(model: &str) -> bool {
    !model.is_empty()
        && model
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

// ────────────────────────────────────────────────────────────────────────────
// Model catalog
// ────────────────────────────────────────────────────────────────────────────

/// A selectable model as offered to the client.
#[derive(Debug, Clone, Copy)]
pub struct CatalogModel {
    pub id: &'static str,
    pub label: &'static str,
}

pub const GEMINI_MODELS: &[CatalogModel] = &[
    CatalogModel {
        id: "gemini-2.0-flash",
        label: "Gemini 2.0 Flash",
    },
    CatalogModel {
        id: "gemini-1.5-flash",
        label: "Gemini 1.5 Flash",
    },
    CatalogModel {
        id: "gemini-1.5-pro",
        label: "Gemini 1.5 Pro",
    },
    CatalogModel {
        id: "gemini-2.5-flash",
        label: "Gemini 2.5 Flash (preview)",
    },
];

pub const GROQ_MODELS: &[CatalogModel] = &[
    CatalogModel {
        id: "groq:llama-3.3-70b-versatile",
        label: "Llama 3.3 70B",
    },
    CatalogModel {
        id: "groq:llama-3.1-8b-instant",
        label: "Llama 3.1 8B",
    },
    CatalogModel {
        id: "groq:mixtral-8x7b-32768",
        label: "Mixtral 8x7B",
    },
    CatalogModel {
        id: "groq:gemma2-9b-it",
        label: "Gemma 2 9B",
    },
];

pub const OPENROUTER_MODELS: &[CatalogModel] = &[
    CatalogModel {
        id: "openrouter:meta-llama/llama-3.1-8b-instruct:free",
        label: "Llama 3.1 8B (free)",
    },
    CatalogModel {
        id: "openrouter:mistralai/mistral-7b-instruct:free",
        label: "Mistral 7B (free)",
    },
    CatalogModel {
        id: "openrouter:google/gemma-3-12b-it:free",
        label: "Gemma 3 12B (free)",
    },
    CatalogModel {
        id: "openrouter:anthropic/claude-3-haiku",
        label: "Claude 3 Haiku",
    },
    CatalogModel {
        id: "openrouter:openai/gpt-4o-mini",
        label: "GPT-4o Mini",
    },
];

pub const MISTRAL_MODELS: &[CatalogModel] = &[
    CatalogModel {
        id: "mistral:mistral-small-latest",
        label: "Mistral Small",
    },
    CatalogModel {
        id: "mistral:open-mistral-nemo",
        label: "Mistral Nemo",
    },
];

pub fn catalog_for(provider: Provider) -> &'static [CatalogModel] {
    match provider {
        Provider::Gemini => GEMINI_MODELS,
        Provider::Groq => GROQ_MODELS,
        Provider::OpenRouter => OPENROUTER_MODELS,
        Provider::Mistral => MISTRAL_MODELS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn configured(providers: &[Provider]) -> ProviderConfig {
        let mut config = Config::for_tests().providers;
        for provider in providers {
            let settings = match provider {
                Provider::Gemini => &mut config.gemini,
                Provider::Groq => &mut config.groq,
                Provider::OpenRouter => &mut config.openrouter,
                Provider::Mistral => &mut config.mistral,
            };
            settings.api_key = Some(format!("{}-key", provider.tag()));
        }
        config
    }

    #[test]
    fn test_parse_none_sentinel() {
        assert_eq!(ModelSelector::parse("none"), ModelSelector::None);
        assert_eq!(ModelSelector::parse("  none "), ModelSelector::None);
    }

    #[test]
    fn test_parse_bare_model_routes_to_gemini() {
        assert_eq!(
            ModelSelector::parse("gemini-2.0-flash"),
            ModelSelector::Model {
                provider: Provider::Gemini,
                model: "gemini-2.0-flash".to_string()
            }
        );
    }

    #[test]
    fn test_parse_groq_tag() {
        assert_eq!(
            ModelSelector::parse("groq:llama-3.3-70b-versatile"),
            ModelSelector::Model {
                provider: Provider::Groq,
                model: "llama-3.3-70b-versatile".to_string()
            }
        );
    }

    #[test]
    fn test_parse_openrouter_model_keeps_inner_colons() {
        assert_eq!(
            ModelSelector::parse("openrouter:meta-llama/llama-3.1-8b-instruct:free"),
            ModelSelector::Model {
                provider: Provider::OpenRouter,
                model: "meta-llama/llama-3.1-8b-instruct:free".to_string()
            }
        );
    }

    #[test]
    fn test_parse_unknown_tag_falls_back_to_gemini_with_full_selector() {
        assert_eq!(
            ModelSelector::parse("acme:turbo"),
            ModelSelector::Model {
                provider: Provider::Gemini,
                model: "acme:turbo".to_string()
            }
        );
    }

    #[test]
    fn test_select_none_makes_no_adapter() {
        let http = Client::new();
        let adapter =
            select_provider(&ModelSelector::None, &configured(&[]), &http, "http://x").unwrap();
        assert!(adapter.is_none());
    }

    #[test]
    fn test_select_missing_credential_names_env_key() {
        let http = Client::new();
        let selector = ModelSelector::parse("groq:llama-3.3-70b-versatile");
        let err = select_provider(&selector, &configured(&[Provider::Gemini]), &http, "http://x")
            .err()
            .expect("missing groq key must fail");
        assert!(matches!(err, LlmError::MissingCredential("GROQ_API_KEY")));
    }

    #[test]
    fn test_select_routes_bare_model_to_schema_enforcing_provider() {
        let http = Client::new();
        let selector = ModelSelector::parse("gemini-2.0-flash");
        let providers = configured(&[Provider::Gemini]);
        let adapter = select_provider(&selector, &providers, &http, "http://x")
            .unwrap()
            .unwrap();
        assert_eq!(adapter.provider(), Provider::Gemini);
        assert!(adapter.provider().enforces_schema());
        assert_eq!(adapter.model(), "gemini-2.0-flash");
    }

    #[test]
    fn test_select_rejects_gemini_model_with_path_characters() {
        let http = Client::new();
        let providers = configured(&[Provider::Gemini]);
        for raw in ["../../v1/files?pageSize=1000#", "gemini-2.0-flash/../x", "a b", "m#frag"] {
            let err = select_provider(&ModelSelector::parse(raw), &providers, &http, "http://x")
                .err()
                .expect("unsafe gemini model name must be rejected");
            assert!(matches!(err, LlmError::InvalidModel(ref m) if m == raw));
        }
    }

    #[test]
    fn test_chat_provider_model_names_may_contain_slashes() {
        let http = Client::new();
        let providers = configured(&[Provider::OpenRouter]);
        let selector = ModelSelector::parse("openrouter:meta-llama/llama-3.1-8b-instruct:free");
        let adapter = select_provider(&selector, &providers, &http, "http://x")
            .unwrap()
            .unwrap();
        assert_eq!(adapter.model(), "meta-llama/llama-3.1-8b-instruct:free");
    }

    #[test]
    fn test_select_each_chat_provider() {
        let http = Client::new();
        let providers = configured(&[Provider::Groq, Provider::OpenRouter, Provider::Mistral]);
        for (raw, expected) in [
            ("groq:gemma2-9b-it", Provider::Groq),
            ("openrouter:openai/gpt-4o-mini", Provider::OpenRouter),
            ("mistral:mistral-small-latest", Provider::Mistral),
        ] {
            let adapter = select_provider(&ModelSelector::parse(raw), &providers, &http, "http://x")
                .unwrap()
                .unwrap();
            assert_eq!(adapter.provider(), expected);
            assert!(!adapter.provider().enforces_schema());
        }
    }

    #[test]
    fn test_catalog_ids_parse_back_to_their_provider() {
        for provider in Provider::ALL {
            for entry in catalog_for(provider) {
                match ModelSelector::parse(entry.id) {
                    ModelSelector::Model { provider: p, .. } => assert_eq!(p, provider),
                    ModelSelector::None => panic!("catalog entry parsed as none"),
                }
            }
        }
    }
}
