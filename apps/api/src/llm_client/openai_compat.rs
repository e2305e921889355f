//! Adapter for OpenAI-compatible chat-completion APIs (Groq, OpenRouter, Mistral).

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::llm_client::provider::Provider;
use crate::llm_client::{api_error, CompletionProvider, LlmError, TEMPERATURE};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    response_format: ResponseFormat,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: Option<u32>,
    completion_tokens: Option<u32>,
}

impl ChatResponse {
    /// Content of the first choice, or empty when the provider sent none.
    fn into_text(self) -> String {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .unwrap_or_default()
    }
}

pub struct ChatCompletionProvider {
    provider: Provider,
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    extra_headers: Vec<(&'static str, String)>,
}

impl ChatCompletionProvider {
    pub fn new(
        provider: Provider,
        client: Client,
        base_url: &str,
        api_key: String,
        model: String,
    ) -> Self {
        Self {
            provider,
            client,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            api_key,
            model,
            extra_headers: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: &'static str, value: &str) -> Self {
        self.extra_headers.push((name, value.to_string()));
        self
    }
}

#[async_trait]
impl CompletionProvider for ChatCompletionProvider {
    fn provider(&self) -> Provider {
        self.provider
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &str, _response_schema: &Value) -> Result<String, LlmError> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            response_format: ResponseFormat {
                kind: "json_object",
            },
            temperature: TEMPERATURE,
        };

        let mut request = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body);
        for (name, value) in &self.extra_headers {
            request = request.header(*name, value);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let parsed: ChatResponse = response.json().await?;
        if let Some(usage) = &parsed.usage {
            debug!(
                provider = self.provider.tag(),
                prompt_tokens = ?usage.prompt_tokens,
                completion_tokens = ?usage.completion_tokens,
                "Chat completion succeeded"
            );
        }

        Ok(parsed.into_text())
    }
}
