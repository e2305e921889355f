/// LLM Client: the single point of entry for all upstream text-generation calls.
///
/// No other module talks to a provider API directly. Callers obtain a
/// `CompletionProvider` from `provider::select_provider` and get raw text back;
/// turning that text into structured data is the caller's job.
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

pub mod gemini;
pub mod openai_compat;
pub mod prompts;
pub mod provider;

use provider::Provider;

/// Sampling temperature for every provider. Extraction favours determinism.
pub const TEMPERATURE: f32 = 0.2;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("{0} is not configured")]
    MissingCredential(&'static str),

    #[error("Unsupported model: {0}")]
    InvalidModel(String),

    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    #[error("Upstream request timed out")]
    Timeout,

    #[error("API error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("JSON parse error: {reason}")]
    Parse { raw: String, reason: String },
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            LlmError::Timeout
        } else {
            LlmError::Http(e)
        }
    }
}

/// One upstream model behind a uniform "prompt in, raw text out" call.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    fn provider(&self) -> Provider;

    fn model(&self) -> &str;

    /// Sends the prompt and returns the raw text the model produced.
    /// `response_schema` is honoured by providers that enforce output structure
    /// server-side and ignored by the rest.
    async fn complete(&self, prompt: &str, response_schema: &Value) -> Result<String, LlmError>;
}

/// Builds the shared HTTP client. Every upstream call inherits its timeout.
pub fn build_http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .context("Failed to build HTTP client")
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output, wherever
/// they appear, and trims the remainder. Any info-string after an opening fence
/// (`json`, `javascript`, ...) goes with it. Idempotent.
pub fn strip_json_fences(text: &str) -> String {
    if !text.contains("```") {
        return text.trim().to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    let mut opening = true;
    while let Some(pos) = rest.find("```") {
        out.push_str(&rest[..pos]);
        rest = &rest[pos + 3..];
        if opening {
            let tag_len = rest
                .find(|c: char| !c.is_ascii_alphanumeric())
                .unwrap_or(rest.len());
            rest = &rest[tag_len..];
        }
        opening = !opening;
    }
    out.push_str(rest);
    out.trim().to_string()
}

/// Reads a non-success response into `LlmError::Api`, keeping the body for logs.
pub(crate) async fn api_error(response: reqwest::Response) -> LlmError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    LlmError::Api { status, body }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_is_idempotent() {
        let input = "Here you go:\n```JSON\n{\"a\": [1, 2]}\n```\n";
        let once = strip_json_fences(input);
        assert_eq!(strip_json_fences(&once), once);
        assert_eq!(once, "Here you go:\n\n{\"a\": [1, 2]}");
    }

    #[test]
    fn test_strip_json_fences_drops_other_language_tags() {
        let input = "```javascript\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
        let input = "```json5\n{\"a\": 1}\n```";
        assert_eq!(strip_json_fences(input), "{\"a\": 1}");
    }

    #[test]
    fn test_strip_json_fences_keeps_text_after_closing_fence() {
        let input = "```json\n{\"a\": 1}\n```done";
        assert_eq!(strip_json_fences(input), "{\"a\": 1}\ndone");
    }

    #[test]
    fn test_strip_json_fences_keeps_json_word_inside_strings() {
        let input = "```json\n{\"skills\": [\"json\", \"Rust\"]}\n```";
        assert_eq!(strip_json_fences(input), "{\"skills\": [\"json\", \"Rust\"]}");
    }

    #[test]
    fn test_missing_credential_message_names_the_key() {
        let err = LlmError::MissingCredential("GROQ_API_KEY");
        assert_eq!(err.to_string(), "GROQ_API_KEY is not configured");
    }
}
