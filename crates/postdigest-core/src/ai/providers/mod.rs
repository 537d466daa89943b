mod anthropic;
mod google;
mod huggingface;
mod openai;

pub use anthropic::AnthropicProvider;
pub use google::GoogleProvider;
pub use huggingface::HuggingFaceProvider;
pub use openai::OpenAiProvider;

use std::collections::HashMap;

use reqwest::RequestBuilder;
use serde_json::Value;

use super::Provider;
use crate::error::GenerationError;

pub type GenerationResult<T> = std::result::Result<T, GenerationError>;

/// API keys per provider, read from settings and never written back
#[derive(Debug, Clone, Default)]
pub struct ProviderCredentials {
    keys: HashMap<Provider, String>,
}

impl ProviderCredentials {
    pub fn insert(&mut self, provider: Provider, api_key: &str) {
        self.keys.insert(provider, api_key.to_string());
    }

    pub fn with(mut self, provider: Provider, api_key: &str) -> Self {
        self.insert(provider, api_key);
        self
    }

    /// Configured key, or "" when the provider has none
    pub fn api_key(&self, provider: Provider) -> &str {
        self.keys.get(&provider).map(String::as_str).unwrap_or("")
    }
}

/// Base URLs of the provider APIs
#[derive(Debug, Clone)]
pub struct Endpoints {
    /// Model name is appended as a path segment
    pub huggingface: String,
    pub openai: String,
    pub anthropic: String,
    /// Model name and `:generateContent` are appended
    pub google: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            huggingface: "https://router.huggingface.co/models".to_string(),
            openai: "https://api.openai.com/v1/chat/completions".to_string(),
            anthropic: "https://api.anthropic.com/v1/messages".to_string(),
            google: "https://generativelanguage.googleapis.com/v1beta/models".to_string(),
        }
    }
}

impl Endpoints {
    /// Point every provider at one server, keeping each API's path layout
    pub fn with_base_url(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            huggingface: format!("{base}/models"),
            openai: format!("{base}/v1/chat/completions"),
            anthropic: format!("{base}/v1/messages"),
            google: format!("{base}/v1beta/models"),
        }
    }
}

/// One LLM vendor's text generation endpoint
#[async_trait::async_trait]
pub trait ProviderAdapter: Send + Sync {
    fn provider(&self) -> Provider;

    /// Generate text for `prompt`, returning it trimmed and non-empty
    async fn call(&self, model_name: &str, api_key: &str, prompt: &str) -> GenerationResult<String>;
}

pub(crate) fn require_key(provider: Provider, api_key: &str) -> GenerationResult<()> {
    if api_key.is_empty() {
        return Err(GenerationError::MissingCredential(provider));
    }
    Ok(())
}

/// Send the request and parse whatever body comes back.
///
/// The status code is ignored; providers report failures in the body. A body
/// that is not JSON parses as `null` so the caller's shape checks reject it.
pub(crate) async fn send_json(provider: Provider, request: RequestBuilder) -> GenerationResult<Value> {
    let response = request
        .send()
        .await
        .map_err(|source| GenerationError::Transport { provider, source })?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|source| GenerationError::Transport { provider, source })?;

    tracing::debug!(provider = %provider, status = %status, bytes = body.len(), "Provider responded");

    Ok(serde_json::from_str(&body).unwrap_or_else(|e| {
        tracing::debug!(provider = %provider, error = %e, "Response body is not JSON");
        Value::Null
    }))
}

/// `error.message` as reported by OpenAI, Anthropic and Google
pub(crate) fn nested_error(provider: Provider, data: &Value) -> Option<GenerationError> {
    let error = data.get("error").filter(|e| !e.is_null())?;
    let message = error
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("{} API error.", provider));
    Some(GenerationError::Provider { provider, message })
}

/// Trim extracted text, rejecting it when nothing is left
pub(crate) fn finish_text(provider: Provider, text: Option<&str>) -> GenerationResult<String> {
    match text.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(GenerationError::EmptyGeneration {
            provider,
            detail: None,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_credentials_default_to_empty() {
        let credentials = ProviderCredentials::default().with(Provider::OpenAi, "sk");
        assert_eq!(credentials.api_key(Provider::OpenAi), "sk");
        assert_eq!(credentials.api_key(Provider::Anthropic), "");
    }

    #[test]
    fn test_nested_error_message_and_fallback() {
        let err = nested_error(Provider::Google, &json!({"error": {"message": "quota exceeded"}})).unwrap();
        assert!(matches!(err, GenerationError::Provider { ref message, .. } if message == "quota exceeded"));

        let err = nested_error(Provider::Anthropic, &json!({"error": {"type": "overloaded"}})).unwrap();
        assert!(matches!(err, GenerationError::Provider { ref message, .. } if message == "Anthropic API error."));

        assert!(nested_error(Provider::OpenAi, &json!({"error": null})).is_none());
        assert!(nested_error(Provider::OpenAi, &json!([{"error": "x"}])).is_none());
    }

    #[test]
    fn test_finish_text() {
        assert_eq!(finish_text(Provider::OpenAi, Some("  hi \n")).unwrap(), "hi");
        assert!(finish_text(Provider::OpenAi, Some("   ")).is_err());
        assert!(finish_text(Provider::OpenAi, None).is_err());
    }

    #[test]
    fn test_endpoints_with_base_url() {
        let endpoints = Endpoints::with_base_url("http://127.0.0.1:9000/");
        assert_eq!(endpoints.openai, "http://127.0.0.1:9000/v1/chat/completions");
        assert_eq!(endpoints.google, "http://127.0.0.1:9000/v1beta/models");
    }
}
