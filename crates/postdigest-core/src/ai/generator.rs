use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use super::content::{build_prompt, clean_content};
use super::providers::{
    AnthropicProvider, Endpoints, GenerationResult, GoogleProvider, HuggingFaceProvider,
    OpenAiProvider, ProviderAdapter, ProviderCredentials,
};
use super::registry::{get_model, Provider};
use crate::config::AiConfig;
use crate::error::GenerationError;
use crate::Result;

/// One text generation call
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub model_id: String,
    pub raw_content: String,
    pub prompt_template: String,
}

/// Resolves a model, builds the prompt and dispatches to its provider
pub struct Generator {
    credentials: ProviderCredentials,
    adapters: Vec<Arc<dyn ProviderAdapter>>,
    max_prompt_chars: Option<usize>,
}

impl Generator {
    /// Create a generator talking to the public provider APIs
    pub fn new(config: &AiConfig) -> Result<Self> {
        Self::with_endpoints(config, Endpoints::default())
    }

    /// Create a generator with custom provider base URLs
    pub fn with_endpoints(config: &AiConfig, endpoints: Endpoints) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        let adapters: Vec<Arc<dyn ProviderAdapter>> = vec![
            Arc::new(HuggingFaceProvider::new(client.clone(), &endpoints.huggingface)),
            Arc::new(OpenAiProvider::new(client.clone(), &endpoints.openai)),
            Arc::new(AnthropicProvider::new(client.clone(), &endpoints.anthropic)),
            Arc::new(GoogleProvider::new(client, &endpoints.google)),
        ];

        Ok(Self::from_parts(
            config.credentials(),
            adapters,
            config.max_prompt_chars,
        ))
    }

    pub fn from_parts(
        credentials: ProviderCredentials,
        adapters: Vec<Arc<dyn ProviderAdapter>>,
        max_prompt_chars: Option<usize>,
    ) -> Self {
        Self {
            credentials,
            adapters,
            max_prompt_chars,
        }
    }

    fn adapter(&self, provider: Provider) -> Option<&Arc<dyn ProviderAdapter>> {
        self.adapters.iter().find(|a| a.provider() == provider)
    }

    /// Generate text for `raw_content` using the registered model `model_id`
    pub async fn generate(
        &self,
        model_id: &str,
        raw_content: &str,
        prompt_template: &str,
    ) -> GenerationResult<String> {
        let model = get_model(model_id)
            .filter(|m| m.provider != Provider::None)
            .ok_or_else(|| GenerationError::UnknownModel(model_id.to_string()))?;
        let adapter = self
            .adapter(model.provider)
            .ok_or_else(|| GenerationError::UnknownModel(model_id.to_string()))?;

        let cleaned = clean_content(raw_content);
        let prompt = build_prompt(prompt_template, &cleaned);

        let chars = prompt.chars().count();
        if let Some(limit) = self.max_prompt_chars {
            if chars > limit {
                return Err(GenerationError::PromptTooLong { chars, limit });
            }
        }

        tracing::info!(
            model = model.id,
            provider = %model.provider,
            prompt_chars = chars,
            "Requesting generation"
        );

        let api_key = self.credentials.api_key(model.provider);
        let result = adapter.call(model.model_name, api_key, &prompt).await;

        match &result {
            Ok(text) => tracing::debug!(model = model.id, chars = text.len(), "Generation succeeded"),
            Err(e) => tracing::warn!(model = model.id, kind = e.kind().as_str(), "Generation failed: {}", e),
        }

        result
    }

    pub async fn generate_request(&self, request: &GenerationRequest) -> GenerationResult<String> {
        self.generate(&request.model_id, &request.raw_content, &request.prompt_template)
            .await
    }
}
