use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use super::{finish_text, nested_error, require_key, send_json, GenerationResult, ProviderAdapter};
use crate::ai::Provider;

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

/// Google Gemini generateContent provider
pub struct GoogleProvider {
    client: Client,
    endpoint: String,
}

impl GoogleProvider {
    pub fn new(client: Client, endpoint: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.to_string(),
        }
    }

    /// The key travels in the query string, form-urlencoded
    fn url(&self, model_name: &str, api_key: &str) -> String {
        let key: String = url::form_urlencoded::byte_serialize(api_key.as_bytes()).collect();
        format!("{}/{}:generateContent?key={}", self.endpoint, model_name, key)
    }
}

/// `candidates[0].content.parts[0].text`
fn extract_text(data: &Value) -> Option<&str> {
    data.get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .get(0)?
        .get("text")?
        .as_str()
}

#[async_trait::async_trait]
impl ProviderAdapter for GoogleProvider {
    fn provider(&self) -> Provider {
        Provider::Google
    }

    async fn call(&self, model_name: &str, api_key: &str, prompt: &str) -> GenerationResult<String> {
        require_key(Provider::Google, api_key)?;

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let data = send_json(
            Provider::Google,
            self.client
                .post(self.url(model_name, api_key))
                .header("Content-Type", "application/json")
                .json(&request),
        )
        .await?;

        if let Some(error) = nested_error(Provider::Google, &data) {
            return Err(error);
        }

        finish_text(Provider::Google, extract_text(&data))
    }
}
