use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use super::{require_key, send_json, GenerationResult, ProviderAdapter};
use crate::ai::Provider;
use crate::error::GenerationError;

const MAX_NEW_TOKENS: u32 = 250;
const SNIPPET_CHARS: usize = 200;

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: Parameters,
}

#[derive(Serialize)]
struct Parameters {
    max_new_tokens: u32,
    temperature: f64,
}

/// Hugging Face inference router provider
pub struct HuggingFaceProvider {
    client: Client,
    endpoint: String,
}

impl HuggingFaceProvider {
    pub fn new(client: Client, endpoint: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.to_string(),
        }
    }
}

type ExtractionRule = fn(&Value) -> Option<&str>;

/// Response shapes differ per model; tried in order, first match wins
const EXTRACTION_RULES: &[(&str, ExtractionRule)] = &[
    ("first_object_generated_text", first_object_generated_text),
    ("first_string", first_string),
    ("bare_string", bare_string),
    ("root_generated_text", root_generated_text),
    ("scan_elements", scan_elements),
];

fn non_empty(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.is_empty())
}

fn first_object_generated_text(data: &Value) -> Option<&str> {
    match data.get(0)? {
        Value::Object(first) => first.get("generated_text").and_then(non_empty),
        _ => None,
    }
}

fn first_string(data: &Value) -> Option<&str> {
    data.get(0).and_then(non_empty)
}

fn bare_string(data: &Value) -> Option<&str> {
    non_empty(data)
}

fn root_generated_text(data: &Value) -> Option<&str> {
    match data {
        Value::Object(map) => map.get("generated_text").and_then(non_empty),
        _ => None,
    }
}

fn scan_elements(data: &Value) -> Option<&str> {
    match data {
        Value::Array(items) => items.iter().find_map(scan_item),
        Value::Object(map) => map.values().find_map(scan_item),
        _ => None,
    }
}

fn scan_item(item: &Value) -> Option<&str> {
    match item {
        Value::String(_) => non_empty(item),
        Value::Object(map) => map.get("generated_text").and_then(non_empty),
        _ => None,
    }
}

/// Run the extraction rules over a parsed response
pub(crate) fn extract_generated_text(data: &Value) -> Option<&str> {
    EXTRACTION_RULES.iter().find_map(|(name, rule)| {
        let text = rule(data)?;
        tracing::trace!(rule = *name, "Matched Hugging Face response shape");
        Some(text)
    })
}

/// `error` is either a message string or an object reported verbatim
fn response_error(data: &Value) -> Option<GenerationError> {
    let message = match data.get("error")? {
        Value::Null => return None,
        Value::String(message) => message.clone(),
        other => other.to_string(),
    };
    Some(GenerationError::Provider {
        provider: Provider::HuggingFace,
        message,
    })
}

fn snippet(raw: &str) -> &str {
    match raw.char_indices().nth(SNIPPET_CHARS) {
        Some((idx, _)) => &raw[..idx],
        None => raw,
    }
}

#[async_trait::async_trait]
impl ProviderAdapter for HuggingFaceProvider {
    fn provider(&self) -> Provider {
        Provider::HuggingFace
    }

    async fn call(&self, model_name: &str, api_key: &str, prompt: &str) -> GenerationResult<String> {
        require_key(Provider::HuggingFace, api_key)?;

        let request = InferenceRequest {
            inputs: prompt,
            parameters: Parameters {
                max_new_tokens: MAX_NEW_TOKENS,
                temperature: 0.7,
            },
        };

        let data = send_json(
            Provider::HuggingFace,
            self.client
                .post(format!("{}/{}", self.endpoint, model_name))
                .header("Authorization", format!("Bearer {}", api_key))
                .header("Content-Type", "application/json")
                .json(&request),
        )
        .await?;

        if let Some(error) = response_error(&data) {
            return Err(error);
        }

        match extract_generated_text(&data).map(str::trim) {
            Some(text) if !text.is_empty() => Ok(text.to_string()),
            _ => {
                let raw = data.to_string();
                tracing::warn!(model = model_name, response = %raw, "Hugging Face returned no generated text");
                Err(GenerationError::EmptyGeneration {
                    provider: Provider::HuggingFace,
                    detail: Some(format!(
                        "Response format may be unexpected. Response: {}",
                        snippet(&raw)
                    )),
                })
            }
        }
    }
}
