use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use super::{finish_text, nested_error, require_key, send_json, GenerationResult, ProviderAdapter};
use crate::ai::Provider;

const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 1024;

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

/// Anthropic Messages API provider
pub struct AnthropicProvider {
    client: Client,
    endpoint: String,
}

impl AnthropicProvider {
    pub fn new(client: Client, endpoint: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.to_string(),
        }
    }
}

fn extract_text(data: &Value) -> Option<&str> {
    data.get("content")?.get(0)?.get("text")?.as_str()
}

#[async_trait::async_trait]
impl ProviderAdapter for AnthropicProvider {
    fn provider(&self) -> Provider {
        Provider::Anthropic
    }

    async fn call(&self, model_name: &str, api_key: &str, prompt: &str) -> GenerationResult<String> {
        require_key(Provider::Anthropic, api_key)?;

        let request = MessagesRequest {
            model: model_name,
            max_tokens: MAX_TOKENS,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        let data = send_json(
            Provider::Anthropic,
            self.client
                .post(&self.endpoint)
                .header("x-api-key", api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .header("Content-Type", "application/json")
                .json(&request),
        )
        .await?;

        if let Some(error) = nested_error(Provider::Anthropic, &data) {
            return Err(error);
        }

        finish_text(Provider::Anthropic, extract_text(&data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenerationError;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_for(server: &MockServer) -> AnthropicProvider {
        AnthropicProvider::new(Client::new(), &format!("{}/v1/messages", server.uri()))
    }

    #[tokio::test]
    async fn test_sends_messages_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("x-api-key", "ak-test"))
            .and(header("anthropic-version", "2023-06-01"))
            .and(body_json(json!({
                "model": "claude-haiku-4-5",
                "max_tokens": 1024,
                "messages": [{"role": "user", "content": "Excerpt: body"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "msg_01",
                "type": "message",
                "role": "assistant",
                "content": [{"type": "text", "text": "\nShort teaser.\n"}],
                "stop_reason": "end_turn"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = provider_for(&server)
            .call("claude-haiku-4-5", "ak-test", "Excerpt: body")
            .await
            .unwrap();
        assert_eq!(text, "Short teaser.");
    }

    #[tokio::test]
    async fn test_error_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(529).set_body_json(json!({
                "type": "error",
                "error": {"type": "overloaded_error", "message": "Overloaded"}
            })))
            .mount(&server)
            .await;

        let err = provider_for(&server).call("m", "k", "p").await.unwrap_err();
        assert!(matches!(err, GenerationError::Provider { ref message, .. } if message == "Overloaded"));
    }

    #[tokio::test]
    async fn test_empty_content_list() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"content": []})))
            .mount(&server)
            .await;

        let err = provider_for(&server).call("m", "k", "p").await.unwrap_err();
        assert!(matches!(err, GenerationError::EmptyGeneration { provider: Provider::Anthropic, .. }));
    }
}
