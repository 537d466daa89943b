use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use super::{finish_text, nested_error, require_key, send_json, GenerationResult, ProviderAdapter};
use crate::ai::Provider;

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// OpenAI chat completions provider
pub struct OpenAiProvider {
    client: Client,
    endpoint: String,
}

impl OpenAiProvider {
    pub fn new(client: Client, endpoint: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.to_string(),
        }
    }
}

/// `choices[0].message.content`
fn extract_text(data: &Value) -> Option<&str> {
    data.get("choices")?
        .get(0)?
        .get("message")?
        .get("content")?
        .as_str()
}

#[async_trait::async_trait]
impl ProviderAdapter for OpenAiProvider {
    fn provider(&self) -> Provider {
        Provider::OpenAi
    }

    async fn call(&self, model_name: &str, api_key: &str, prompt: &str) -> GenerationResult<String> {
        require_key(Provider::OpenAi, api_key)?;

        let request = ChatRequest {
            model: model_name,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: 0.7,
        };

        let data = send_json(
            Provider::OpenAi,
            self.client
                .post(&self.endpoint)
                .header("Authorization", format!("Bearer {}", api_key))
                .header("Content-Type", "application/json")
                .json(&request),
        )
        .await?;

        if let Some(error) = nested_error(Provider::OpenAi, &data) {
            return Err(error);
        }

        finish_text(Provider::OpenAi, extract_text(&data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenerationError;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_for(server: &MockServer) -> OpenAiProvider {
        OpenAiProvider::new(Client::new(), &format!("{}/v1/chat/completions", server.uri()))
    }

    #[tokio::test]
    async fn test_sends_chat_request_and_trims_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("Authorization", "Bearer sk-test"))
            .and(header("Content-Type", "application/json"))
            .and(body_json(json!({
                "model": "gpt-5-mini",
                "messages": [{"role": "user", "content": "Summarize: Hello"}],
                "temperature": 0.7
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": " A greeting. "}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let text = provider.call("gpt-5-mini", "sk-test", "Summarize: Hello").await.unwrap();
        assert_eq!(text, "A greeting.");
    }

    #[tokio::test]
    async fn test_error_object_becomes_provider_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}
            })))
            .mount(&server)
            .await;

        let err = provider_for(&server).call("gpt-5-mini", "bad", "p").await.unwrap_err();
        assert!(matches!(
            err,
            GenerationError::Provider { ref message, .. } if message == "Incorrect API key provided"
        ));
    }

    #[tokio::test]
    async fn test_missing_content_is_empty_generation() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": null}}]
            })))
            .mount(&server)
            .await;

        let err = provider_for(&server).call("gpt-5-mini", "sk", "p").await.unwrap_err();
        assert!(matches!(err, GenerationError::EmptyGeneration { detail: None, .. }));
    }

    #[tokio::test]
    async fn test_empty_key_skips_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = provider_for(&server).call("gpt-5-mini", "", "p").await.unwrap_err();
        assert!(matches!(err, GenerationError::MissingCredential(Provider::OpenAi)));
    }
}
