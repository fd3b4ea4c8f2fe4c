//! Chat-completion client for the generation and judge models.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Clone, Error)]
pub enum LlmApiError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("timeout")]
    Timeout,
    #[error("http {status}: {body}")]
    Http { status: u16, body: String },
    #[error("rate limited")]
    RateLimited,
    #[error("invalid api key")]
    InvalidApiKey,
    #[error("json error: {0}")]
    Serde(String),
    #[error("model returned no content")]
    EmptyResponse,
}

/// One system + user exchange sent to a model.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub system: Option<String>,
    pub user: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// A chat-completion capable model endpoint.
///
/// Generation and validation only ever talk to this trait, so tests can script replies.
#[async_trait]
pub trait ModelEndpoint: Send + Sync {
    /// Returns the text content of the first choice.
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmApiError>;
}

/// A message in the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request body for the chat completions endpoint
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

/// Token usage information
#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

/// Response from the chat completions endpoint
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<Usage>,
}

impl ChatResponse {
    fn into_text(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
    }
}

/// OpenAI-compatible chat completions client
#[derive(Debug, Clone)]
pub struct ChatCompletionClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl ChatCompletionClient {
    const REQUEST_TIMEOUT: Duration = Duration::from_secs(180);

    /// Create a new client with the given API key
    pub fn new(api_key: String, base_url: Option<String>) -> Result<Self, LlmApiError> {
        let http = Client::builder()
            .timeout(Self::REQUEST_TIMEOUT)
            .user_agent(concat!("sitegen/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| LlmApiError::Transport(e.to_string()))?;

        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            http,
            api_key,
            base_url,
        })
    }

    async fn send_request(&self, request: &ChatRequest<'_>) -> Result<ChatResponse, LlmApiError> {
        let res = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        match res.status() {
            s if s.is_success() => res
                .json::<ChatResponse>()
                .await
                .map_err(|e| LlmApiError::Serde(e.to_string())),
            StatusCode::UNAUTHORIZED => Err(LlmApiError::InvalidApiKey),
            StatusCode::TOO_MANY_REQUESTS => Err(LlmApiError::RateLimited),
            s => {
                let status = s.as_u16();
                let body = res.text().await.unwrap_or_default();
                Err(LlmApiError::Http { status, body })
            }
        }
    }
}

#[async_trait]
impl ModelEndpoint for ChatCompletionClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmApiError> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = request.system {
            messages.push(Message::system(system));
        }
        messages.push(Message::user(request.user));

        let body = ChatRequest {
            model: &request.model,
            messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let response = self.send_request(&body).await?;
        if let Some(usage) = &response.usage {
            debug!(
                model = %request.model,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Chat completion finished"
            );
        }

        response.into_text().ok_or(LlmApiError::EmptyResponse)
    }
}

fn map_reqwest_error(e: reqwest::Error) -> LlmApiError {
    if e.is_timeout() {
        LlmApiError::Timeout
    } else {
        LlmApiError::Transport(e.to_string())
    }
}

/// Extract JSON from a string that might contain markdown code blocks
pub fn extract_json(text: &str) -> &str {
    let text = text.trim();

    if let Some(start) = text.find("```json") {
        let content_start = start + 7;
        if let Some(end) = text[content_start..].find("```") {
            return text[content_start..content_start + end].trim();
        }
    }

    if let Some(start) = text.find("```") {
        let content_start = start + 3;
        // Skip past any language identifier on the same line
        let content_start = text[content_start..]
            .find('\n')
            .map(|i| content_start + i + 1)
            .unwrap_or(content_start);
        if let Some(end) = text[content_start..].find("```") {
            return text[content_start..content_start + end].trim();
        }
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_plain() {
        let input = r#"{"valid": true}"#;
        assert_eq!(extract_json(input), r#"{"valid": true}"#);
    }

    #[test]
    fn test_extract_json_code_block() {
        let input = r#"Here is the verdict:
```json
{"valid": false}
```"#;
        assert_eq!(extract_json(input), r#"{"valid": false}"#);
    }

    #[test]
    fn test_extract_json_generic_code_block() {
        let input = "```\n{\"valid\": true}\n```";
        assert_eq!(extract_json(input), r#"{"valid": true}"#);
    }

    #[test]
    fn test_chat_response_text_skips_blank_content() {
        let response: ChatResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"role": "assistant", "content": "  "}}]}"#,
        )
        .unwrap();
        assert_eq!(response.into_text(), None);

        let response: ChatResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"content": "<p>x</p>"}}], "usage": {"prompt_tokens": 3, "completion_tokens": 4}}"#,
        )
        .unwrap();
        assert_eq!(response.into_text().as_deref(), Some("<p>x</p>"));
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let client =
            ChatCompletionClient::new("key".to_string(), Some("http://localhost:9/v1/".to_string()))
                .unwrap();
        assert_eq!(client.base_url, "http://localhost:9/v1");
    }
}
