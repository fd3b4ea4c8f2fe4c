//! Single call to the generation model, returning cleaned markup.

use std::{sync::Arc, time::Duration};

use thiserror::Error;
use tracing::{debug, warn};

use super::llm_api::{CompletionRequest, LlmApiError, ModelEndpoint};

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("model call failed: {0}")]
    Model(#[from] LlmApiError),
    #[error("model call timed out after {0:?}")]
    Timeout(Duration),
    #[error("model returned empty content")]
    EmptyContent,
}

/// Sampling and limits for the generation model
#[derive(Debug, Clone)]
pub struct GenerationSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o".to_string(),
            temperature: 0.7,
            max_tokens: 8000,
            timeout: Duration::from_secs(120),
        }
    }
}

#[derive(Clone)]
pub struct GenerationInvoker {
    endpoint: Arc<dyn ModelEndpoint>,
    settings: GenerationSettings,
}

impl GenerationInvoker {
    pub fn new(endpoint: Arc<dyn ModelEndpoint>, settings: GenerationSettings) -> Self {
        Self { endpoint, settings }
    }

    /// One bounded model call. No retries here.
    pub async fn invoke(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, GenerationError> {
        let request = CompletionRequest {
            model: self.settings.model.clone(),
            system: Some(system_prompt.to_string()),
            user: user_message.to_string(),
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        };

        let raw = match tokio::time::timeout(self.settings.timeout, self.endpoint.complete(request))
            .await
        {
            Ok(result) => result?,
            Err(_) => {
                warn!(
                    model = %self.settings.model,
                    timeout_secs = self.settings.timeout.as_secs(),
                    "Generation call timed out"
                );
                return Err(GenerationError::Timeout(self.settings.timeout));
            }
        };

        let markup = strip_code_fences(&raw);
        if markup.is_empty() {
            return Err(GenerationError::EmptyContent);
        }

        debug!(
            model = %self.settings.model,
            markup_len = markup.len(),
            "Generation call returned markup"
        );
        Ok(markup)
    }
}

/// Remove one leading fence (with optional language tag) and one trailing fence.
///
/// A word right after the opening fence is a language tag only when a line break or the
/// end of input follows it; otherwise it is content.
pub fn strip_code_fences(text: &str) -> String {
    let mut body = text.trim();

    if let Some(rest) = body.strip_prefix("```") {
        let tag_len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
            .unwrap_or(rest.len());
        let after_tag = &rest[tag_len..];
        body = if after_tag.is_empty() || after_tag.starts_with(['\n', '\r']) {
            after_tag
        } else {
            rest
        };
    }

    if let Some(rest) = body.strip_suffix("```") {
        body = rest;
    }

    body.trim().to_string()
}
