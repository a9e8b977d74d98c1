//! Text-generation backends.

use crate::config::BackendSettings;
use crate::error::{MurmurError, Result};
use crate::openai::create_client;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    CreateChatCompletionResponse,
};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument};

/// A single chat-style generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// System instruction.
    pub system: String,
    /// User turn, already rendered.
    pub user: String,
    /// Model identifier.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
}

/// Trait for text-generation backends.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Generate a completion for the request.
    async fn generate(&self, request: &GenerationRequest) -> Result<String>;

    /// List model identifiers the backend can serve.
    async fn list_models(&self) -> Result<Vec<String>>;
}

/// Generator for OpenAI-compatible chat completion endpoints.
pub struct OpenAIGenerator {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
}

impl OpenAIGenerator {
    /// Create a generator for `base_url`.
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: create_client(base_url, api_key, timeout)?,
        })
    }

    /// Create a generator from backend settings and a resolved API key.
    pub fn from_settings(settings: &BackendSettings, api_key: &str) -> Result<Self> {
        Self::new(
            &settings.base_url,
            api_key,
            Duration::from_secs(settings.timeout_seconds),
        )
    }
}

#[async_trait]
impl Generator for OpenAIGenerator {
    #[instrument(skip(self, request), fields(model = %request.model))]
    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(request.system.clone())
                .build()
                .map_err(|e| MurmurError::Generation(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(request.user.clone())
                .build()
                .map_err(|e| MurmurError::Generation(e.to_string()))?
                .into(),
        ];

        let chat_request = CreateChatCompletionRequestArgs::default()
            .model(&request.model)
            .messages(messages)
            .temperature(request.temperature)
            .build()
            .map_err(|e| MurmurError::Generation(e.to_string()))?;

        let response = self.client.chat().create(chat_request).await.map_err(|e| {
            MurmurError::Generation(format!("Backend request failed: {}", e))
        })?;

        let answer = first_choice_text(response)?;
        debug!("Received {} characters", answer.len());
        Ok(answer)
    }

    #[instrument(skip(self))]
    async fn list_models(&self) -> Result<Vec<String>> {
        let response = self.client.models().list().await.map_err(|e| {
            MurmurError::Generation(format!("Failed to list models: {}", e))
        })?;

        Ok(response.data.into_iter().map(|m| m.id).collect())
    }
}

/// Text of the first choice; no choices or no content is a failure.
fn first_choice_text(response: CreateChatCompletionResponse) -> Result<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| MurmurError::Generation("Empty response from backend".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn completion(choices: serde_json::Value) -> CreateChatCompletionResponse {
        serde_json::from_value(json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "created": 0,
            "model": "phi-3",
            "choices": choices
        }))
        .unwrap()
    }

    #[test]
    fn test_first_choice_text() {
        let response = completion(json!([{
            "index": 0,
            "message": {"role": "assistant", "content": "  raw answer\n"},
            "finish_reason": "stop"
        }]));
        assert_eq!(first_choice_text(response).unwrap(), "  raw answer\n");
    }

    #[test]
    fn test_no_choices_is_a_generation_failure() {
        let result = first_choice_text(completion(json!([])));
        assert!(matches!(result, Err(MurmurError::Generation(_))));
    }

    #[test]
    fn test_missing_content_is_a_generation_failure() {
        let response = completion(json!([{
            "index": 0,
            "message": {"role": "assistant", "content": null},
            "finish_reason": "stop"
        }]));
        assert!(matches!(
            first_choice_text(response),
            Err(MurmurError::Generation(_))
        ));
    }

    #[test]
    fn test_generator_creation() {
        let settings = BackendSettings::default();
        assert!(OpenAIGenerator::from_settings(&settings, "lm-studio").is_ok());
    }
}
