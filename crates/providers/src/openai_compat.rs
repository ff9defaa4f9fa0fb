//! OpenAI-compatible generator implementation.
//!
//! Works with OpenAI, OpenRouter, Ollama, vLLM, and any other endpoint
//! exposing an OpenAI-compatible `/chat/completions` route.

use async_trait::async_trait;
use colloquy_core::{Generator, GeneratorError};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// A text generator backed by an OpenAI-compatible completion endpoint.
pub struct OpenAiCompatGenerator {
    name: String,
    base_url: String,
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl OpenAiCompatGenerator {
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(300))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            name: name.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
            client,
        }
    }

    /// OpenAI convenience constructor.
    pub fn openai(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::new("openai", "https://api.openai.com/v1", api_key, model)
    }

    /// OpenRouter convenience constructor.
    pub fn openrouter(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::new("openrouter", "https://openrouter.ai/api/v1", api_key, model)
    }

    /// Ollama convenience constructor; no real key needed.
    pub fn ollama(base_url: Option<&str>, model: impl Into<String>) -> Self {
        Self::new(
            "ollama",
            base_url.unwrap_or("http://localhost:11434/v1"),
            "ollama",
            model,
        )
    }
}

#[async_trait]
impl Generator for OpenAiCompatGenerator {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, prompt: &str) -> std::result::Result<String, GeneratorError> {
        if self.api_key.is_empty() {
            return Err(GeneratorError::NotConfigured(
                "No API key configured".into(),
            ));
        }

        let url = format!("{}/chat/completions", self.base_url);
        let body = serde_json::json!({
            "model": self.model,
            "messages": [ { "role": "user", "content": prompt } ],
            "stream": false,
        });

        debug!(
            generator = %self.name,
            model = %self.model,
            prompt_chars = prompt.len(),
            "Sending completion request"
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GeneratorError::Timeout(e.to_string())
                } else {
                    GeneratorError::Network(e.to_string())
                }
            })?;

        let status = response.status().as_u16();

        if status == 429 {
            return Err(GeneratorError::RateLimited {
                retry_after_secs: 5,
            });
        }

        if status == 401 || status == 403 {
            return Err(GeneratorError::AuthenticationFailed(
                "Invalid API key or insufficient permissions".into(),
            ));
        }

        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Completion endpoint returned error");
            return Err(GeneratorError::ApiError {
                status_code: status,
                message: error_body,
            });
        }

        let api_response: ApiResponse = response.json().await.map_err(|e| {
            GeneratorError::InvalidResponse(format!("Failed to parse response: {e}"))
        })?;

        let choice = api_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| GeneratorError::InvalidResponse("No choices in response".into()))?;

        Ok(choice.message.content.unwrap_or_default())
    }
}

// --- OpenAI API types (internal) ---

#[derive(Debug, Serialize, Deserialize)]
struct ApiMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    choices: Vec<ApiChoice>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiMessage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openai_constructor() {
        let generator = OpenAiCompatGenerator::openai("sk-test", "gpt-4o");
        assert_eq!(generator.name(), "openai");
        assert!(generator.base_url.contains("api.openai.com"));
        assert_eq!(generator.model, "gpt-4o");
    }

    #[test]
    fn ollama_constructor_needs_no_key() {
        let generator = OpenAiCompatGenerator::ollama(None, "llama3");
        assert_eq!(generator.name(), "ollama");
        assert!(generator.base_url.contains("localhost:11434"));
    }

    #[test]
    fn trailing_slash_is_trimmed_from_base_url() {
        let generator =
            OpenAiCompatGenerator::new("test", "https://example.com/v1/", "key", "model");
        assert_eq!(generator.base_url, "https://example.com/v1");
    }

    #[tokio::test]
    async fn missing_api_key_is_not_configured() {
        let generator = OpenAiCompatGenerator::new("test", "https://example.com/v1", "", "model");
        let err = generator.generate("hello").await.unwrap_err();
        assert!(matches!(err, GeneratorError::NotConfigured(_)));
    }

    #[test]
    fn parses_a_completion_response() {
        let data = r#"{
            "model": "gpt-4o",
            "choices": [ { "message": { "role": "assistant", "content": "Hello there" } } ]
        }"#;
        let parsed: ApiResponse = serde_json::from_str(data).unwrap();
        assert_eq!(
            parsed.choices[0].message.content.as_deref(),
            Some("Hello there")
        );
    }

    #[test]
    fn parses_a_response_with_null_content() {
        let data = r#"{ "choices": [ { "message": { "role": "assistant", "content": null } } ] }"#;
        let parsed: ApiResponse = serde_json::from_str(data).unwrap();
        assert!(parsed.choices[0].message.content.is_none());
    }
}
