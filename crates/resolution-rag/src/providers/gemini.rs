//! Gemini client for answer generation via the Generative Language API
//!
//! Authenticates with an API key (`GEMINI_API_KEY`). A client without a key
//! can be constructed, but refuses to generate: `check_configured` reports
//! the missing credential before any request is built.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::config::LlmConfig;
use crate::error::{Error, Result};
use crate::providers::llm::LlmProvider;

/// Gemini client using an API key
pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
    api_key_env: String,
    temperature: f32,
    max_output_tokens: Option<u32>,
}

impl GeminiClient {
    /// Create a new Gemini client from configuration
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.resolved_base_url(),
            model: config.model.clone(),
            api_key: config.credential().map(str::to_string),
            api_key_env: config.api_key_env.clone(),
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
        })
    }

    /// Get the API endpoint URL
    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            Error::MissingCredential(format!(
                "{} is not set; add it to the environment or a .env file",
                self.api_key_env
            ))
        })
    }
}

#[derive(serde::Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(serde::Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(serde::Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(serde::Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens", skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(serde::Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(rename = "promptFeedback")]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(serde::Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(serde::Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(serde::Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

#[derive(serde::Deserialize)]
struct PromptFeedback {
    #[serde(rename = "blockReason")]
    block_reason: Option<String>,
}

#[async_trait]
impl LlmProvider for GeminiClient {
    fn check_configured(&self) -> Result<()> {
        self.api_key().map(|_| ())
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let api_key = self.api_key()?;

        let request = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                max_output_tokens: self.max_output_tokens,
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::generation(format!("Gemini request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::generation(format!(
                "Gemini generation failed ({}): {}",
                status, body
            )));
        }

        let gen_response: GenerateResponse = response
            .json()
            .await
            .map_err(|e| Error::generation(format!("Failed to parse Gemini response: {}", e)))?;

        let text: String = gen_response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| content.parts.into_iter().map(|p| p.text).collect::<String>())
            .unwrap_or_default();

        if text.trim().is_empty() {
            let reason = gen_response
                .prompt_feedback
                .and_then(|f| f.block_reason)
                .map(|r| format!(" (blocked: {})", r))
                .unwrap_or_default();
            return Err(Error::generation(format!("No text in Gemini response{}", reason)));
        }

        Ok(text.trim().to_string())
    }

    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }
}
