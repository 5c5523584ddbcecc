//! Claude API integration.
//!
//! Implements the LlmProvider trait for Claude.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{check_status, AIError, GenerationSettings, LlmProvider};

/// Claude API provider.
pub struct ClaudeProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    settings: GenerationSettings,
}

impl ClaudeProvider {
    /// Create a new Claude provider.
    pub fn new(client: Client, api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            base_url: "https://api.anthropic.com/v1".to_string(),
            settings: GenerationSettings::default(),
        }
    }

    /// Create with a custom base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Create with specific sampling settings.
    pub fn with_settings(mut self, settings: GenerationSettings) -> Self {
        self.settings = settings;
        self
    }
}

#[async_trait]
impl LlmProvider for ClaudeProvider {
    async fn complete(&self, system: &str, prompt: &str) -> anyhow::Result<String> {
        let request = ClaudeRequest {
            model: self.model.clone(),
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
            system: system.to_string(),
            messages: vec![Message { role: "user".to_string(), content: prompt.to_string() }],
        };

        let response = self
            .client
            .post(format!("{}/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await?;

        let response: ClaudeResponse = check_status("anthropic", response).await?.json().await?;

        let text: String = response.content.into_iter().filter_map(|c| c.text).collect();
        if text.is_empty() {
            return Err(AIError::NoResponse("anthropic").into());
        }
        Ok(text)
    }

    fn name(&self) -> &str {
        "anthropic"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Claude API request structure.
#[derive(Debug, Serialize)]
struct ClaudeRequest {
    model: String,
    max_tokens: u32,
    temperature: f32,
    system: String,
    messages: Vec<Message>,
}

/// Message in a Claude request.
#[derive(Debug, Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

/// Claude API response structure.
#[derive(Debug, Deserialize)]
struct ClaudeResponse {
    content: Vec<ContentBlock>,
}

/// Content block in a Claude response. Non-text blocks carry no `text`.
#[derive(Debug, Deserialize)]
struct ContentBlock {
    text: Option<String>,
}
