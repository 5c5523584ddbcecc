//! Ollama local LLM integration.
//!
//! Implements the LlmProvider trait for Ollama (local LLM).

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{check_status, AIError, GenerationSettings, LlmProvider};

/// Ollama API provider for local LLM.
pub struct OllamaProvider {
    client: Client,
    base_url: String,
    model: String,
    settings: GenerationSettings,
}

impl OllamaProvider {
    /// Create a new Ollama provider.
    ///
    /// Uses `OLLAMA_HOST` or localhost:11434 by default.
    pub fn new(client: Client, model: impl Into<String>) -> Self {
        Self {
            client,
            base_url: std::env::var("OLLAMA_HOST")
                .unwrap_or_else(|_| "http://localhost:11434".to_string()),
            model: model.into(),
            settings: GenerationSettings::default(),
        }
    }

    /// Create with a specific base URL.
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
impl LlmProvider for OllamaProvider {
    async fn complete(&self, system: &str, prompt: &str) -> anyhow::Result<String> {
        let request = OllamaRequest {
            model: self.model.clone(),
            system: system.to_string(),
            prompt: prompt.to_string(),
            stream: false,
            options: OllamaOptions {
                num_predict: self.settings.max_tokens,
                temperature: self.settings.temperature,
            },
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&request)
            .send()
            .await?;

        let response: OllamaResponse = check_status("ollama", response).await?.json().await?;
        if response.response.is_empty() && !response.done {
            return Err(AIError::NoResponse("ollama").into());
        }
        Ok(response.response)
    }

    fn name(&self) -> &str {
        "ollama"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Ollama API request structure.
#[derive(Debug, Serialize)]
struct OllamaRequest {
    model: String,
    system: String,
    prompt: String,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    num_predict: u32,
    temperature: f32,
}

/// Ollama API response structure.
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
    #[serde(default)]
    done: bool,
}
