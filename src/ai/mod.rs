//! LLM provider integration.
//!
//! Each pipeline stage is a single prompt sent to a hosted (or local) model.
//! Providers are selected from a provider-qualified model string such as
//! `gemini/gemini-2.5-flash`.
//!
//! ## Providers
//!
//! - `gemini` - Google Generative Language API (`GOOGLE_API_KEY` or `GEMINI_API_KEY`)
//! - `openai` - OpenAI chat completions (`OPENAI_API_KEY`)
//! - `anthropic` / `claude` - Anthropic messages API (`ANTHROPIC_API_KEY`)
//! - `ollama` - local Ollama server (`OLLAMA_HOST`, no key)

mod claude;
mod gemini;
mod ollama;
mod openai;

pub use claude::ClaudeProvider;
pub use gemini::GeminiProvider;
pub use ollama::OllamaProvider;
pub use openai::OpenAIProvider;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::core::LlmConfig;

/// Trait for LLM providers.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send one system + user prompt pair and return the model's text.
    async fn complete(&self, system: &str, prompt: &str) -> anyhow::Result<String>;

    /// Get the provider name.
    fn name(&self) -> &str;

    /// Get the model identifier sent to the provider.
    fn model(&self) -> &str;
}

/// AI error types.
#[derive(Debug, thiserror::Error)]
pub enum AIError {
    #[error("Unknown LLM provider in model {0:?} (expected gemini/, openai/, anthropic/ or ollama/)")]
    UnknownProvider(String),

    #[error("{provider} API key not set (set {env_var} or llm.api_key)")]
    MissingApiKey { provider: &'static str, env_var: &'static str },

    #[error("{provider} API error ({status}): {body}")]
    ApiError { provider: &'static str, status: u16, body: String },

    #[error("No response from {0}")]
    NoResponse(&'static str),
}

/// Provider families understood by [`ModelSpec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Gemini,
    OpenAI,
    Anthropic,
    Ollama,
}

/// A parsed `<provider>/<model>` string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSpec {
    pub provider: ProviderKind,
    pub model: String,
}

impl ModelSpec {
    /// Parse a provider-qualified model identifier.
    pub fn parse(spec: &str) -> Result<Self, AIError> {
        let (prefix, model) =
            spec.trim().split_once('/').ok_or_else(|| AIError::UnknownProvider(spec.to_string()))?;

        let provider = match prefix.to_ascii_lowercase().as_str() {
            "gemini" | "google" => ProviderKind::Gemini,
            "openai" => ProviderKind::OpenAI,
            "anthropic" | "claude" => ProviderKind::Anthropic,
            "ollama" => ProviderKind::Ollama,
            _ => return Err(AIError::UnknownProvider(spec.to_string())),
        };

        if model.trim().is_empty() {
            return Err(AIError::UnknownProvider(spec.to_string()));
        }

        Ok(Self { provider, model: model.trim().to_string() })
    }
}

/// Sampling settings shared by all providers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSettings {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self { max_tokens: 4096, temperature: 0.7 }
    }
}

impl From<&LlmConfig> for GenerationSettings {
    fn from(config: &LlmConfig) -> Self {
        Self { max_tokens: config.max_tokens, temperature: config.temperature }
    }
}

/// Build the provider named by `config.llm.model`.
///
/// The API key comes from the config when set, otherwise from the
/// provider's environment variable.
pub fn create_provider(config: &LlmConfig) -> anyhow::Result<Box<dyn LlmProvider>> {
    let spec = ModelSpec::parse(&config.model)?;
    let client = http_client(Duration::from_secs(config.timeout_secs))?;
    let settings = GenerationSettings::from(config);

    let provider: Box<dyn LlmProvider> = match spec.provider {
        ProviderKind::Gemini => {
            let key = resolve_key(config, "gemini", &["GOOGLE_API_KEY", "GEMINI_API_KEY"])?;
            let mut provider = GeminiProvider::new(client, key, spec.model).with_settings(settings);
            if let Some(url) = &config.base_url {
                provider = provider.with_base_url(url);
            }
            Box::new(provider)
        }
        ProviderKind::OpenAI => {
            let key = resolve_key(config, "openai", &["OPENAI_API_KEY"])?;
            let mut provider = OpenAIProvider::new(client, key, spec.model).with_settings(settings);
            if let Some(url) = &config.base_url {
                provider = provider.with_base_url(url);
            }
            Box::new(provider)
        }
        ProviderKind::Anthropic => {
            let key = resolve_key(config, "anthropic", &["ANTHROPIC_API_KEY"])?;
            let mut provider = ClaudeProvider::new(client, key, spec.model).with_settings(settings);
            if let Some(url) = &config.base_url {
                provider = provider.with_base_url(url);
            }
            Box::new(provider)
        }
        ProviderKind::Ollama => {
            let mut provider = OllamaProvider::new(client, spec.model).with_settings(settings);
            if let Some(url) = &config.base_url {
                provider = provider.with_base_url(url);
            }
            Box::new(provider)
        }
    };

    tracing::info!(provider = provider.name(), model = provider.model(), "LLM provider ready");
    Ok(provider)
}

fn resolve_key(
    config: &LlmConfig,
    provider: &'static str,
    env_vars: &[&'static str],
) -> Result<String, AIError> {
    if let Some(key) = config.api_key.as_ref().filter(|k| !k.trim().is_empty()) {
        return Ok(key.clone());
    }

    env_vars
        .iter()
        .find_map(|var| std::env::var(var).ok().filter(|v| !v.trim().is_empty()))
        .ok_or(AIError::MissingApiKey { provider, env_var: env_vars[0] })
}

fn http_client(timeout: Duration) -> anyhow::Result<Client> {
    Ok(Client::builder().timeout(timeout).build()?)
}

/// Turn a non-success response into an [`AIError::ApiError`].
async fn check_status(
    provider: &'static str,
    response: reqwest::Response,
) -> anyhow::Result<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    Err(AIError::ApiError { provider, status, body }.into())
}
