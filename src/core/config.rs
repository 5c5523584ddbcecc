//! Configuration management for ProjectForge.
//!
//! Handles loading and saving configuration from TOML files, with a small
//! set of environment variable overrides applied on top.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Model used when neither the config file nor `LLM_MODEL` names one.
pub const DEFAULT_MODEL: &str = "gemini/gemini-2.5-flash";

/// Text substituted for sections whose stage never completed.
pub const DEFAULT_PLACEHOLDER: &str = "[Task did not complete]";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// LLM provider settings
    pub llm: LlmConfig,

    /// Report output settings
    pub output: OutputConfig,
}

/// LLM provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider-qualified model, e.g. `gemini/gemini-2.5-flash` or `ollama/llama3.2`
    pub model: String,

    /// API key (falls back to the provider's environment variable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Override for the provider's API base URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Maximum tokens per stage response
    pub max_tokens: u32,

    /// Sampling temperature
    pub temperature: f32,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

/// Report output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory reports are written to
    pub directory: PathBuf,

    /// Write the plain-text report
    pub write_text: bool,

    /// Write the HTML report
    pub write_html: bool,

    /// Write the PDF report (requires the `pdf` feature)
    pub write_pdf: bool,

    /// Text shown for sections whose stage did not complete
    pub placeholder: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            base_url: None,
            max_tokens: 4096,
            temperature: 0.7,
            timeout_secs: 300,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            write_text: true,
            write_html: true,
            write_pdf: true,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Looks for config in:
    /// 1. `.projectforge.toml` in current directory
    /// 2. `~/.config/projectforge/config.toml`
    /// 3. Falls back to defaults
    ///
    /// Environment overrides (`LLM_MODEL`, `PROJECTFORGE_OUTPUT_DIR`) are
    /// applied last.
    pub fn load() -> anyhow::Result<Self> {
        let mut config = Self::load_file()?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn load_file() -> anyhow::Result<Self> {
        // Try local config first
        let local_config = PathBuf::from(".projectforge.toml");
        if local_config.exists() {
            return Self::load_from_file(&local_config);
        }

        // Try global config
        if let Some(config_dir) = Self::config_dir() {
            let global_config = config_dir.join("config.toml");
            if global_config.exists() {
                return Self::load_from_file(&global_config);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config {}: {}", path.display(), e))?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Apply environment overrides through `lookup`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(model) = lookup("LLM_MODEL").filter(|m| !m.trim().is_empty()) {
            self.llm.model = model.trim().to_string();
        }
        if let Some(dir) = lookup("PROJECTFORGE_OUTPUT_DIR").filter(|d| !d.trim().is_empty()) {
            self.output.directory = PathBuf::from(dir);
        }
    }

    /// Save configuration to the global config file.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_dir = Self::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        std::fs::create_dir_all(&config_dir)?;

        let config_path = config_dir.join("config.toml");
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;

        Ok(())
    }

    /// Get the config directory path.
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("projectforge"))
    }
}
