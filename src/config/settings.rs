//! Application settings management

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::analysis::TemplateKind;

/// Environment variable holding the Anthropic credential.
pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

const ENDPOINT_ENV: &str = "DEMO_INSIGHTS_ENDPOINT";
const MODEL_ENV: &str = "DEMO_INSIGHTS_MODEL";

/// Main application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// General settings
    #[serde(default)]
    pub general: GeneralSettings,

    /// LLM settings
    #[serde(default)]
    pub llm: LlmSettings,

    /// Email drafting settings
    #[serde(default)]
    pub email: EmailSettings,

    /// TUI settings
    #[serde(default)]
    pub tui: TuiSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralSettings {
    /// Directory that analysis exports are written to (empty = current directory)
    #[serde(default)]
    pub export_dir: PathBuf,

    /// Default log filter for CLI commands (RUST_LOG and --verbose take precedence)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// LLM provider (anthropic)
    #[serde(default = "default_llm_provider")]
    pub provider: String,

    /// API key; ANTHROPIC_API_KEY is used when empty
    #[serde(default)]
    pub api_key: String,

    /// Model name
    #[serde(default = "default_llm_model")]
    pub model: String,

    /// API endpoint (empty = https://api.anthropic.com/v1)
    #[serde(default)]
    pub endpoint: String,

    /// Output token limit for transcript analysis
    #[serde(default = "default_analysis_max_tokens")]
    pub analysis_max_tokens: u32,

    /// Output token limit for email drafts
    #[serde(default = "default_email_max_tokens")]
    pub email_max_tokens: u32,

    /// Request timeout in seconds (0 = HTTP client default)
    #[serde(default)]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmailSettings {
    /// Template used when none is given on the command line
    #[serde(default)]
    pub default_template: TemplateKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TuiSettings {
    /// Wrap long lines in the insight panels
    #[serde(default = "default_true")]
    pub wrap_panels: bool,
}

// Default value functions

fn default_log_level() -> String {
    "info".to_string()
}

fn default_llm_provider() -> String {
    "anthropic".to_string()
}

fn default_llm_model() -> String {
    "claude-3-haiku-20240307".to_string()
}

fn default_analysis_max_tokens() -> u32 {
    4096
}

fn default_email_max_tokens() -> u32 {
    1024
}

fn default_true() -> bool {
    true
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            export_dir: PathBuf::new(),
            log_level: default_log_level(),
        }
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: default_llm_provider(),
            api_key: String::new(),
            model: default_llm_model(),
            endpoint: String::new(),
            analysis_max_tokens: default_analysis_max_tokens(),
            email_max_tokens: default_email_max_tokens(),
            request_timeout_secs: 0,
        }
    }
}

impl Default for TuiSettings {
    fn default() -> Self {
        Self {
            wrap_panels: true,
        }
    }
}

impl Settings {
    /// Load settings from the configuration file
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        let mut settings = Self::load_from(&config_path)?;
        settings.apply_env_overrides();

        Ok(settings)
    }

    /// Load settings from an explicit path, falling back to defaults when missing.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            tracing::debug!("No config file found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if self.llm.api_key.trim().is_empty() {
            if let Some(key) = non_empty_env(API_KEY_ENV) {
                self.llm.api_key = key;
            }
        }
        if let Some(endpoint) = non_empty_env(ENDPOINT_ENV) {
            self.llm.endpoint = endpoint;
        }
        if let Some(model) = non_empty_env(MODEL_ENV) {
            self.llm.model = model;
        }
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "demo-insights", "demo-insights")
            .context("Could not determine config directory")?;

        let config_dir = dirs.config_dir();
        Ok(config_dir.join("config.toml"))
    }

    /// Write default configuration to a file
    pub fn write_default(path: &Path) -> Result<()> {
        let settings = Self::default();
        let content = toml::to_string_pretty(&settings)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Directory exports land in when the caller does not pick one.
    pub fn export_dir(&self) -> PathBuf {
        if self.general.export_dir.as_os_str().is_empty() {
            PathBuf::from(".")
        } else {
            self.general.export_dir.clone()
        }
    }

    /// Whether a credential is available for the generation service.
    pub fn has_api_key(&self) -> bool {
        !self.llm.api_key.trim().is_empty()
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
