//! Study planner configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the proxy URL
pub const PROXY_URL_ENV: &str = "GEMINI_PROXY_URL";

/// Environment variable overriding the model name
pub const MODEL_ENV: &str = "GEMINI_MODEL";

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Model query configuration
    pub assistant: AssistantConfig,

    /// Task storage configuration
    pub storage: StorageConfig,
}

impl Config {
    /// Load configuration with fallback chain, then apply environment overrides
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        let mut config = Self::load_file_chain(config_path)?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn load_file_chain(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .studyplanner.yml
        let local_config = PathBuf::from(".studyplanner.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/studyplanner/studyplanner.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("studyplanner").join("studyplanner.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Apply environment overrides using the given lookup
    ///
    /// Empty values are treated as unset.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(PROXY_URL_ENV) {
            self.assistant.proxy_url = Some(url);
        }
        if let Some(model) = get(MODEL_ENV) {
            self.assistant.model = model;
        }
    }
}

/// Model query adapter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Backend relay endpoint; takes priority over the direct API
    #[serde(rename = "proxy-url")]
    pub proxy_url: Option<String>,

    /// Environment variable containing the provider API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// Model identifier
    pub model: String,

    /// Provider base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Nucleus-sampling threshold
    #[serde(rename = "top-p")]
    pub top_p: f32,

    /// Output token cap
    #[serde(rename = "max-output-tokens")]
    pub max_output_tokens: u32,

    /// Request timeout in milliseconds (none by default)
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: Option<u64>,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            proxy_url: None,
            api_key_env: "GEMINI_API_KEY".to_string(),
            model: "gemini-2.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            temperature: 0.35,
            top_p: 0.95,
            max_output_tokens: 512,
            timeout_ms: None,
        }
    }
}

/// Which transport answers prompts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transport {
    /// Developer-controlled backend relay
    Proxy { url: String },
    /// Direct provider API call
    Direct { api_key: String },
    /// Canned local replies
    Offline,
}

impl AssistantConfig {
    /// Read the API key from the configured environment variable
    pub fn get_api_key(&self) -> Option<String> {
        self.get_api_key_with(|key| std::env::var(key).ok())
    }

    /// Read the API key using the given lookup
    pub fn get_api_key_with<F>(&self, lookup: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        lookup(&self.api_key_env).filter(|k| !k.trim().is_empty())
    }

    /// Pick the transport: proxy first, then API key, then offline
    pub fn transport(&self) -> Transport {
        self.transport_with(|key| std::env::var(key).ok())
    }

    /// Pick the transport using the given environment lookup
    pub fn transport_with<F>(&self, lookup: F) -> Transport
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = self.proxy_url.as_ref().filter(|u| !u.trim().is_empty()) {
            return Transport::Proxy { url: url.clone() };
        }
        match self.get_api_key_with(lookup) {
            Some(api_key) => Transport::Direct { api_key },
            None => Transport::Offline,
        }
    }
}

/// Task storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the task list slot
    #[serde(rename = "data-dir")]
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        // Use XDG data directory (~/.local/share/studyplanner on Linux)
        let data_dir = dirs::data_dir()
            .map(|d| d.join("studyplanner"))
            .unwrap_or_else(|| PathBuf::from(".studyplanner"));

        Self { data_dir }
    }
}
