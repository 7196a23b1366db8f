//! Playground configuration.
//!
//! Connection details for the completion backend used to be fixed constants;
//! they now live in [`PlaygroundConfig`], which is loaded from
//! `config.toml` in the platform config directory and passed explicitly to
//! every panel and client that needs it.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:3000";
pub const DEFAULT_PROVIDER: &str = "openai";
pub const DEFAULT_ADAPTER: &str = "openai";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaygroundConfig {
    /// Base URL of the backend, without a trailing slash
    pub endpoint: String,
    pub project_id: String,
    pub provider: String,
    pub adapter: String,
    pub model: String,
    pub temperature: f64,
    /// Public API key used for basic auth against the prompt APIs
    pub public_key: Option<String>,
    pub secret_key: Option<String>,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            project_id: String::new(),
            provider: DEFAULT_PROVIDER.to_string(),
            adapter: DEFAULT_ADAPTER.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            public_key: None,
            secret_key: None,
        }
    }
}

impl PlaygroundConfig {
    /// Default location: `<config dir>/promptlab/config.toml`
    pub fn default_path() -> PathBuf {
        if let Some(proj_dirs) = directories::ProjectDirs::from("com", "", "promptlab") {
            proj_dirs.config_dir().join(CONFIG_FILE_NAME)
        } else {
            PathBuf::from(".").join(CONFIG_FILE_NAME)
        }
    }

    /// Load the config from `path`. A missing file yields the defaults; a
    /// file that exists but does not parse is an error.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: PlaygroundConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        info!("Loaded playground config from {:?}", path);
        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        info!("Saved playground config to {:?}", path);
        Ok(())
    }

    /// Name of the first required field that is empty, if any
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.endpoint.trim().is_empty() {
            Some("endpoint")
        } else if self.project_id.trim().is_empty() {
            Some("project_id")
        } else if self.model.trim().is_empty() {
            Some("model")
        } else {
            None
        }
    }

    pub fn is_complete(&self) -> bool {
        self.missing_field().is_none()
    }

    /// Join `path` onto the endpoint, tolerating a trailing slash on either side
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.endpoint.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// `(public_key, secret_key)` when both are set
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.public_key.as_deref(), self.secret_key.as_deref()) {
            (Some(public), Some(secret)) if !public.is_empty() && !secret.is_empty() => {
                Some((public, secret))
            }
            _ => None,
        }
    }
}
