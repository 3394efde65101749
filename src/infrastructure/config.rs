// src/infrastructure/config.rs
use crate::constants::{BASE_URL_ENV_VAR, DEFAULT_BASE_URL, DEFAULT_ORIGIN};
use crate::domain::DomainError;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// TOML configuration for the notes client
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ApiConfig {
    /// Absolute URL, or a path resolved against `origin`
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_origin")]
    pub origin: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_origin() -> String {
    DEFAULT_ORIGIN.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            origin: default_origin(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .context("Failed to parse TOML config")?;

        Ok(config)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            debug!(?path, "Loading config file");
            Self::load(path)
        } else {
            debug!(?path, "No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// `<config dir>/notes-client/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("notes-client").join("config.toml"))
    }

    /// Apply base address overrides; the CLI flag wins over the environment.
    pub fn with_overrides(mut self, cli_base_url: Option<&str>, env_base_url: Option<&str>) -> Self {
        if let Some(base_url) = cli_base_url.or(env_base_url).filter(|s| !s.trim().is_empty()) {
            self.api.base_url = base_url.trim().to_string();
        }
        self
    }

    /// Read the base address override from `NOTES_API_BASE_URL`
    pub fn env_base_url() -> Option<String> {
        std::env::var(BASE_URL_ENV_VAR).ok()
    }

    /// Absolute base address used for requests.
    pub fn resolve_base_url(&self) -> Result<String, DomainError> {
        let base_url = self.api.base_url.trim_end_matches('/');

        if base_url.starts_with("http://") || base_url.starts_with("https://") {
            return Ok(base_url.to_string());
        }

        if base_url.is_empty() || base_url.starts_with('/') {
            let origin = self.api.origin.trim_end_matches('/');
            if !(origin.starts_with("http://") || origin.starts_with("https://")) {
                return Err(DomainError::ConfigError(format!(
                    "Origin must be an http(s) URL: '{}'",
                    self.api.origin
                )));
            }
            return Ok(format!("{}{}", origin, base_url));
        }

        Err(DomainError::ConfigError(format!(
            "Base address must be an http(s) URL or start with '/': '{}'",
            self.api.base_url
        )))
    }
}
