//! Application configuration management.
//!
//! This module handles loading the application configuration, which
//! currently holds the authentication service base URL.
//!
//! Configuration is read from `~/.config/authgate/config.json`; the
//! `AUTHGATE_API_URL` environment variable overrides the stored value.

use std::path::PathBuf;

use anyhow::Result;
use serde::Deserialize;

/// Application name used for config/data directory paths
const APP_NAME: &str = "authgate";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Base URL used when nothing is configured
const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Environment variable overriding the configured base URL
const API_URL_ENV_VAR: &str = "AUTHGATE_API_URL";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    pub api_base_url: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Resolved base URL: environment override, then config, then default
    pub fn api_base_url(&self) -> String {
        std::env::var(API_URL_ENV_VAR)
            .ok()
            .or_else(|| self.api_base_url.clone())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
    }

    /// Directory where the token cookie lives
    pub fn cookie_dir(&self) -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME))
    }
}
