//! Configuration Management
//!
//! Handles persistent configuration storage for seckill-admin.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::backend::DEFAULT_SUCCESS_CODE;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const BASE_URL_ENV: &str = "SECKILL_ADMIN_BASE_URL";
pub const TOKEN_ENV: &str = "SECKILL_ADMIN_TOKEN";

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Backend base URL
    #[serde(default)]
    pub base_url: Option<String>,
    /// Session token from the last login
    #[serde(default)]
    pub token: Option<String>,
    /// Request timeout in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Envelope code meaning success
    #[serde(default)]
    pub success_code: Option<i64>,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("seckill-admin").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from a specific file; missing or corrupt files yield defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring unreadable config {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {:?}", parent))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))?;

        Ok(())
    }

    /// Get effective base URL (overrides > config > default)
    pub fn effective_base_url(&self) -> String {
        self.base_url
            .clone()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    /// Get effective token (overrides > config)
    pub fn effective_token(&self) -> Option<String> {
        self.token.clone().filter(|v| !v.is_empty())
    }

    pub fn effective_timeout_secs(&self) -> u64 {
        self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }

    pub fn effective_success_code(&self) -> i64 {
        self.success_code.unwrap_or(DEFAULT_SUCCESS_CODE)
    }

    /// Apply command-line (or environment) overrides without persisting them
    pub fn with_overrides(mut self, base_url: Option<String>, token: Option<String>) -> Self {
        if base_url.is_some() {
            self.base_url = base_url;
        }
        if token.is_some() {
            self.token = token;
        }
        self
    }

    /// Set token and save
    pub fn set_token(&mut self, token: &str) -> Result<()> {
        self.token = Some(token.to_string());
        self.save()
    }

    /// Clear token and save
    pub fn clear_token(&mut self) -> Result<()> {
        self.token = None;
        self.save()
    }

    /// Set base URL and save
    pub fn set_base_url(&mut self, base_url: &str) -> Result<()> {
        self.base_url = Some(base_url.to_string());
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.json"));
        assert_eq!(config, Config::default());
        assert_eq!(config.effective_timeout_secs(), DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.effective_success_code(), DEFAULT_SUCCESS_CODE);
    }

    #[test]
    fn corrupt_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();
        assert_eq!(Config::load_from(&path), Config::default());
    }

    #[test]
    fn save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            base_url: Some("http://backend:9000".to_string()),
            token: Some("tok".to_string()),
            timeout_secs: Some(5),
            success_code: Some(1),
        };

        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path), config);
    }

    #[test]
    fn overrides_replace_only_given_values() {
        let config = Config {
            base_url: Some("http://a".to_string()),
            token: Some("old".to_string()),
            ..Default::default()
        }
        .with_overrides(None, Some("new".to_string()));

        assert_eq!(config.base_url.as_deref(), Some("http://a"));
        assert_eq!(config.token.as_deref(), Some("new"));
    }
}
