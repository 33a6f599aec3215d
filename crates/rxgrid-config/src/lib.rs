//! Layered configuration for the rxgrid catalog viewer.
//!
//! Values merge in precedence order: built-in defaults, then
//! `config.toml` in the platform config directory, then `RXGRID_*`
//! environment variables. The TUI binary applies its own CLI-flag
//! overrides on top.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Config struct ───────────────────────────────────────────────────

/// Runtime configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Backend base URL (e.g. `http://localhost:3001/api`).
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Records per table page. Fixed for the session once loaded.
    #[serde(default = "default_items_per_page")]
    pub items_per_page: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout: default_timeout(),
            items_per_page: default_items_per_page(),
        }
    }
}

fn default_api_url() -> String {
    "http://localhost:3001/api".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_items_per_page() -> usize {
    50
}

impl Config {
    /// Parse and validate the backend base URL.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        self.api_url.parse().map_err(|_| ConfigError::Validation {
            field: "api_url".into(),
            reason: format!("invalid URL: {}", self.api_url),
        })
    }

    /// Request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "rxgrid", "rxgrid").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("rxgrid");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from defaults + file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(config_path()))
        .merge(Env::prefixed("RXGRID_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, falling back to defaults on any failure.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_local_dev_backend() {
        let config = Config::default();
        assert_eq!(config.api_url, "http://localhost:3001/api");
        assert_eq!(config.timeout, 30);
        assert_eq!(config.items_per_page, 50);
    }

    #[test]
    fn base_url_parses_the_default() {
        let config = Config::default();
        let url = config.base_url().unwrap();
        assert_eq!(url.host_str(), Some("localhost"));
        assert_eq!(url.port(), Some(3001));
    }

    #[test]
    fn base_url_rejects_garbage() {
        let config = Config {
            api_url: "not a url".into(),
            ..Config::default()
        };
        assert!(matches!(
            config.base_url(),
            Err(ConfigError::Validation { .. })
        ));
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: Config = toml_from_str(r#"api_url = "http://pharma.internal/api""#);
        assert_eq!(config.api_url, "http://pharma.internal/api");
        assert_eq!(config.items_per_page, 50);
    }

    fn toml_from_str(raw: &str) -> Config {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::string(raw))
            .extract()
            .unwrap()
    }
}
