//! Service configuration.
//!
//! Settings come from a `service.toml` file with environment-variable
//! overrides; everything has a default so the server runs with no config
//! at all (in-memory repository, in-process engine, no Telegram relay).

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level service configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub repository: RepositorySettings,
    #[serde(default)]
    pub engine: EngineSettings,
    #[serde(default)]
    pub telegram: TelegramSettings,
}

/// Bind address settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Repository backend selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositorySettings {
    #[serde(rename = "type", default = "default_repo_type")]
    pub repo_type: String,
}

/// Generation engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSettings {
    /// "local" for the in-process stand-in, "http" for a remote engine.
    #[serde(default = "default_engine_mode")]
    pub mode: String,
    /// Base URL of the remote engine (http mode only).
    #[serde(default)]
    pub base_url: String,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

/// Telegram relay settings. Relay is disabled unless both fields are set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TelegramSettings {
    #[serde(default)]
    pub bot_token: String,
    #[serde(default)]
    pub chat_id: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_repo_type() -> String {
    "local".to_string()
}

fn default_engine_mode() -> String {
    "local".to_string()
}

fn default_poll_interval_ms() -> u64 {
    500
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for RepositorySettings {
    fn default() -> Self {
        Self {
            repo_type: default_repo_type(),
        }
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            mode: default_engine_mode(),
            base_url: String::new(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        use anyhow::Context;
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file {:?}", path.as_ref()))?;
        let config: ServiceConfig =
            toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Load configuration from the default locations, falling back to
    /// defaults when no file exists, then apply environment overrides.
    ///
    /// Searches for `service.toml` in the current directory and its parent.
    pub fn load() -> anyhow::Result<Self> {
        let search_paths = [
            PathBuf::from("service.toml"),
            PathBuf::from("../service.toml"),
        ];

        let mut config = ServiceConfig::default();
        for path in search_paths {
            if path.exists() {
                config = Self::from_file(&path)?;
                break;
            }
        }
        config.apply_env_overrides();
        Ok(config)
    }

    /// Environment variables win over file settings.
    fn apply_env_overrides(&mut self) {
        if let Ok(host) = env::var("HOST") {
            self.server.host = host;
        }
        if let Some(port) = env::var("PORT").ok().and_then(|s| s.parse().ok()) {
            self.server.port = port;
        }
        if let Ok(url) = env::var("ENGINE_URL") {
            self.engine.base_url = url;
            self.engine.mode = "http".to_string();
        }
        if let Ok(token) = env::var("TELEGRAM_BOT_TOKEN") {
            self.telegram.bot_token = token;
        }
        if let Ok(chat_id) = env::var("TELEGRAM_CHAT_ID") {
            self.telegram.chat_id = chat_id;
        }
    }

    /// Whether the Telegram relay is fully configured.
    pub fn telegram_enabled(&self) -> bool {
        !self.telegram.bot_token.is_empty() && !self.telegram.chat_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.repository.repo_type, "local");
        assert_eq!(config.engine.mode, "local");
        assert!(!config.telegram_enabled());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 9000

[repository]
type = "local"

[engine]
mode = "http"
base_url = "http://engine.internal:8000"
poll_interval_ms = 250

[telegram]
bot_token = "123:abc"
chat_id = "-100200300"
"#;
        let config: ServiceConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.engine.mode, "http");
        assert_eq!(config.engine.poll_interval_ms, 250);
        assert!(config.telegram_enabled());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let toml = r#"
[server]
port = 3000
"#;
        let config: ServiceConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.engine.mode, "local");
    }
}
