use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::network::endpoint::CHAT_PATH;

pub const DEFAULT_CONFIG_PATH: &str = "config/chat.json";
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

pub const API_URL_ENV: &str = "CHAT_API_URL";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base address of the answering service, without the chat path.
    #[serde(default)]
    pub api_url: Option<String>,
    /// No timeout when unset; a hung request keeps the session pending.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl AppConfig {
    pub fn base_url(&self) -> &str {
        self.api_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_URL)
    }

    pub fn chat_url(&self) -> String {
        format!("{}{}", self.base_url().trim_end_matches('/'), CHAT_PATH)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Lets `CHAT_API_URL` replace the address from the file.
    pub fn with_env(self) -> Self {
        self.with_api_url_override(env::var(API_URL_ENV).ok())
    }

    fn with_api_url_override(mut self, api_url: Option<String>) -> Self {
        if let Some(url) = api_url.filter(|url| !url.trim().is_empty()) {
            self.api_url = Some(url);
        }
        self
    }
}

pub fn load_config(path: &str) -> AppConfig {
    let path = Path::new(path);
    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<AppConfig>(&content) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Failed to parse config file {}: {err}", path.display());
                AppConfig::default()
            }
        },
        Err(err) => {
            log::info!(
                "Config file {} not found ({err}); using defaults",
                path.display()
            );
            AppConfig::default()
        }
    }
}

/// Resolves the configuration once at startup: CLI flag, then environment,
/// then config file, then built-in defaults.
pub fn resolve(path: &str, cli_api_url: Option<String>) -> AppConfig {
    let mut config = load_config(path).with_env();
    if let Some(url) = cli_api_url {
        config.api_url = Some(url);
    }

    log::info!("Answering endpoint: {}", config.chat_url());
    config
}
