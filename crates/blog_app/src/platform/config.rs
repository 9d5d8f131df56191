//! Optional RON configuration for the terminal app.
//!
//! A missing file means defaults; a malformed one is reported instead of
//! silently ignored.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use blog_engine::{ClientSettings, EngineConfig};
use log::LevelFilter;
use serde::{Deserialize, Serialize};

pub(crate) const DEFAULT_CONFIG_FILE: &str = "blog_composer.ron";
pub(crate) const ENDPOINT_ENV: &str = "BLOG_COMPOSER_ENDPOINT";

#[derive(Debug, thiserror::Error)]
pub(crate) enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("unknown log level {0:?}")]
    LogLevel(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub endpoint: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: Option<u64>,
    pub extra_headers: Vec<(String, String)>,
    /// Offered in the help text; any other model id is accepted as well.
    pub models: Vec<String>,
    pub output_dir: PathBuf,
    pub open_documents: bool,
    pub log_file: PathBuf,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let client = ClientSettings::default();
        Self {
            endpoint: client.base_url,
            connect_timeout_secs: client.connect_timeout.as_secs(),
            request_timeout_secs: client.request_timeout.map(|timeout| timeout.as_secs()),
            extra_headers: client.extra_headers,
            models: vec!["gemini".to_string(), "gpt".to_string()],
            output_dir: PathBuf::from("output"),
            open_documents: true,
            log_file: PathBuf::from("blog_composer.log"),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn log_level(&self) -> Result<LevelFilter, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::LogLevel(self.log_level.clone()))
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            client: ClientSettings {
                base_url: self.endpoint.clone(),
                connect_timeout: Duration::from_secs(self.connect_timeout_secs),
                request_timeout: self.request_timeout_secs.map(Duration::from_secs),
                extra_headers: self.extra_headers.clone(),
            },
            output_dir: self.output_dir.clone(),
            open_documents: self.open_documents,
        }
    }

    /// Applies environment overrides through `lookup`.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(endpoint) = lookup(ENDPOINT_ENV).filter(|value| !value.trim().is_empty()) {
            self.endpoint = endpoint.trim().to_string();
        }
        self
    }
}

pub(crate) fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(AppConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let config: AppConfig = ron::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    config.log_level()?;
    Ok(config)
}
