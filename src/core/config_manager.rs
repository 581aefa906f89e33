// src/core/config_manager.rs
//! Client configuration: defaults, optional `config.yaml`, then environment overrides

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000/api";
pub const DEFAULT_CAPABILITY_HEADER: &str = "X-Admin-Password";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const CONFIG_FILE: &str = "config.yaml";
const STATE_DIR: &str = ".job_board";
const STATE_FILE: &str = "state.toml";

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub environment: String,
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub capability_header: String,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub state_path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub log_file: Option<PathBuf>,
    pub filter: String,
}

/// One environment section of `config.yaml`. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
struct FileSection {
    api_base_url: Option<String>,
    timeout_seconds: Option<u64>,
    capability_header: Option<String>,
    state_path: Option<PathBuf>,
    log_file: Option<PathBuf>,
    log_filter: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: FileSection,
    #[serde(default)]
    production: FileSection,
}

impl ConfigManager {
    /// Load all configuration layers
    pub fn load() -> Result<Self> {
        let environment = Self::get_environment();

        let config_path = PathBuf::from(CONFIG_FILE);
        let mut config = if config_path.exists() {
            let content =
                std::fs::read_to_string(&config_path).context("Failed to read config.yaml")?;
            Self::from_yaml_str(&content, &environment)?
        } else {
            Self::defaults(&environment)
        };

        config.apply_env_overrides();
        Ok(config)
    }

    fn get_environment() -> String {
        std::env::var("JOB_BOARD_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    /// Built-in defaults, used when no `config.yaml` is present
    pub fn defaults(environment: &str) -> Self {
        Self {
            environment: environment.to_string(),
            api: ApiConfig {
                base_url: DEFAULT_API_BASE_URL.to_string(),
                timeout_seconds: DEFAULT_TIMEOUT_SECS,
                capability_header: DEFAULT_CAPABILITY_HEADER.to_string(),
            },
            storage: StorageConfig {
                state_path: Self::default_state_path(),
            },
            logging: LoggingConfig {
                log_file: None,
                filter: "warn".to_string(),
            },
        }
    }

    /// Parse a `config.yaml` body and pick the section for `environment`
    pub fn from_yaml_str(content: &str, environment: &str) -> Result<Self> {
        let file: ConfigFile =
            serde_yaml::from_str(content).context("Failed to parse config.yaml")?;

        let section = match environment {
            "production" => file.production,
            _ => file.local,
        };

        let mut config = Self::defaults(environment);
        if let Some(url) = section.api_base_url {
            config.api.base_url = url;
        }
        if let Some(secs) = section.timeout_seconds {
            config.api.timeout_seconds = secs;
        }
        if let Some(header) = section.capability_header {
            config.api.capability_header = header;
        }
        if let Some(path) = section.state_path {
            config.storage.state_path = Self::resolve_path(&path)?;
        }
        if let Some(path) = section.log_file {
            config.logging.log_file = Some(Self::resolve_path(&path)?);
        }
        if let Some(filter) = section.log_filter {
            config.logging.filter = filter;
        }

        config.api.base_url = normalize_base_url(&config.api.base_url);
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("JOB_BOARD_API_URL") {
            self.api.base_url = normalize_base_url(&url);
        }
        if let Ok(path) = std::env::var("JOB_BOARD_STATE_PATH") {
            self.storage.state_path = PathBuf::from(path);
        }
        if let Ok(path) = std::env::var("JOB_BOARD_LOG_FILE") {
            self.logging.log_file = Some(PathBuf::from(path));
        }
    }

    /// Override the API base URL (used by the `--api-url` flag)
    pub fn with_api_url(mut self, url: &str) -> Self {
        self.api.base_url = normalize_base_url(url);
        self
    }

    pub fn with_state_path(mut self, path: PathBuf) -> Self {
        self.storage.state_path = path;
        self
    }

    fn default_state_path() -> PathBuf {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(STATE_DIR)
            .join(STATE_FILE)
    }

    fn resolve_path(path: &Path) -> Result<PathBuf> {
        if path.is_absolute() {
            Ok(path.to_path_buf())
        } else {
            let current_dir = std::env::current_dir().context("Failed to get current directory")?;
            Ok(current_dir.join(path))
        }
    }
}

/// Strip trailing slashes so endpoint paths can be appended directly
pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
