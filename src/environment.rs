// src/environment.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_LOG_FILE: &str = "/tmp/resume-analyzer.log";
const DEFAULT_CONFIG_FILE: &str = "analyzer.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
    /// File the values came from; `None` means built-in defaults
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    local: EnvironmentConfig,
    production: EnvironmentConfig,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_FILE)
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
            log_file: default_log_file(),
            source: None,
        }
    }
}

impl EnvironmentConfig {
    /// Load configuration based on environment
    pub fn load() -> Result<Self> {
        let environment = Self::get_environment();
        let config_path = std::env::var("ANALYZER_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));

        let mut config = Self::load_from_file(&config_path, &environment)?;

        if let Ok(url) = std::env::var("ANALYZER_BASE_URL") {
            config.base_url = url;
        }

        Ok(config.normalized())
    }

    pub fn get_environment() -> String {
        std::env::var("ANALYZER_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .or_else(|_| std::env::var("ENV"))
            .unwrap_or_else(|_| "local".to_string())
    }

    /// Missing file means built-in defaults; a file that exists must parse.
    pub fn load_from_file(config_path: &Path, environment: &str) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let config_content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config_file: ConfigFile = serde_yaml::from_str(&config_content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        let mut env_config = match environment {
            "production" => config_file.production,
            _ => config_file.local,
        };
        env_config.source = Some(config_path.to_path_buf());

        Ok(env_config.normalized())
    }

    /// Command-line flags win over file and environment
    pub fn with_overrides(
        mut self,
        base_url: Option<String>,
        timeout_secs: Option<u64>,
        log_file: Option<PathBuf>,
    ) -> Self {
        if let Some(url) = base_url {
            self.base_url = url;
        }
        if timeout_secs.is_some() {
            self.timeout_secs = timeout_secs;
        }
        if let Some(path) = log_file {
            self.log_file = path;
        }
        self.normalized()
    }

    /// Where the configuration came from, for the startup log
    pub fn describe_source(&self) -> String {
        match &self.source {
            Some(path) => path.display().to_string(),
            None => "built-in defaults".to_string(),
        }
    }

    fn normalized(mut self) -> Self {
        self.base_url = self.base_url.trim_end_matches('/').to_string();
        self
    }
}
