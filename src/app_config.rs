use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::ConfigError;
use crate::file_utils::FileManager;
use crate::language_utils;

/// Application configuration module
/// This module resolves the run configuration once at startup from CLI
/// options, the environment and an optional JSON settings file.
/// Where the text to translate comes from
#[derive(Debug, Clone, PartialEq)]
pub enum InputSource {
    /// Resource file translated line by line
    File(PathBuf),
    /// A single free-standing string
    Text(String),
}

/// Resolved, validated configuration for one run
#[derive(Debug, Clone)]
pub struct Config {
    /// What to translate
    pub input: InputSource,

    /// Target language code
    pub target_language: String,

    /// Output file (file mode only)
    pub output_path: Option<PathBuf>,

    /// Google Cloud project id
    pub project_id: String,

    /// Explicit OAuth2 access token; gcloud is asked when absent
    pub access_token: Option<String>,

    /// Translation service settings
    pub service: ServiceConfig,

    /// Log level
    pub log_level: LogLevel,
}

/// Translation service settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ServiceConfig {
    /// API base URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Cloud location of the translation model
    #[serde(default = "default_location")]
    pub location: String,

    /// Language of the resource file
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// MIME type sent with every request
    #[serde(default = "default_mime_type")]
    pub mime_type: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retries for transient failures; 0 makes every failure fatal at once
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    /// Base delay for exponential backoff between retries
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            location: default_location(),
            source_language: default_source_language(),
            mime_type: default_mime_type(),
            timeout_secs: default_timeout_secs(),
            retry_count: default_retry_count(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

/// Contents of the optional JSON settings file
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Settings {
    /// Project id used when neither the CLI nor the environment has one
    #[serde(default)]
    pub project_id: Option<String>,

    /// Log level
    #[serde(default)]
    pub log_level: Option<LogLevel>,

    /// Translation service settings
    #[serde(default)]
    pub service: ServiceConfig,
}

impl Settings {
    /// Load settings from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| ConfigError::SettingsFile(format!("{}: {}", path.display(), e)))?;

        serde_json::from_reader(BufReader::new(file))
            .map_err(|e| ConfigError::SettingsFile(format!("{}: {}", path.display(), e)))
    }
}

/// Raw options as given on the command line (after environment fallback)
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Resource file to translate
    pub file: Option<PathBuf>,
    /// Text to translate
    pub text: Option<String>,
    /// Target language code
    pub language: String,
    /// Output path
    pub output: Option<PathBuf>,
    /// Cloud project id
    pub project: Option<String>,
    /// OAuth2 access token
    pub access_token: Option<String>,
    /// Log level override
    pub log_level: Option<LogLevel>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_endpoint() -> String {
    "https://translation.googleapis.com".to_string()
}

fn default_location() -> String {
    "global".to_string()
}

fn default_source_language() -> String {
    "en-US".to_string()
}

fn default_mime_type() -> String {
    "text/plain".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_retry_count() -> u32 {
    2
}

fn default_retry_backoff_ms() -> u64 {
    1000
}

impl Config {
    /// Build the run configuration, validating everything that can be
    /// checked without touching the network.
    pub fn resolve(options: RunOptions, settings: Settings) -> Result<Self, ConfigError> {
        let target_language = options.language.trim().to_string();
        language_utils::validate_target_language(&target_language)?;

        let input = match (options.file, options.text) {
            (Some(file), _) => {
                if !FileManager::file_exists(&file) {
                    return Err(ConfigError::MissingInputFile(file));
                }
                InputSource::File(file)
            }
            (None, Some(text)) => {
                if text.is_empty() {
                    return Err(ConfigError::EmptyText);
                }
                InputSource::Text(text)
            }
            (None, None) => return Err(ConfigError::EmptyText),
        };

        let project_id = options.project
            .or(settings.project_id)
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .ok_or(ConfigError::MissingProjectId)?;

        Url::parse(&settings.service.endpoint)
            .map_err(|e| ConfigError::InvalidEndpoint(format!("{}: {}", settings.service.endpoint, e)))?;

        let output_path = match &input {
            InputSource::File(file) => Some(
                options.output
                    .unwrap_or_else(|| FileManager::default_output_path(file, &target_language)),
            ),
            InputSource::Text(_) => None,
        };

        Ok(Self {
            input,
            target_language,
            output_path,
            project_id,
            access_token: options.access_token.filter(|t| !t.trim().is_empty()),
            service: settings.service,
            log_level: options.log_level.or(settings.log_level).unwrap_or_default(),
        })
    }
}
