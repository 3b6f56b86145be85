/*!
 * Error types for the xml-translate application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;

use thiserror::Error;

/// Errors detected while resolving the run configuration.
///
/// These are raised before any file is opened or any request is sent.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No target language was given
    #[error("Must specify a target language code")]
    MissingLanguage,

    /// Target language code contains characters no language tag can have
    #[error("Invalid language code: '{0}'")]
    InvalidLanguage(String),

    /// The input file does not exist
    #[error("XML file was not found '{}'", .0.display())]
    MissingInputFile(PathBuf),

    /// Free text mode was requested with an empty string
    #[error("Text was not found ''")]
    EmptyText,

    /// No cloud project id from the CLI, the environment or the settings file
    #[error("Must specify a project ID either as an argument or must be an environment variable that you have set.")]
    MissingProjectId,

    /// Service endpoint is not a valid URL
    #[error("Invalid service endpoint '{0}'")]
    InvalidEndpoint(String),

    /// The settings file could not be read or parsed
    #[error("Invalid settings file: {0}")]
    SettingsFile(String),
}

/// Errors that can occur when talking to the translation service
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting or quota
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

impl ProviderError {
    /// Whether repeating the same request may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::ConnectionError(_) | Self::RateLimitExceeded(_) => true,
            Self::ApiError { status_code, .. } => *status_code >= 500,
            _ => false,
        }
    }
}

/// Errors that abort a transcoding run
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the translation service
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error reading the input or writing the output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
