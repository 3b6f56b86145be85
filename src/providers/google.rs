use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::app_config::ServiceConfig;
use crate::errors::ProviderError;
use crate::providers::Translator;

/// Google Cloud Translation v3 client
pub struct GoogleTranslate {
    /// HTTP client for API requests
    client: Client,
    /// Full `:translateText` URL for the configured project and location
    url: String,
    /// Cloud project billed for the requests
    project_id: String,
    /// OAuth2 bearer token
    access_token: String,
    /// Language of every request's content
    source_language: String,
    /// MIME type of the content
    mime_type: String,
    /// Maximum number of retry attempts
    max_retries: u32,
    /// Base backoff time in milliseconds for exponential backoff
    backoff_base_ms: u64,
}

/// Body of a `translateText` request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateTextRequest {
    /// Texts to translate; this client always sends exactly one
    pub contents: Vec<String>,
    /// Language to translate into
    pub target_language_code: String,
    /// Language of the contents
    pub source_language_code: String,
    /// Format of the contents
    pub mime_type: String,
}

/// Body of a `translateText` response
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateTextResponse {
    /// One entry per requested content; may be absent
    #[serde(default)]
    pub translations: Vec<Translation>,
}

/// A single translated content
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Translation {
    /// The translated text
    #[serde(default)]
    pub translated_text: String,
    /// Only set when no source language was given
    #[serde(default)]
    pub detected_language_code: Option<String>,
}

/// Google API error envelope
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

impl TranslateTextRequest {
    /// Create a request for one text
    pub fn new(
        text: impl Into<String>,
        target_language: impl Into<String>,
        source_language: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Self {
        Self {
            contents: vec![text.into()],
            target_language_code: target_language.into(),
            source_language_code: source_language.into(),
            mime_type: mime_type.into(),
        }
    }
}

impl GoogleTranslate {
    /// Create a new client for a project
    pub fn new(
        project_id: impl Into<String>,
        access_token: impl Into<String>,
        service: &ServiceConfig,
    ) -> Result<Self, ProviderError> {
        let project_id = project_id.into();
        let client = Client::builder()
            .timeout(Duration::from_secs(service.timeout_secs))
            .build()
            .map_err(|e| ProviderError::RequestFailed(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: Self::translate_url(&service.endpoint, &project_id, &service.location),
            project_id,
            access_token: access_token.into(),
            source_language: service.source_language.clone(),
            mime_type: service.mime_type.clone(),
            max_retries: service.retry_count,
            backoff_base_ms: service.retry_backoff_ms,
        })
    }

    /// `translateText` URL for a project and location
    pub fn translate_url(endpoint: &str, project_id: &str, location: &str) -> String {
        format!(
            "{}/v3/projects/{}/locations/{}:translateText",
            endpoint.trim_end_matches('/'),
            project_id,
            location
        )
    }

    /// Extract the first translation, or an empty string if there is none
    pub fn extract_text(response: &TranslateTextResponse) -> String {
        response.translations.first()
            .map(|t| t.translated_text.clone())
            .unwrap_or_default()
    }

    /// Map a non-success HTTP status and body to a provider error
    pub fn error_from_status(status: StatusCode, body: &str) -> ProviderError {
        let message = match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) if envelope.error.status.is_empty() => envelope.error.message,
            Ok(envelope) => format!("{} ({})", envelope.error.message, envelope.error.status),
            Err(_) => body.trim().to_string(),
        };

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderError::AuthenticationError(message),
            StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimitExceeded(message),
            _ => ProviderError::ApiError {
                status_code: status.as_u16(),
                message,
            },
        }
    }

    /// Send one request without retrying
    async fn translate_once(&self, request: &TranslateTextRequest) -> Result<String, ProviderError> {
        let response = self.client.post(&self.url)
            .bearer_auth(&self.access_token)
            .header("x-goog-user-project", &self.project_id)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    ProviderError::ConnectionError(e.to_string())
                } else {
                    ProviderError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response.text().await
            .map_err(|e| ProviderError::ConnectionError(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            return Err(Self::error_from_status(status, &body));
        }

        let parsed: TranslateTextResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        Ok(Self::extract_text(&parsed))
    }
}

impl fmt::Debug for GoogleTranslate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleTranslate")
            .field("url", &self.url)
            .field("project_id", &self.project_id)
            .field("source_language", &self.source_language)
            .field("max_retries", &self.max_retries)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Translator for GoogleTranslate {
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, ProviderError> {
        let request = TranslateTextRequest::new(text, target_language, &self.source_language, &self.mime_type);

        let mut attempt = 0;
        loop {
            match self.translate_once(&request).await {
                Ok(translated) => return Ok(translated),
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    let delay_ms = self.backoff_base_ms.saturating_mul(1 << attempt.min(16));
                    attempt += 1;
                    warn!(
                        "Translation request failed ({}), retrying in {}ms ({}/{})",
                        e, delay_ms, attempt, self.max_retries
                    );
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Ask the gcloud CLI for an access token of the active account
pub async fn gcloud_access_token() -> Result<String, ProviderError> {
    debug!("Requesting access token from gcloud");

    let output = tokio::process::Command::new("gcloud")
        .args(["auth", "print-access-token"])
        .output()
        .await
        .map_err(|e| ProviderError::AuthenticationError(format!("Failed to run gcloud: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ProviderError::AuthenticationError(format!(
            "gcloud auth print-access-token failed: {}",
            stderr.trim()
        )));
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() {
        return Err(ProviderError::AuthenticationError(
            "gcloud returned an empty access token".to_string(),
        ));
    }

    Ok(token)
}
