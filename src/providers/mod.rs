/*!
 * Translation service clients.
 *
 * - `google`: Google Cloud Translation v3 REST client
 * - `mock`: In-process translator for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for translation backends
///
/// The source language is a property of the backend; callers only pick the
/// target language per request.
#[async_trait]
pub trait Translator: Send + Sync + Debug {
    /// Translate a single piece of text
    ///
    /// # Arguments
    /// * `text` - The content to translate
    /// * `target_language` - Language code to translate into, e.g. "fr" or "zh-CN"
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The first translation, or an empty
    ///   string when the service returned none
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, ProviderError>;
}

pub mod google;
pub mod mock;
