/*!
 * Mock translator for testing.
 *
 * This module provides a translator that simulates different service behaviors:
 * - `MockTranslator::working()` - Always succeeds with tagged text
 * - `MockTranslator::fail_on(n)` - Succeeds until the Nth request, which fails
 * - `MockTranslator::failing()` - Always fails with an error
 * - `MockTranslator::empty()` - Succeeds with no translation
 */

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::errors::ProviderError;
use crate::providers::Translator;

/// Request seen by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockRequest {
    /// The text to translate
    pub text: String,
    /// Target language
    pub target_language: String,
}

/// Behavior mode for the mock translator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds
    Working,
    /// Fails on the Nth request (1-based) and succeeds otherwise
    FailOn { request: usize },
    /// Always fails with an error
    Failing,
    /// Returns an empty translation
    Empty,
}

/// Mock translator recording every request it receives
#[derive(Debug)]
pub struct MockTranslator {
    /// Behavior mode
    behavior: MockBehavior,
    /// Requests received so far, shared between clones
    requests: Arc<Mutex<Vec<MockRequest>>>,
    /// Custom response generator (optional)
    custom_response: Option<fn(&MockRequest) -> String>,
}

impl MockTranslator {
    /// Create a new mock translator with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            requests: Arc::new(Mutex::new(Vec::new())),
            custom_response: None,
        }
    }

    /// Create a working mock translator that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a mock translator that fails on the given request number
    pub fn fail_on(request: usize) -> Self {
        Self::new(MockBehavior::FailOn { request })
    }

    /// Create a failing mock translator that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that returns no translation
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Set a custom response generator
    pub fn with_custom_response(mut self, generator: fn(&MockRequest) -> String) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// Requests received so far, in order
    pub fn requests(&self) -> Vec<MockRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Number of requests received so far
    pub fn request_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or_default()
    }

    fn respond(&self, request: &MockRequest) -> String {
        match self.custom_response {
            Some(generator) => generator(request),
            None => format!("[{}] {}", request.target_language, request.text),
        }
    }
}

impl Clone for MockTranslator {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior,
            requests: Arc::clone(&self.requests),
            custom_response: self.custom_response,
        }
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, ProviderError> {
        let request = MockRequest {
            text: text.to_string(),
            target_language: target_language.to_string(),
        };

        let count = {
            let mut requests = self.requests.lock()
                .map_err(|e| ProviderError::RequestFailed(format!("mock state poisoned: {}", e)))?;
            requests.push(request.clone());
            requests.len()
        };

        match self.behavior {
            MockBehavior::Working => Ok(self.respond(&request)),

            MockBehavior::FailOn { request: failing } if failing == count => Err(ProviderError::ApiError {
                status_code: 503,
                message: format!("Simulated failure (request #{})", count),
            }),

            MockBehavior::FailOn { .. } => Ok(self.respond(&request)),

            MockBehavior::Failing => Err(ProviderError::ApiError {
                status_code: 500,
                message: "Simulated provider failure".to_string(),
            }),

            MockBehavior::Empty => Ok(String::new()),
        }
    }
}
