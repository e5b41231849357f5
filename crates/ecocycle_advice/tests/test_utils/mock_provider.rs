//! Mock advice provider for testing.

use async_trait::async_trait;
use ecocycle_error::{ProviderError, ProviderErrorKind, ProviderResult};
use ecocycle_interface::{AdviceProvider, AdviceRequest};
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

/// Behavior configuration for mock responses.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Always return success with the given text
    Success(String),
    /// Always return the specified error
    Error(ProviderErrorKind),
    /// Fail N times with the error, then succeed with the text
    FailThenSucceed {
        fail_count: usize,
        error: ProviderErrorKind,
        success_text: String,
    },
    /// Return a sequence of responses (errors, successes or delays)
    Sequence(Vec<MockResponse>),
}

/// A single mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Success(String),
    Error(ProviderErrorKind),
    /// Sleep for the duration, then succeed with the text
    Delayed(Duration, String),
}

/// Mock provider for testing.
///
/// Records every prompt it receives and when, so tests can check ordering
/// and pacing without making real API calls.
pub struct MockProvider {
    behavior: MockBehavior,
    calls: Mutex<Vec<(Instant, String)>>,
    model_name: String,
}

impl MockProvider {
    /// Create a mock provider that always succeeds with the given text.
    pub fn new_success(text: impl Into<String>) -> Self {
        Self::new_with_behavior(MockBehavior::Success(text.into()))
    }

    /// Create a mock provider that always fails with the given error.
    #[allow(dead_code)]
    pub fn new_error(error: ProviderErrorKind) -> Self {
        Self::new_with_behavior(MockBehavior::Error(error))
    }

    /// Create a mock provider that fails N times, then succeeds.
    #[allow(dead_code)]
    pub fn new_fail_then_succeed(
        fail_count: usize,
        error: ProviderErrorKind,
        success_text: impl Into<String>,
    ) -> Self {
        Self::new_with_behavior(MockBehavior::FailThenSucceed {
            fail_count,
            error,
            success_text: success_text.into(),
        })
    }

    /// Create a mock provider with a sequence of responses.
    #[allow(dead_code)]
    pub fn new_sequence(responses: Vec<MockResponse>) -> Self {
        Self::new_with_behavior(MockBehavior::Sequence(responses))
    }

    /// Create a mock provider with custom behavior.
    pub fn new_with_behavior(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            calls: Mutex::new(Vec::new()),
            model_name: "mock-gemini".to_string(),
        }
    }

    /// Get the number of times generate() was called.
    #[allow(dead_code)]
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Prompts received, in call order.
    #[allow(dead_code)]
    pub fn prompts(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(_, p)| p.clone()).collect()
    }

    /// Times at which generate() was called.
    #[allow(dead_code)]
    pub fn call_times(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().iter().map(|(t, _)| *t).collect()
    }

    fn next_response(&self, prompt: &str) -> MockResponse {
        let mut calls = self.calls.lock().unwrap();
        let current_count = calls.len();
        calls.push((Instant::now(), prompt.to_string()));

        match &self.behavior {
            MockBehavior::Success(text) => MockResponse::Success(text.clone()),
            MockBehavior::Error(kind) => MockResponse::Error(kind.clone()),
            MockBehavior::FailThenSucceed {
                fail_count,
                error,
                success_text,
            } => {
                if current_count < *fail_count {
                    MockResponse::Error(error.clone())
                } else {
                    MockResponse::Success(success_text.clone())
                }
            }
            MockBehavior::Sequence(responses) => {
                responses.get(current_count).cloned().unwrap_or_else(|| {
                    MockResponse::Error(ProviderErrorKind::ApiRequest(format!(
                        "Mock sequence exhausted (call {} beyond {} responses)",
                        current_count + 1,
                        responses.len()
                    )))
                })
            }
        }
    }
}

#[async_trait]
impl AdviceProvider for MockProvider {
    async fn generate(&self, req: &AdviceRequest) -> ProviderResult<String> {
        let response = self.next_response(req.prompt());
        tokio::time::sleep(Duration::from_millis(1)).await;
        match response {
            MockResponse::Success(text) => Ok(text),
            MockResponse::Error(kind) => Err(ProviderError::new(kind)),
            MockResponse::Delayed(delay, text) => {
                tokio::time::sleep(delay).await;
                Ok(text)
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock-gemini"
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
