//! Fake LLM provider for testing.
//!
//! This provider returns deterministic responses based on prompt matching,
//! allowing tests to run without network access or API costs.

use super::{CompletionRequest, LlmError, LlmProvider};
use async_trait::async_trait;
use std::sync::{Mutex, RwLock};

/// A fake LLM provider for testing.
///
/// Responses are matched by checking if the prompt contains a registered substring,
/// in registration order. If no match is found, returns a default response or error.
/// Every request is recorded so tests can assert on the exact prompt sent.
#[derive(Debug)]
pub struct FakeProvider {
    /// Ordered (prompt substring, response) pairs
    responses: RwLock<Vec<(String, String)>>,
    /// Default response if no match found
    default_response: Option<String>,
    /// When set, every call fails with this message
    failure: Option<String>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl Default for FakeProvider {
    fn default() -> Self {
        Self::new().with_default_response("{}")
    }
}

impl FakeProvider {
    /// Create a new FakeProvider with no registered responses.
    pub fn new() -> Self {
        Self {
            responses: RwLock::new(Vec::new()),
            default_response: None,
            failure: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a FakeProvider that returns a specific response for prompts containing a substring.
    pub fn with_response(prompt_contains: &str, response: &str) -> Self {
        let provider = Self::new();
        provider.add_response(prompt_contains, response);
        provider
    }

    /// Create a FakeProvider whose every call fails, as an unreachable upstream would.
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::new()
        }
    }

    /// Add a response for prompts containing a specific substring.
    pub fn add_response(&self, prompt_contains: &str, response: &str) {
        self.responses
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push((prompt_contains.to_string(), response.to_string()));
    }

    /// Set the default response when no pattern matches.
    pub fn with_default_response(mut self, response: &str) -> Self {
        self.default_response = Some(response.to_string());
        self
    }

    /// Create a FakeProvider with canned answers for every pantry prompt.
    pub fn with_pantry_responses() -> Self {
        let provider = Self::new();

        provider.add_response(
            "healthy recipes in JSON",
            r#"{"recipes": [{"name": "Vegetable Omelette", "calories": 320}, {"name": "Milk Rice Pudding", "calories": 410}]}"#,
        );

        provider.add_response(
            "step-by-step",
            "1. Wash and chop the ingredients.\n2. Heat a pan with a little oil.\n3. Cook until tender and season to taste.",
        );

        provider.add_response("Name the food item", "Apple, lasts about 4-6 weeks in the fridge.");

        provider
    }

    /// All requests received so far, oldest first.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// The most recent request, if any.
    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .cloned()
    }
}

#[async_trait]
impl LlmProvider for FakeProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        let prompt = request.prompt.clone();
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request);

        if let Some(message) = &self.failure {
            return Err(LlmError::RequestFailed(message.clone()));
        }

        let responses = self.responses.read().unwrap_or_else(|e| e.into_inner());

        // Find first matching pattern (case-insensitive)
        let prompt_lower = prompt.to_lowercase();
        for (pattern, response) in responses.iter() {
            if prompt_lower.contains(&pattern.to_lowercase()) {
                return Ok(response.clone());
            }
        }

        // Return default or error
        match &self.default_response {
            Some(response) => Ok(response.clone()),
            None => Err(LlmError::RequestFailed(format!(
                "FakeProvider: No response configured for prompt (first 100 chars): {}",
                prompt.chars().take(100).collect::<String>()
            ))),
        }
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}
