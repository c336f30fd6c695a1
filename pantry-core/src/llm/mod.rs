//! LLM provider abstraction for recipe suggestions and food recognition.
//!
//! This module provides a trait-based abstraction over chat-completion providers
//! (any OpenAI-compatible endpoint, or a fake for tests). Providers make exactly
//! one upstream call per completion; retrying is left to the caller.

mod config;
mod fake;
mod openai;

pub use config::{ConfigError, LlmConfig, ProviderKind};
pub use fake::FakeProvider;
pub use openai::OpenAiProvider;

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use crate::image::ImageData;

/// Error type for LLM operations.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("API returned error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

/// Output format requested from the model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseFormat {
    #[default]
    Text,
    /// Ask the model for a JSON object. The reply is not validated.
    JsonObject,
}

/// A single-turn completion request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionRequest {
    pub system: Option<String>,
    pub prompt: String,
    /// Images attached to the user turn. A non-empty list selects the vision model.
    pub images: Vec<ImageData>,
    pub response_format: ResponseFormat,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_image(mut self, image: ImageData) -> Self {
        self.images.push(image);
        self
    }

    pub fn json(mut self) -> Self {
        self.response_format = ResponseFormat::JsonObject;
        self
    }
}

/// Trait for LLM providers.
///
/// Implementations should be stateless and thread-safe. The provider is responsible
/// for making API calls and returning the model's text response.
#[async_trait]
pub trait LlmProvider: Send + Sync + fmt::Debug {
    /// Send a request to the model and get its text response.
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError>;

    /// Get the provider name (e.g., "openai", "fake").
    fn provider_name(&self) -> &'static str;

    /// Get the text model name (e.g., "gpt-3.5-turbo-1106").
    fn model_name(&self) -> &str;
}

/// Build the provider selected by `config`.
pub fn create_provider(config: &LlmConfig) -> Result<Arc<dyn LlmProvider>, LlmError> {
    match config.provider {
        ProviderKind::Fake => Ok(Arc::new(FakeProvider::with_pantry_responses())),
        ProviderKind::OpenAi => Ok(Arc::new(OpenAiProvider::new(config)?)),
    }
}
