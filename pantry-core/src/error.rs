use thiserror::Error;

use crate::image::ImageError;
use crate::llm::LlmError;
use crate::store::StoreError;

/// Errors surfaced by the profile service and recipe advisor.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("User not found")]
    NotFound { email: String },

    #[error("{0}")]
    InvalidArgument(String),

    /// The profile store or the language model failed. Never retried here.
    #[error("Upstream failure: {0}")]
    Upstream(String),
}

impl From<StoreError> for ServiceError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(email) => ServiceError::NotFound { email },
            StoreError::Rejected(reason) => ServiceError::InvalidArgument(reason.to_string()),
            StoreError::Unavailable(message) => ServiceError::Upstream(message),
        }
    }
}

impl From<LlmError> for ServiceError {
    fn from(e: LlmError) -> Self {
        ServiceError::Upstream(e.to_string())
    }
}

impl From<ImageError> for ServiceError {
    fn from(e: ImageError) -> Self {
        ServiceError::InvalidArgument(e.to_string())
    }
}
