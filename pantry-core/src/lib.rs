pub mod advisor;
pub mod error;
pub mod image;
pub mod llm;
pub mod profile;
pub mod prompts;
pub mod service;
pub mod store;

pub use advisor::RecipeAdvisor;
pub use error::ServiceError;
pub use image::{ImageData, ImageError, MAX_FILE_SIZE};
pub use llm::{
    create_provider, CompletionRequest, ConfigError, FakeProvider, LlmConfig, LlmError,
    LlmProvider, OpenAiProvider, ResponseFormat,
};
pub use profile::{entry_text, PatchError, ProfilePatch, UserProfile};
pub use service::ProfileService;
pub use store::{CreateOutcome, MemoryStore, ProfileStore, StoreError};
