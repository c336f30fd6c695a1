//! Recipe advisor: turns a pantry profile into LLM requests.
//!
//! Model output is returned verbatim. Nothing here parses or validates what the
//! model says, and upstream failures are reported once, without retries.

use std::sync::Arc;

use crate::error::ServiceError;
use crate::image::{ImageData, MAX_FILE_SIZE};
use crate::llm::{CompletionRequest, LlmProvider};
use crate::prompts::{
    render_recipes_prompt, render_steps_prompt, CLASSIFY_IMAGE_PROMPT, RECIPES_SYSTEM_PROMPT,
    STEPS_SYSTEM_PROMPT,
};
use crate::service::ProfileService;

#[derive(Debug, Clone)]
pub struct RecipeAdvisor {
    profiles: ProfileService,
    llm: Arc<dyn LlmProvider>,
    max_upload_bytes: usize,
}

impl RecipeAdvisor {
    pub fn new(profiles: ProfileService, llm: Arc<dyn LlmProvider>) -> Self {
        Self {
            profiles,
            llm,
            max_upload_bytes: MAX_FILE_SIZE,
        }
    }

    pub fn with_max_upload_bytes(mut self, max_upload_bytes: usize) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    /// Ask the model for recipes using the profile's items and preferences.
    /// Returns the model's JSON text as-is.
    pub async fn suggest_recipes(&self, email: &str) -> Result<String, ServiceError> {
        let profile = self.profiles.get_profile(email).await?;

        let request =
            CompletionRequest::new(render_recipes_prompt(&profile.preferences, &profile.items))
                .with_system(RECIPES_SYSTEM_PROMPT)
                .json();

        self.complete("recipes", request).await
    }

    /// Ask the model for step-by-step instructions for a dish.
    pub async fn recipe_steps(&self, item_name: &str) -> Result<String, ServiceError> {
        let item_name = item_name.trim();
        if item_name.is_empty() {
            return Err(ServiceError::InvalidArgument(
                "itemName is required".to_string(),
            ));
        }

        let request =
            CompletionRequest::new(render_steps_prompt(item_name)).with_system(STEPS_SYSTEM_PROMPT);

        self.complete("recipe_steps", request).await
    }

    /// Ask the vision model to name the food in an uploaded image.
    pub async fn classify_image(&self, data: Vec<u8>) -> Result<String, ServiceError> {
        let image = ImageData::from_upload(data, self.max_upload_bytes)?;
        tracing::debug!(
            media_type = %image.media_type,
            bytes = image.data.len(),
            "Classifying image"
        );

        let request = CompletionRequest::new(CLASSIFY_IMAGE_PROMPT).with_image(image);

        self.complete("classify_image", request).await
    }

    async fn complete(
        &self,
        prompt_name: &str,
        request: CompletionRequest,
    ) -> Result<String, ServiceError> {
        tracing::debug!(
            prompt_name = prompt_name,
            provider = self.llm.provider_name(),
            model = self.llm.model_name(),
            "Requesting completion"
        );

        self.llm.complete(request).await.map_err(|e| {
            tracing::warn!(prompt_name = prompt_name, error = %e, "LLM call failed");
            e.into()
        })
    }
}
