//! Profile service: the rules for creating and editing pantry profiles.
//!
//! The service is stateless. Every edit is handed to the store as a single
//! [`ProfilePatch`], so validation that depends on current state (such as the
//! bounds of an item index) happens inside the store's atomic update and never
//! against a stale read.

use std::sync::Arc;

use crate::error::ServiceError;
use crate::profile::{ProfilePatch, UserProfile};
use crate::store::{CreateOutcome, ProfileStore};

#[derive(Debug, Clone)]
pub struct ProfileService {
    store: Arc<dyn ProfileStore>,
}

/// Trim an email and reject it if nothing is left.
fn require_email(email: &str) -> Result<&str, ServiceError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ServiceError::InvalidArgument(
            "Email is required".to_string(),
        ));
    }
    Ok(email)
}

impl ProfileService {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self { store }
    }

    /// Create a profile, or return the existing one untouched.
    ///
    /// Safe to retry: an existing profile is never overwritten and no write is
    /// issued for it.
    pub async fn create_user(&self, email: &str, name: &str) -> Result<CreateOutcome, ServiceError> {
        let email = require_email(email)?;

        if let Some(existing) = self.store.get(email).await? {
            tracing::debug!(email = email, "Profile already exists");
            return Ok(CreateOutcome::Existing(existing));
        }

        let outcome = self.store.create(UserProfile::new(email, name)).await?;
        if let CreateOutcome::Created(_) = &outcome {
            tracing::info!(email = email, store = self.store.store_name(), "Created profile");
        }
        Ok(outcome)
    }

    /// Replace the whole preference list.
    pub async fn set_preferences(
        &self,
        email: &str,
        preferences: Vec<String>,
    ) -> Result<UserProfile, ServiceError> {
        self.apply(email, ProfilePatch::SetPreferences(preferences))
            .await
    }

    /// Append one preference, keeping earlier ones.
    pub async fn add_preference(
        &self,
        email: &str,
        preference: String,
    ) -> Result<UserProfile, ServiceError> {
        self.apply(email, ProfilePatch::AppendPreference(preference))
            .await
    }

    /// Append one pantry item at the end of the list.
    pub async fn add_item(&self, email: &str, item: String) -> Result<UserProfile, ServiceError> {
        self.apply(email, ProfilePatch::AppendItem(item)).await
    }

    pub async fn get_profile(&self, email: &str) -> Result<UserProfile, ServiceError> {
        let email = require_email(email)?;
        self.store
            .get(email)
            .await?
            .ok_or_else(|| ServiceError::NotFound {
                email: email.to_string(),
            })
    }

    /// Remove the item at `index`. Negative or out-of-range indices are rejected
    /// without touching the profile.
    pub async fn delete_item(&self, email: &str, index: i64) -> Result<UserProfile, ServiceError> {
        let index = usize::try_from(index)
            .map_err(|_| ServiceError::InvalidArgument(format!("Invalid item index {}", index)))?;
        self.apply(email, ProfilePatch::RemoveItem { index }).await
    }

    async fn apply(&self, email: &str, patch: ProfilePatch) -> Result<UserProfile, ServiceError> {
        let email = require_email(email)?;
        tracing::debug!(email = email, patch = patch.kind(), "Updating profile");

        self.store.update(email, &patch).await.map_err(|e| {
            tracing::debug!(email = email, patch = patch.kind(), error = %e, "Profile update failed");
            e.into()
        })
    }
}
