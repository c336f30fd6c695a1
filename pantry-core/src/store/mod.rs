//! Profile store abstraction.
//!
//! The store owns all persisted profile state. The service layer only relies on
//! the three operations below; each one must be atomic with respect to other
//! calls for the same email.

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

use crate::profile::{PatchError, ProfilePatch, UserProfile};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("No profile for {0}")]
    NotFound(String),

    #[error(transparent)]
    Rejected(#[from] PatchError),

    #[error("Profile store unavailable: {0}")]
    Unavailable(String),
}

/// Result of a conditional create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// The profile was written.
    Created(UserProfile),
    /// A profile already existed for the email; nothing was written.
    Existing(UserProfile),
}

impl CreateOutcome {
    pub fn profile(&self) -> &UserProfile {
        match self {
            CreateOutcome::Created(p) | CreateOutcome::Existing(p) => p,
        }
    }
}

/// Trait for profile stores, keyed by email.
#[async_trait]
pub trait ProfileStore: Send + Sync + fmt::Debug {
    /// Fetch a profile, `None` if the email has none.
    async fn get(&self, email: &str) -> Result<Option<UserProfile>, StoreError>;

    /// Write `profile` only if no profile exists for its email.
    async fn create(&self, profile: UserProfile) -> Result<CreateOutcome, StoreError>;

    /// Apply `patch` to the stored profile as one atomic read-modify-write and
    /// return the profile as written.
    ///
    /// Fails with [`StoreError::NotFound`] if the email has no profile and with
    /// [`StoreError::Rejected`] if the patch is invalid against the current
    /// state, in which case nothing is written.
    async fn update(&self, email: &str, patch: &ProfilePatch) -> Result<UserProfile, StoreError>;

    /// Backend name for logs (e.g., "memory", "postgres").
    fn store_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_profile() {
        let profile = UserProfile::new("a@x.com", "A");

        assert_eq!(CreateOutcome::Created(profile.clone()).profile(), &profile);
        assert_eq!(CreateOutcome::Existing(profile.clone()).profile(), &profile);
    }
}
