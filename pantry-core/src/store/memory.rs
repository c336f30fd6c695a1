//! In-memory profile store for tests and local development.

use super::{CreateOutcome, ProfileStore, StoreError};
use crate::profile::{ProfilePatch, UserProfile};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A profile store backed by a `HashMap` behind a lock.
///
/// Patches are applied while holding the write lock, so concurrent updates to
/// the same email serialize and none are lost.
#[derive(Debug, Default)]
pub struct MemoryStore {
    profiles: RwLock<HashMap<String, UserProfile>>,
    /// Number of successful writes, for asserting idempotence in tests.
    writes: AtomicUsize,
    /// When set, every call fails as if the backend were down.
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with profiles. Seeding does not count as writes.
    pub fn with_profiles(profiles: impl IntoIterator<Item = UserProfile>) -> Self {
        let map = profiles
            .into_iter()
            .map(|p| (p.email.clone(), p))
            .collect();
        Self {
            profiles: RwLock::new(map),
            ..Self::default()
        }
    }

    /// Number of writes that have reached the store.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Simulate an outage: all subsequent calls fail with `Unavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "memory store marked unavailable".to_string(),
            ));
        }
        Ok(())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, UserProfile>>, StoreError> {
        self.check_available()?;
        self.profiles
            .read()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, UserProfile>>, StoreError> {
        self.check_available()?;
        self.profiles
            .write()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn get(&self, email: &str) -> Result<Option<UserProfile>, StoreError> {
        Ok(self.read()?.get(email).cloned())
    }

    async fn create(&self, profile: UserProfile) -> Result<CreateOutcome, StoreError> {
        let mut profiles = self.write()?;

        if let Some(existing) = profiles.get(&profile.email) {
            return Ok(CreateOutcome::Existing(existing.clone()));
        }

        profiles.insert(profile.email.clone(), profile.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(CreateOutcome::Created(profile))
    }

    async fn update(&self, email: &str, patch: &ProfilePatch) -> Result<UserProfile, StoreError> {
        let mut profiles = self.write()?;

        let stored = profiles
            .get_mut(email)
            .ok_or_else(|| StoreError::NotFound(email.to_string()))?;

        // Work on a copy so a rejected patch leaves the stored profile untouched
        let mut updated = stored.clone();
        patch.apply(&mut updated)?;
        *stored = updated.clone();

        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(updated)
    }

    fn store_name(&self) -> &'static str {
        "memory"
    }
}
