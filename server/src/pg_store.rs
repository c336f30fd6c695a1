//! PostgreSQL-backed profile store.
//!
//! Diesel is synchronous, so every call runs on the blocking pool. Updates lock
//! the row with `SELECT ... FOR UPDATE` and write it back in the same
//! transaction, which serializes concurrent patches for one email.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use pantry_core::{CreateOutcome, ProfilePatch, ProfileStore, StoreError, UserProfile};
use std::fmt;
use thiserror::Error;

use crate::db::DbPool;
use crate::models::{NewProfile, Profile};
use crate::schema::profiles;

#[derive(Clone)]
pub struct PgProfileStore {
    pool: DbPool,
}

impl fmt::Debug for PgProfileStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgProfileStore")
            .field("connections", &self.pool.state().connections)
            .finish()
    }
}

/// Errors raised inside a transaction before they are mapped to `StoreError`.
#[derive(Debug, Error)]
enum TxError {
    #[error(transparent)]
    Db(#[from] diesel::result::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<TxError> for StoreError {
    fn from(e: TxError) -> Self {
        match e {
            TxError::Db(e) => db_error(e),
            TxError::Store(e) => e,
        }
    }
}

fn db_error(e: diesel::result::Error) -> StoreError {
    tracing::error!("Profile query failed: {}", e);
    StoreError::Unavailable(format!("database error: {}", e))
}

fn find_profile(conn: &mut PgConnection, email: &str) -> QueryResult<Option<Profile>> {
    profiles::table
        .find(email)
        .select(Profile::as_select())
        .first(conn)
        .optional()
}

impl PgProfileStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Run `f` with a pooled connection on the blocking thread pool.
    async fn with_conn<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> Result<T, StoreError> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(|e| {
                tracing::error!("Failed to get DB connection: {}", e);
                StoreError::Unavailable(format!("no database connection: {}", e))
            })?;
            f(&mut conn)
        })
        .await
        .map_err(|e| StoreError::Unavailable(format!("database task failed: {}", e)))?
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn get(&self, email: &str) -> Result<Option<UserProfile>, StoreError> {
        let email = email.to_string();
        self.with_conn(move |conn| {
            find_profile(conn, &email)
                .map(|row| row.map(UserProfile::from))
                .map_err(db_error)
        })
        .await
    }

    async fn create(&self, profile: UserProfile) -> Result<CreateOutcome, StoreError> {
        self.with_conn(move |conn| {
            let inserted = diesel::insert_into(profiles::table)
                .values(NewProfile::from(&profile))
                .on_conflict_do_nothing()
                .execute(conn)
                .map_err(db_error)?;

            if inserted == 1 {
                return Ok(CreateOutcome::Created(profile));
            }

            // Lost the race to another create; report what is stored
            let existing = find_profile(conn, &profile.email)
                .map_err(db_error)?
                .ok_or_else(|| StoreError::NotFound(profile.email.clone()))?;
            Ok(CreateOutcome::Existing(existing.into()))
        })
        .await
    }

    async fn update(&self, email: &str, patch: &ProfilePatch) -> Result<UserProfile, StoreError> {
        let email = email.to_string();
        let patch = patch.clone();

        self.with_conn(move |conn| {
            conn.transaction::<_, TxError, _>(|conn| {
                let row = profiles::table
                    .find(email.as_str())
                    .select(Profile::as_select())
                    .for_update()
                    .first::<Profile>(conn)
                    .optional()?
                    .ok_or_else(|| StoreError::NotFound(email.clone()))?;

                let mut profile = UserProfile::from(row);
                patch.apply(&mut profile).map_err(StoreError::from)?;

                diesel::update(profiles::table.find(email.as_str()))
                    .set((
                        profiles::preferences.eq(&profile.preferences),
                        profiles::items.eq(&profile.items),
                        profiles::updated_at.eq(Utc::now()),
                    ))
                    .execute(conn)?;

                Ok(profile)
            })
            .map_err(StoreError::from)
        })
        .await
    }

    fn store_name(&self) -> &'static str {
        "postgres"
    }
}
