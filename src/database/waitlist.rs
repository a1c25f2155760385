use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use super::DbManager;
use crate::web::types::{SignupSource, ValidEmail};

/// Postgres SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// A waitlist entry that is about to be stored. `created_at` is assigned by the database.
#[derive(Debug, Clone)]
pub struct NewWaitlistEntry {
    pub email: ValidEmail,
    pub source: SignupSource,
}

impl NewWaitlistEntry {
    pub fn new(email: ValidEmail, source: SignupSource) -> Self {
        Self { email, source }
    }
}

/// Result of an insert: `created` is `false` when the email was already on the waitlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertOutcome {
    pub created: bool,
}

/// Persistent, unique-keyed storage of waitlist emails.
#[async_trait]
pub trait WaitlistStore: Send + Sync {
    /// Inserts the entry. A row that already exists for the same email is *not* an error,
    /// it is reported as `InsertOutcome { created: false }`.
    async fn insert(&self, entry: &NewWaitlistEntry) -> StoreResult<InsertOutcome>;
}

#[async_trait]
impl WaitlistStore for DbManager {
    #[tracing::instrument(
        name = "Saving waitlist entry to the database",
        skip_all,
        fields(source = entry.source.as_ref())
    )]
    async fn insert(&self, entry: &NewWaitlistEntry) -> StoreResult<InsertOutcome> {
        let query = sqlx::query(
            r#"
        INSERT INTO waitlist (id, email, source)
        VALUES ($1, $2, $3)
    "#,
        )
        .bind(Uuid::new_v4())
        .bind(entry.email.as_ref())
        .bind(entry.source.as_ref());

        // The unique constraint on `email` decides atomically whether this is a new entry.
        let query_result = query.execute(self.db()).await;
        let already_registered = was_already_registered(query_result)?;
        debug!(already_registered, "insert finished");

        Ok(InsertOutcome {
            created: !already_registered,
        })
    }
}

// ###################################
// ->   HELPERS
// ###################################

/// Checks whether the insert failed only because the email is already stored.
/// Returns `Ok(true)` in that case, `Ok(false)` if the insert went through
/// and propagates every other error.
fn was_already_registered<T>(query_result: Result<T, sqlx::Error>) -> StoreResult<bool> {
    match query_result {
        Ok(_) => Ok(false),
        Err(sqlx::Error::Database(er)) if er.code().as_deref() == Some(UNIQUE_VIOLATION) => {
            Ok(true)
        }
        Err(error) => Err(error.into()),
    }
}

// ###################################
// ->   ERROR
// ###################################
pub type StoreResult<T> = core::result::Result<T, StoreError>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
}
