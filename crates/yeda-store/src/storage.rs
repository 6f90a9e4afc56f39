use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{AgeBucket, NewTopic, NewUser, Topic, User};

/// Errors surfaced by a [`Storage`] backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing database rejected the operation or is unreachable.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    /// The bundled seed fixture could not be parsed.
    #[error("invalid seed fixture: {0}")]
    Seed(#[from] serde_json::Error),
}

/// Uniform contract over topic and user storage.
///
/// Two interchangeable implementations exist: [`crate::MemStorage`] (seeded,
/// used when no database is configured) and [`crate::PgStorage`]. The HTTP
/// layer depends only on this trait, never on a concrete backend.
///
/// Listing operations return topics sorted by `created_at` descending, most
/// recently created first. Single-entity lookups signal "not found" as
/// `Ok(None)`, never as an error. Returned records are snapshots; mutating
/// them does not touch store state.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Look up a user by id.
    async fn get_user(&self, id: i64) -> Result<Option<User>, StoreError>;

    /// Look up a user by exact, case-sensitive username.
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Create a user, assigning the next id.
    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError>;

    /// Look up a topic by id.
    async fn get_topic(&self, id: i64) -> Result<Option<Topic>, StoreError>;

    /// All topics, newest first.
    async fn get_all_topics(&self) -> Result<Vec<Topic>, StoreError>;

    /// Topics whose category equals `category` exactly, newest first.
    async fn get_topics_by_category(&self, category: &str) -> Result<Vec<Topic>, StoreError>;

    /// Topics whose age token falls into `bucket`, newest first.
    async fn get_topics_by_age_group(&self, bucket: &AgeBucket) -> Result<Vec<Topic>, StoreError>;

    /// Topics flagged popular, newest first.
    async fn get_popular_topics(&self) -> Result<Vec<Topic>, StoreError>;

    /// The topic featured on `date`'s calendar day (now when `None`).
    ///
    /// A topic qualifies when it is flagged daily and its daily date falls on
    /// the same calendar day; the first match wins. At most one qualifying
    /// topic is expected, but that is not enforced.
    async fn get_daily_topic(&self, date: Option<DateTime<Utc>>)
    -> Result<Option<Topic>, StoreError>;

    /// Case-insensitive substring search over title, excerpt, content, and
    /// tags, newest first.
    async fn search_topics(&self, query: &str) -> Result<Vec<Topic>, StoreError>;

    /// Create a topic, assigning the next id and the current time.
    async fn create_topic(&self, new_topic: NewTopic) -> Result<Topic, StoreError>;
}
