//! In-memory storage backend.
//!
//! Used when no database is configured. State lives in two id-indexed maps
//! plus two monotonic counters, all owned by the store and guarded by a
//! mutex: the server handles requests on a multi-threaded runtime, so two
//! concurrent creations must not collide on the same id. No lock is held
//! across an await point.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::models::{AgeBucket, NewTopic, NewUser, Topic, User};
use crate::seed;
use crate::storage::{Storage, StoreError};

/// In-memory [`Storage`] implementation.
#[derive(Debug)]
pub struct MemStorage {
    inner: Mutex<Inner>,
}

#[derive(Debug)]
struct Inner {
    users: HashMap<i64, User>,
    topics: HashMap<i64, Topic>,
    next_user_id: i64,
    next_topic_id: i64,
}

impl Inner {
    fn insert_topic(&mut self, new_topic: NewTopic, created_at: DateTime<Utc>) -> Topic {
        let id = self.next_topic_id;
        self.next_topic_id += 1;

        let topic = Topic {
            id,
            title: new_topic.title,
            title_en: new_topic.title_en,
            excerpt: new_topic.excerpt,
            content: new_topic.content,
            category: new_topic.category,
            category_he: new_topic.category_he,
            age_group: new_topic.age_group,
            reading_time: new_topic.reading_time,
            icon: new_topic.icon,
            tags: new_topic.tags,
            is_daily: new_topic.is_daily,
            daily_date: new_topic.daily_date,
            is_popular: new_topic.is_popular,
            created_at,
        };
        self.topics.insert(id, topic.clone());
        topic
    }
}

impl MemStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                users: HashMap::new(),
                topics: HashMap::new(),
                next_user_id: 1,
                next_topic_id: 1,
            }),
        }
    }

    /// Create a store pre-populated with the bundled sample topics.
    ///
    /// Seeds share one creation timestamp, so listings keep fixture order
    /// among them until newer topics are created.
    pub fn seeded() -> Result<Self, StoreError> {
        let store = Self::new();
        let now = Utc::now();
        {
            let mut inner = store.lock();
            for new_topic in seed::seed_topics(now)? {
                inner.insert_topic(new_topic, now);
            }
        }
        Ok(store)
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemStorage {
    fn default() -> Self {
        Self::new()
    }
}

fn newest_first(mut topics: Vec<Topic>) -> Vec<Topic> {
    // Stable sort: equal timestamps (the seed set) keep insertion order.
    topics.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    topics
}

#[async_trait]
impl Storage for MemStorage {
    async fn get_user(&self, id: i64) -> Result<Option<User>, StoreError> {
        Ok(self.lock().users.get(&id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .lock()
            .users
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError> {
        let mut inner = self.lock();
        let id = inner.next_user_id;
        inner.next_user_id += 1;

        let user = User {
            id,
            username: new_user.username,
            password: new_user.password,
        };
        inner.users.insert(id, user.clone());
        Ok(user)
    }

    async fn get_topic(&self, id: i64) -> Result<Option<Topic>, StoreError> {
        Ok(self.lock().topics.get(&id).cloned())
    }

    async fn get_all_topics(&self) -> Result<Vec<Topic>, StoreError> {
        Ok(newest_first(self.lock().topics.values().cloned().collect()))
    }

    async fn get_topics_by_category(&self, category: &str) -> Result<Vec<Topic>, StoreError> {
        let topics = self
            .lock()
            .topics
            .values()
            .filter(|topic| topic.category == category)
            .cloned()
            .collect();
        Ok(newest_first(topics))
    }

    async fn get_topics_by_age_group(&self, bucket: &AgeBucket) -> Result<Vec<Topic>, StoreError> {
        let topics = self
            .lock()
            .topics
            .values()
            .filter(|topic| bucket.matches(&topic.age_group))
            .cloned()
            .collect();
        Ok(newest_first(topics))
    }

    async fn get_popular_topics(&self) -> Result<Vec<Topic>, StoreError> {
        let topics = self
            .lock()
            .topics
            .values()
            .filter(|topic| topic.is_popular)
            .cloned()
            .collect();
        Ok(newest_first(topics))
    }

    async fn get_daily_topic(
        &self,
        date: Option<DateTime<Utc>>,
    ) -> Result<Option<Topic>, StoreError> {
        let target = date.unwrap_or_else(Utc::now).date_naive();
        Ok(self
            .lock()
            .topics
            .values()
            .find(|topic| {
                topic.is_daily
                    && topic
                        .daily_date
                        .is_some_and(|daily| daily.date_naive() == target)
            })
            .cloned())
    }

    async fn search_topics(&self, query: &str) -> Result<Vec<Topic>, StoreError> {
        let needle = query.to_lowercase();
        let topics = self
            .lock()
            .topics
            .values()
            .filter(|topic| topic.matches_query(&needle))
            .cloned()
            .collect();
        Ok(newest_first(topics))
    }

    async fn create_topic(&self, new_topic: NewTopic) -> Result<Topic, StoreError> {
        Ok(self.lock().insert_topic(new_topic, Utc::now()))
    }
}
