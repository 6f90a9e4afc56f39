//! Postgres-backed storage.
//!
//! Each operation is a single round-trip. Search and age-group browsing
//! fetch the ordered rows and reuse the same in-process matchers as the
//! in-memory store, so both backends share one tested algorithm.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::models::{AgeBucket, NewTopic, NewUser, Topic, User};
use crate::storage::{Storage, StoreError};

/// Postgres [`Storage`] implementation.
#[derive(Debug, Clone)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    /// Wrap an existing connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_all_newest_first(&self) -> Result<Vec<Topic>, sqlx::Error> {
        sqlx::query_as(
            // language=PostgreSQL
            r#"
                SELECT id, title, title_en, excerpt, content, category, category_he,
                       age_group, reading_time, icon, tags, is_daily, daily_date,
                       is_popular, created_at
                FROM topics
                ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }
}

#[async_trait]
impl Storage for PgStorage {
    async fn get_user(&self, id: i64) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as(
            // language=PostgreSQL
            r#"
                SELECT id, username, password
                FROM users
                WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as(
            // language=PostgreSQL
            r#"
                SELECT id, username, password
                FROM users
                WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError> {
        let user = sqlx::query_as(
            // language=PostgreSQL
            r#"
                INSERT INTO users (username, password)
                VALUES ($1, $2)
                RETURNING id, username, password
            "#,
        )
        .bind(&new_user.username)
        .bind(&new_user.password)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    async fn get_topic(&self, id: i64) -> Result<Option<Topic>, StoreError> {
        let topic = sqlx::query_as(
            // language=PostgreSQL
            r#"
                SELECT id, title, title_en, excerpt, content, category, category_he,
                       age_group, reading_time, icon, tags, is_daily, daily_date,
                       is_popular, created_at
                FROM topics
                WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(topic)
    }

    async fn get_all_topics(&self) -> Result<Vec<Topic>, StoreError> {
        Ok(self.fetch_all_newest_first().await?)
    }

    async fn get_topics_by_category(&self, category: &str) -> Result<Vec<Topic>, StoreError> {
        let topics = sqlx::query_as(
            // language=PostgreSQL
            r#"
                SELECT id, title, title_en, excerpt, content, category, category_he,
                       age_group, reading_time, icon, tags, is_daily, daily_date,
                       is_popular, created_at
                FROM topics
                WHERE category = $1
                ORDER BY created_at DESC
            "#,
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await?;
        Ok(topics)
    }

    async fn get_topics_by_age_group(&self, bucket: &AgeBucket) -> Result<Vec<Topic>, StoreError> {
        let topics = self.fetch_all_newest_first().await?;
        Ok(topics
            .into_iter()
            .filter(|topic| bucket.matches(&topic.age_group))
            .collect())
    }

    async fn get_popular_topics(&self) -> Result<Vec<Topic>, StoreError> {
        let topics = sqlx::query_as(
            // language=PostgreSQL
            r#"
                SELECT id, title, title_en, excerpt, content, category, category_he,
                       age_group, reading_time, icon, tags, is_daily, daily_date,
                       is_popular, created_at
                FROM topics
                WHERE is_popular = TRUE
                ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(topics)
    }

    async fn get_daily_topic(
        &self,
        date: Option<DateTime<Utc>>,
    ) -> Result<Option<Topic>, StoreError> {
        let target = date.unwrap_or_else(Utc::now).date_naive();
        let topic = sqlx::query_as(
            // language=PostgreSQL
            r#"
                SELECT id, title, title_en, excerpt, content, category, category_he,
                       age_group, reading_time, icon, tags, is_daily, daily_date,
                       is_popular, created_at
                FROM topics
                WHERE is_daily = TRUE
                  AND daily_date IS NOT NULL
                  AND daily_date::date = $1
                LIMIT 1
            "#,
        )
        .bind(target)
        .fetch_optional(&self.pool)
        .await?;
        Ok(topic)
    }

    async fn search_topics(&self, query: &str) -> Result<Vec<Topic>, StoreError> {
        let needle = query.to_lowercase();
        let topics = self.fetch_all_newest_first().await?;
        Ok(topics
            .into_iter()
            .filter(|topic| topic.matches_query(&needle))
            .collect())
    }

    async fn create_topic(&self, new_topic: NewTopic) -> Result<Topic, StoreError> {
        let topic = sqlx::query_as(
            // language=PostgreSQL
            r#"
                INSERT INTO topics (title, title_en, excerpt, content, category,
                                    category_he, age_group, reading_time, icon, tags,
                                    is_daily, daily_date, is_popular)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
                RETURNING id, title, title_en, excerpt, content, category, category_he,
                          age_group, reading_time, icon, tags, is_daily, daily_date,
                          is_popular, created_at
            "#,
        )
        .bind(&new_topic.title)
        .bind(&new_topic.title_en)
        .bind(&new_topic.excerpt)
        .bind(&new_topic.content)
        .bind(&new_topic.category)
        .bind(&new_topic.category_he)
        .bind(&new_topic.age_group)
        .bind(new_topic.reading_time)
        .bind(&new_topic.icon)
        .bind(&new_topic.tags)
        .bind(new_topic.is_daily)
        .bind(new_topic.daily_date)
        .bind(new_topic.is_popular)
        .fetch_one(&self.pool)
        .await?;
        Ok(topic)
    }
}
