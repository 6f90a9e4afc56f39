use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Topic model - a single educational content record
///
/// Content is Hebrew-first; `title_en` carries an optional English title for
/// bilingual display. Wire representation is camelCase to match the front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    /// Unique topic identifier, assigned by the store
    pub id: i64,
    /// Hebrew title
    pub title: String,
    /// Optional English title
    pub title_en: Option<String>,
    /// Short teaser shown on listing cards
    pub excerpt: String,
    /// Full article body, newline-delimited paragraphs
    pub content: String,
    /// Category key (science, history, arts, technology, ...)
    pub category: String,
    /// Hebrew display label for the category
    pub category_he: String,
    /// Free-form age token such as "3-7", "8+", "12-18"
    pub age_group: String,
    /// Estimated reading time in minutes
    pub reading_time: i32,
    /// Emoji glyph shown next to the title
    pub icon: String,
    /// Optional ordered tag list, searched alongside the body fields
    pub tags: Option<Vec<String>>,
    /// Whether this topic can be featured as a daily topic
    pub is_daily: bool,
    /// Calendar date this topic is featured on, when `is_daily` is set
    pub daily_date: Option<DateTime<Utc>>,
    /// Whether this topic appears on the popular shelf
    pub is_popular: bool,
    /// When the topic was created; set by the store, never updated
    pub created_at: DateTime<Utc>,
}

impl Topic {
    /// Free-text match over title, excerpt, content, and each tag.
    ///
    /// Pure substring containment - no tokenization, no ranking. `needle`
    /// must already be lowercased; candidate fields are lowercased here so
    /// the match is case-insensitive for scripts that have case.
    pub fn matches_query(&self, needle: &str) -> bool {
        let contains = |field: &str| field.to_lowercase().contains(needle);
        contains(&self.title)
            || contains(&self.excerpt)
            || contains(&self.content)
            || self
                .tags
                .as_ref()
                .is_some_and(|tags| tags.iter().any(|tag| contains(tag)))
    }
}

/// Payload for creating a topic; the store assigns `id` and `created_at`.
///
/// Serde defaults normalize absent optional fields, so every stored topic
/// carries explicit null/false values rather than missing ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewTopic {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub title: String,
    #[serde(default)]
    pub title_en: Option<String>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub excerpt: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub content: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub category: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub category_he: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub age_group: String,
    #[validate(range(min = 1, message = "must be a positive number of minutes"))]
    pub reading_time: i32,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub icon: String,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub is_daily: bool,
    #[serde(default)]
    pub daily_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_popular: bool,
}

/// User model
///
/// Passwords are stored as-is; there is no authentication layer on top of
/// this store yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier, assigned by the store
    pub id: i64,
    /// Unique username, matched case-sensitively
    pub username: String,
    pub password: String,
}

/// Payload for creating a user; the store assigns `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub password: String,
}

/// Age-group matching rule for the browse-by-age endpoint.
///
/// Topics carry free-form age tokens ("8+", "12-18", ...), while the site
/// browses three fixed buckets. Each canonical bucket accepts the raw tokens
/// it covers and matches by substring containment; any other input falls
/// back to exact equality against the stored token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgeBucket {
    /// The "3-7" bucket
    ThreeToSeven,
    /// The "8-14" bucket
    EightToFourteen,
    /// The "15+" bucket
    FifteenPlus,
    /// Any other raw token, matched exactly
    Exact(String),
}

impl AgeBucket {
    /// Map a raw path token to its bucket.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "3-7" => Self::ThreeToSeven,
            "8-14" => Self::EightToFourteen,
            "15+" => Self::FifteenPlus,
            other => Self::Exact(other.to_string()),
        }
    }

    /// Raw age tokens this bucket accepts.
    fn tokens(&self) -> &'static [&'static str] {
        match self {
            Self::ThreeToSeven => &["3-7", "6+"],
            Self::EightToFourteen => &["8-14", "8+", "10+", "11+", "12+"],
            Self::FifteenPlus => &["15+", "14+", "12-18"],
            Self::Exact(_) => &[],
        }
    }

    /// Whether a topic's age token belongs to this bucket.
    pub fn matches(&self, age_group: &str) -> bool {
        match self {
            Self::Exact(token) => age_group == token,
            bucket => bucket
                .tokens()
                .iter()
                .any(|token| age_group.contains(token)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topic(title: &str, tags: Option<Vec<&str>>) -> Topic {
        Topic {
            id: 1,
            title: title.to_string(),
            title_en: None,
            excerpt: "excerpt".to_string(),
            content: "content".to_string(),
            category: "science".to_string(),
            category_he: "מדעים".to_string(),
            age_group: "8+".to_string(),
            reading_time: 5,
            icon: "🔬".to_string(),
            tags: tags.map(|t| t.into_iter().map(String::from).collect()),
            is_daily: false,
            daily_date: None,
            is_popular: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn query_matches_title_substring_case_insensitively() {
        let t = topic("All About AI", None);
        assert!(t.matches_query("about ai"));
        assert!(!t.matches_query("robotics"));
    }

    #[test]
    fn query_matches_hebrew_title_and_tags() {
        let t = topic("כיצד פועל הזיכרון האנושי?", Some(vec!["פסיכולוגיה"]));
        assert!(t.matches_query("זיכרון"));
        assert!(t.matches_query("פסיכולוגיה"));
        assert!(!t.matches_query("אסטרונומיה"));
    }

    #[test]
    fn age_bucket_accepts_covered_tokens() {
        let bucket = AgeBucket::parse("8-14");
        assert_eq!(bucket, AgeBucket::EightToFourteen);
        for token in ["8-14", "8+", "10+", "11+", "12+"] {
            assert!(bucket.matches(token), "{token} should fall in 8-14");
        }
        assert!(!bucket.matches("3-7"));
        assert!(!bucket.matches("15+"));
    }

    #[test]
    fn age_bucket_falls_back_to_exact_equality() {
        let bucket = AgeBucket::parse("12-18");
        assert!(bucket.matches("12-18"));
        assert!(!bucket.matches("12-180"));
        assert!(!bucket.matches("12"));
    }

    #[test]
    fn fifteen_plus_bucket_covers_teen_tokens() {
        let bucket = AgeBucket::parse("15+");
        assert!(bucket.matches("12-18"));
        assert!(bucket.matches("14+"));
        assert!(!bucket.matches("8+"));
    }
}
