//! Seed fixture for the in-memory store.
//!
//! The sample topics live in `seed/topics.json` as data, not code; the
//! in-memory store feeds them through the same creation path as runtime
//! inserts, so seeded and fresh records are indistinguishable.

use chrono::{DateTime, Utc};

use crate::models::NewTopic;

const TOPICS_JSON: &str = include_str!("../seed/topics.json");

/// Parse the bundled topic fixture.
///
/// The fixture flags its daily topic without dating it; that record is
/// stamped with `now`, so a freshly started process features it today.
pub fn seed_topics(now: DateTime<Utc>) -> Result<Vec<NewTopic>, serde_json::Error> {
    let mut topics: Vec<NewTopic> = serde_json::from_str(TOPICS_JSON)?;
    for topic in &mut topics {
        if topic.is_daily && topic.daily_date.is_none() {
            topic.daily_date = Some(now);
        }
    }
    Ok(topics)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_parses_and_is_well_formed() {
        let now = Utc::now();
        let topics = seed_topics(now).expect("fixture should parse");
        assert_eq!(topics.len(), 7);

        let daily: Vec<_> = topics.iter().filter(|t| t.is_daily).collect();
        assert_eq!(daily.len(), 1);
        assert_eq!(daily[0].title, "החורים השחורים: תעלומות היקום");
        assert_eq!(daily[0].daily_date, Some(now));

        for topic in &topics {
            assert!(!topic.title.is_empty());
            assert!(!topic.content.is_empty());
            assert!(topic.reading_time >= 1);
        }
    }
}
