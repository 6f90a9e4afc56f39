use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::common::seeded_client;

#[tokio::test]
async fn test_create_topic_assigns_id_and_normalizes_optionals() {
    let client = seeded_client();

    let body = json!({
        "title": "T",
        "excerpt": "E",
        "content": "C",
        "category": "history",
        "categoryHe": "היסטוריה",
        "ageGroup": "8+",
        "readingTime": 5,
        "icon": "📜"
    });

    let response = client.post_json("/api/topics", &body).await;
    response.assert_status(StatusCode::CREATED);

    let topic: Value = response.json();
    // Seven seed topics, so the first created one gets id 8.
    assert_eq!(topic["id"], 8);
    assert_eq!(topic["title"], "T");
    assert!(topic["createdAt"].is_string());

    // Absent optionals come back as explicit null/false, not missing keys.
    assert_eq!(topic["titleEn"], Value::Null);
    assert_eq!(topic["tags"], Value::Null);
    assert_eq!(topic["dailyDate"], Value::Null);
    assert_eq!(topic["isDaily"], Value::Bool(false));
    assert_eq!(topic["isPopular"], Value::Bool(false));

    // The created topic is fetchable and is the newest in the listing.
    let fetched = client.get("/api/topics/8").await;
    fetched.assert_status(StatusCode::OK);
    let fetched: Value = fetched.json();
    assert_eq!(fetched["title"], "T");

    let all: Vec<Value> = client.get("/api/topics").await.json();
    assert_eq!(all.len(), 8);
    assert_eq!(all[0]["id"], 8);
}

#[tokio::test]
async fn test_create_topic_ids_are_monotonic() {
    let client = seeded_client();

    let body = json!({
        "title": "ראשון",
        "excerpt": "E",
        "content": "C",
        "category": "science",
        "categoryHe": "מדעים",
        "ageGroup": "10+",
        "readingTime": 3,
        "icon": "🔬"
    });

    let first: Value = client.post_json("/api/topics", &body).await.json();
    let second: Value = client.post_json("/api/topics", &body).await.json();
    assert!(second["id"].as_i64().unwrap() > first["id"].as_i64().unwrap());
}

#[tokio::test]
async fn test_create_topic_with_tags_and_daily_date() {
    let client = seeded_client();

    let tomorrow = chrono::Utc::now() + chrono::Duration::days(1);
    let body = json!({
        "title": "נושא יומי חדש",
        "titleEn": "A New Daily Topic",
        "excerpt": "E",
        "content": "C",
        "category": "science",
        "categoryHe": "מדעים",
        "ageGroup": "8+",
        "readingTime": 4,
        "icon": "🌟",
        "tags": ["חלל", "מדע"],
        "isDaily": true,
        "dailyDate": tomorrow.to_rfc3339(),
        "isPopular": true
    });

    let response = client.post_json("/api/topics", &body).await;
    response.assert_status(StatusCode::CREATED);

    let topic: Value = response.json();
    assert_eq!(topic["tags"], json!(["חלל", "מדע"]));
    assert_eq!(topic["isDaily"], true);
    assert_eq!(topic["isPopular"], true);

    // Popular listing picks it up immediately.
    let popular: Vec<Value> = client.get("/api/topics/popular").await.json();
    assert!(popular.iter().any(|t| t["title"] == "נושא יומי חדש"));
}

#[tokio::test]
async fn test_create_topic_validation_failure_lists_details() {
    let client = seeded_client();

    let body = json!({
        "title": "",
        "excerpt": "E",
        "content": "C",
        "category": "history",
        "categoryHe": "היסטוריה",
        "ageGroup": "8+",
        "readingTime": 0,
        "icon": "📜"
    });

    let response = client.post_json("/api/topics", &body).await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let json: Value = response.json();
    assert_eq!(json["error"], "Invalid topic data");
    let details = json["details"].as_array().expect("details should be a list");
    assert_eq!(details.len(), 2);
}

#[tokio::test]
async fn test_create_topic_with_missing_fields_is_rejected() {
    let client = seeded_client();

    let response = client
        .post_json("/api/topics", &json!({ "title": "חסר הכל" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let json: Value = response.json();
    assert_eq!(json["error"], "Invalid topic data");
    assert!(json["details"].is_array());
}
