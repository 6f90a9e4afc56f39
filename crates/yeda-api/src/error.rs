use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;
use yeda_store::StoreError;

/// Errors a request handler can surface to the client.
///
/// The store reports "not found" as an absent result, so the not-found
/// variants originate here, in the HTTP layer. Anything coming out of the
/// store itself is a transport failure and maps to a 500 with a generic
/// body; the cause is logged, never echoed to the client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Topic not found")]
    TopicNotFound,
    #[error("No daily topic found")]
    NoDailyTopic,
    #[error("Invalid topic ID")]
    InvalidTopicId,
    #[error("Search query is required")]
    MissingSearchQuery,
    #[error("Invalid topic data")]
    InvalidTopicData(#[from] ValidationErrors),
    #[error("Invalid topic data: {0}")]
    MalformedBody(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::TopicNotFound | Self::NoDailyTopic => {
                (StatusCode::NOT_FOUND, json!({ "error": self.to_string() }))
            }
            Self::InvalidTopicId | Self::MissingSearchQuery => {
                (StatusCode::BAD_REQUEST, json!({ "error": self.to_string() }))
            }
            Self::InvalidTopicData(errors) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "Invalid topic data",
                    "details": validation_details(errors),
                }),
            ),
            Self::MalformedBody(detail) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "Invalid topic data",
                    "details": [detail],
                }),
            ),
            Self::Store(err) => {
                tracing::error!("storage operation failed: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Flatten field-level validation errors into "field: message" strings.
fn validation_details(errors: &ValidationErrors) -> Vec<String> {
    let mut details: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |error| match &error.message {
                Some(message) => format!("{field}: {message}"),
                None => format!("{field}: {}", error.code),
            })
        })
        .collect();
    details.sort();
    details
}

#[cfg(test)]
mod tests {
    use validator::Validate;
    use yeda_store::models::NewTopic;

    use super::*;

    #[test]
    fn validation_details_name_the_failing_fields() {
        let empty = NewTopic {
            title: String::new(),
            title_en: None,
            excerpt: "E".to_string(),
            content: "C".to_string(),
            category: "science".to_string(),
            category_he: "מדעים".to_string(),
            age_group: "8+".to_string(),
            reading_time: 0,
            icon: "🔬".to_string(),
            tags: None,
            is_daily: false,
            daily_date: None,
            is_popular: false,
        };

        let errors = empty.validate().expect_err("should fail validation");
        let details = validation_details(&errors);
        assert_eq!(details.len(), 2);
        assert!(details.iter().any(|d| d.starts_with("title:")));
        assert!(details.iter().any(|d| d.starts_with("reading_time:")));
    }
}
