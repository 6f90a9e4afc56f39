use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;
use validator::Validate;
use yeda_store::models::{AgeBucket, NewTopic};

use crate::{error::ApiError, state::ApiState};

/// Create the topic routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/api/topics", get(get_all_topics).post(create_topic))
        .route("/api/topics/daily", get(get_daily_topic))
        .route("/api/topics/popular", get(get_popular_topics))
        .route(
            "/api/topics/category/{category}",
            get(get_topics_by_category),
        )
        .route("/api/topics/age/{age_group}", get(get_topics_by_age_group))
        .route("/api/topics/{id}", get(get_topic_by_id))
        .route("/api/search", get(search_topics))
}

/// Get all topics, newest first
async fn get_all_topics(State(state): State<ApiState>) -> Result<impl IntoResponse, ApiError> {
    let topics = state.storage.get_all_topics().await?;
    Ok(Json(topics))
}

/// Get today's featured topic
async fn get_daily_topic(State(state): State<ApiState>) -> Result<impl IntoResponse, ApiError> {
    let topic = state
        .storage
        .get_daily_topic(None)
        .await?
        .ok_or(ApiError::NoDailyTopic)?;
    Ok(Json(topic))
}

/// Get topics flagged popular
async fn get_popular_topics(State(state): State<ApiState>) -> Result<impl IntoResponse, ApiError> {
    let topics = state.storage.get_popular_topics().await?;
    Ok(Json(topics))
}

/// Get topics in a category
async fn get_topics_by_category(
    State(state): State<ApiState>,
    Path(category): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let topics = state.storage.get_topics_by_category(&category).await?;
    Ok(Json(topics))
}

/// Get topics in an age bucket
async fn get_topics_by_age_group(
    State(state): State<ApiState>,
    Path(age_group): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let bucket = AgeBucket::parse(&age_group);
    let topics = state.storage.get_topics_by_age_group(&bucket).await?;
    Ok(Json(topics))
}

/// Get topic by ID
///
/// The id is parsed by hand so a non-numeric segment maps to this API's 400
/// body rather than the extractor's default rejection.
async fn get_topic_by_id(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id: i64 = id.parse().map_err(|_| ApiError::InvalidTopicId)?;
    let topic = state
        .storage
        .get_topic(id)
        .await?
        .ok_or(ApiError::TopicNotFound)?;
    Ok(Json(topic))
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    q: Option<String>,
}

/// Free-text search over topics
async fn search_topics(
    State(state): State<ApiState>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, ApiError> {
    let query = params
        .q
        .filter(|q| !q.is_empty())
        .ok_or(ApiError::MissingSearchQuery)?;
    let topics = state.storage.search_topics(&query).await?;
    Ok(Json(topics))
}

/// Create a new topic (for admin use)
async fn create_topic(
    State(state): State<ApiState>,
    payload: Result<Json<NewTopic>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(new_topic) =
        payload.map_err(|rejection| ApiError::MalformedBody(rejection.body_text()))?;
    new_topic.validate()?;

    let topic = state.storage.create_topic(new_topic).await?;
    Ok((StatusCode::CREATED, Json(topic)))
}
