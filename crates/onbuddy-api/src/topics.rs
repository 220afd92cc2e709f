//! Handlers for `/topics` endpoints.
//!
//! A topic is one chat thread owned by a user; the full message history is
//! written back by the client after each exchange.

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::{DateTime, Utc};
use onbuddy_core::{
  store::{NewTopic, OnbuddyStore, TopicPatch},
  topic::ChatMessage,
};
use serde::Deserialize;
use serde_json::json;

use crate::{ApiState, error::ApiError};

const DEFAULT_TITLE: &str = "New topic";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicQuery {
  pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTopicBody {
  pub user_id:    Option<String>,
  pub title:      Option<String>,
  pub created_at: Option<DateTime<Utc>>,
  #[serde(default)]
  pub messages:   Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
pub struct TopicPatchBody {
  pub title:    Option<String>,
  pub messages: Option<Vec<ChatMessage>>,
}

/// `GET /topics?userId=…` — list one user's topics, newest first.
pub async fn list<S>(
  State(state): State<ApiState<S>>,
  Query(query): Query<TopicQuery>,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: OnbuddyStore,
{
  let user_id = query.user_id.unwrap_or_default();
  if user_id.is_empty() {
    return Err(ApiError::Validation("userId is required".into()));
  }

  let topics = state
    .store
    .topics_for_user(user_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(json!({ "topics": topics })))
}

/// `POST /topics` — a blank or missing title falls back to "New topic".
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  Json(body): Json<NewTopicBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: OnbuddyStore,
{
  let user_id = body.user_id.unwrap_or_default();
  if user_id.is_empty() {
    return Err(ApiError::Validation("userId is required".into()));
  }

  let title = match body.title.as_deref().map(str::trim) {
    Some(t) if !t.is_empty() => t.to_owned(),
    _ => DEFAULT_TITLE.to_owned(),
  };

  let topic = state
    .store
    .add_topic(NewTopic {
      user_id,
      title,
      created_at: body.created_at,
      messages: body.messages,
    })
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(topic)))
}

/// `PUT /topics/:id` — partial update; absent fields are left alone.
pub async fn update<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<String>,
  Json(body): Json<TopicPatchBody>,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: OnbuddyStore,
{
  state
    .store
    .update_topic(id, TopicPatch { title: body.title, messages: body.messages })
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(json!({ "ok": true })))
}

/// `DELETE /topics/:id`
pub async fn remove<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: OnbuddyStore,
{
  state
    .store
    .delete_topic(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(json!({ "ok": true })))
}
