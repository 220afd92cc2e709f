//! Handlers for `/knowledge` endpoints.

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use onbuddy_core::{
  cascade::{plan_deletion, DeletionTarget},
  store::{NewKnowledgeEntry, OnbuddyStore},
};
use serde::Deserialize;
use serde_json::json;

use crate::{ApiState, error::ApiError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeBody {
  pub profile_id: Option<String>,
  pub title:      Option<String>,
  #[serde(default)]
  pub details:    String,
}

impl KnowledgeBody {
  fn validate(self) -> Result<NewKnowledgeEntry, ApiError> {
    let profile_id = self.profile_id.unwrap_or_default().trim().to_owned();
    let title = self.title.unwrap_or_default().trim().to_owned();
    if profile_id.is_empty() || title.is_empty() {
      return Err(ApiError::Validation("Profile and title are required".into()));
    }
    Ok(NewKnowledgeEntry {
      profile_id,
      title,
      details: self.details.trim().to_owned(),
    })
  }
}

/// `POST /knowledge`
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  Json(body): Json<KnowledgeBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: OnbuddyStore,
{
  let input = body.validate()?;
  let entry = state
    .store
    .add_knowledge_entry(input)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(entry)))
}

/// `PUT /knowledge/:id`
pub async fn update<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<String>,
  Json(body): Json<KnowledgeBody>,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: OnbuddyStore,
{
  let input = body.validate()?;
  state
    .store
    .update_knowledge_entry(id, input)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(json!({ "ok": true })))
}

/// `DELETE /knowledge/:id` — knowledge entries have no dependents, but the
/// delete still flows through the shared deletion planner.
pub async fn remove<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: OnbuddyStore,
{
  let snapshot = state
    .store
    .snapshot()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  let plan = plan_deletion(&DeletionTarget::KnowledgeEntry(id), &snapshot);
  state
    .store
    .apply_deletion_plan(&plan)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(json!({ "ok": true })))
}
