//! `GET /bootstrap` — seed empty collections and return everything the
//! admin console needs in one round trip.

use axum::{Json, extract::State};
use onbuddy_core::{seed::SeedData, store::OnbuddyStore};
use serde_json::json;

use crate::{ApiState, error::ApiError};

pub async fn fetch<S>(
  State(state): State<ApiState<S>>,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: OnbuddyStore,
{
  let seed = SeedData::builtin();
  state
    .store
    .seed_if_empty(&seed)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  let departments = state
    .store
    .list_departments()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  let profiles = state
    .store
    .list_profiles()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  let knowledge = state
    .store
    .list_knowledge()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  let users = state
    .store
    .list_users()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  Ok(Json(json!({
    "departments":   departments,
    "profiles":      profiles,
    "knowledgeBase": knowledge,
    "users":         users,
  })))
}
