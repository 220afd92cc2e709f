//! Handlers for `/profiles` endpoints.

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use onbuddy_core::{
  cascade::{plan_deletion, DeletionTarget},
  store::{NewProfile, OnbuddyStore},
};
use serde::Deserialize;
use serde_json::json;

use crate::{ApiState, error::ApiError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileBody {
  pub department_id: Option<String>,
  pub name:          Option<String>,
  #[serde(default)]
  pub summary:       String,
}

impl ProfileBody {
  /// Both the department link and the name are mandatory; the summary may
  /// be blank.
  fn validate(self) -> Result<NewProfile, ApiError> {
    let department_id = self.department_id.unwrap_or_default().trim().to_owned();
    let name = self.name.unwrap_or_default().trim().to_owned();
    if department_id.is_empty() || name.is_empty() {
      return Err(ApiError::Validation("Department and name are required".into()));
    }
    Ok(NewProfile {
      department_id,
      name,
      summary: self.summary.trim().to_owned(),
    })
  }
}

/// `POST /profiles`
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  Json(body): Json<ProfileBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: OnbuddyStore,
{
  let input = body.validate()?;
  let profile = state
    .store
    .add_profile(input)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(profile)))
}

/// `PUT /profiles/:id` — also re-points the department of any user account
/// linked to this profile.
pub async fn update<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<String>,
  Json(body): Json<ProfileBody>,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: OnbuddyStore,
{
  let input = body.validate()?;
  state
    .store
    .update_profile(id, input)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(json!({ "ok": true })))
}

/// `DELETE /profiles/:id` — removes the profile and its knowledge entries,
/// and detaches (but keeps) linked user accounts.
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

  let plan = plan_deletion(&DeletionTarget::Profile(id), &snapshot);
  state
    .store
    .apply_deletion_plan(&plan)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(json!({ "ok": true })))
}
