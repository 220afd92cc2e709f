//! Handlers for `/departments` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `POST`   | `/departments` | Body: `{"name":"IT"}`; 400 if blank |
//! | `PUT`    | `/departments/:id` | Rename; 400 if blank |
//! | `DELETE` | `/departments/:id` | Cascades to profiles, knowledge, users |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use onbuddy_core::{
  cascade::{plan_deletion, DeletionTarget},
  store::OnbuddyStore,
};
use serde::Deserialize;
use serde_json::json;

use crate::{ApiState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct DepartmentBody {
  pub name: Option<String>,
}

/// `POST /departments` — body: `{"name":"IT"}`
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  Json(body): Json<DepartmentBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: OnbuddyStore,
{
  let name = body.name.as_deref().unwrap_or("").trim().to_owned();
  if name.is_empty() {
    return Err(ApiError::Validation("Name is required".into()));
  }

  let department = state
    .store
    .add_department(name)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(department)))
}

/// `PUT /departments/:id`
pub async fn update<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<String>,
  Json(body): Json<DepartmentBody>,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: OnbuddyStore,
{
  let name = body.name.as_deref().unwrap_or("").trim().to_owned();
  if name.is_empty() {
    return Err(ApiError::Validation("Name is required".into()));
  }

  state
    .store
    .rename_department(id, name)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(json!({ "ok": true })))
}

/// `DELETE /departments/:id` — removes the department and every dependent
/// profile, knowledge entry, and linked user account.
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

  let plan = plan_deletion(&DeletionTarget::Department(id), &snapshot);
  state
    .store
    .apply_deletion_plan(&plan)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(json!({ "ok": true })))
}
