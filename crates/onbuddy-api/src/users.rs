//! Handlers for `/users` endpoints: account creation and login.

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use onbuddy_core::{
  account::{Role, UserAccount},
  store::{NewUserAccount, OnbuddyStore},
};
use serde::Deserialize;

use crate::{ApiState, error::ApiError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupBody {
  pub role:          Option<String>,
  #[serde(default)]
  pub name:          String,
  pub email:         Option<String>,
  pub password:      Option<String>,
  pub department_id: Option<String>,
  pub profile_id:    Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginBody {
  pub email:    Option<String>,
  pub password: Option<String>,
  pub role:     Option<String>,
}

/// Emails are compared and stored trimmed and lowercased.
fn normalize_email(email: &str) -> String {
  email.trim().to_lowercase()
}

/// `POST /users` — create an account. New accounts default to the `user`
/// role and the display name "New User" unless the body says otherwise.
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  Json(body): Json<SignupBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: OnbuddyStore,
{
  let email = normalize_email(body.email.as_deref().unwrap_or(""));
  let password = body.password.unwrap_or_default();
  if email.is_empty() || password.is_empty() {
    return Err(ApiError::Validation("Email and password are required".into()));
  }

  let role = match body.role.as_deref() {
    None | Some("") => Role::User,
    Some(raw) => Role::parse(raw).map_err(|e| ApiError::Validation(e.to_string()))?,
  };

  let existing = state
    .store
    .find_user_by_email(email.clone())
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  if existing.is_some() {
    return Err(ApiError::Conflict("A user with this email already exists".into()));
  }

  let name = match body.name.trim() {
    "" => "New User".to_owned(),
    trimmed => trimmed.to_owned(),
  };

  let account = state
    .store
    .add_user(NewUserAccount {
      role,
      name,
      email,
      password,
      department_id: body.department_id.filter(|id| !id.is_empty()),
      profile_id: body.profile_id.filter(|id| !id.is_empty()),
    })
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(account)))
}

/// `POST /users/login`
///
/// The body names the role it is signing in as; credentials that exist but
/// belong to the other role are rejected just like a wrong password.
pub async fn login<S>(
  State(state): State<ApiState<S>>,
  Json(body): Json<LoginBody>,
) -> Result<Json<UserAccount>, ApiError>
where
  S: OnbuddyStore,
{
  let email = normalize_email(body.email.as_deref().unwrap_or(""));
  let password = body.password.unwrap_or_default();
  if email.is_empty() || password.is_empty() {
    return Err(ApiError::Validation("Email and password are required".into()));
  }
  let role = match body.role.as_deref() {
    None | Some("") => return Err(ApiError::Validation("Role is required".into())),
    Some(raw) => Role::parse(raw).map_err(|e| ApiError::Validation(e.to_string()))?,
  };

  let account = state
    .store
    .find_user_by_email(email)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  // Passwords are compared exactly, untrimmed.
  match account {
    Some(account) if account.password == password && account.role == role => {
      Ok(Json(account))
    }
    _ => Err(ApiError::InvalidCredentials),
  }
}
