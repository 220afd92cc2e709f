//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. A topic's message
//! sequence is stored as one compact JSON array column.

use chrono::{DateTime, Utc};
use onbuddy_core::{
  account::{Role, UserAccount},
  topic::{ChatMessage, ChatTopic},
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Role ────────────────────────────────────────────────────────────────────

pub fn encode_role(role: Role) -> &'static str { role.as_str() }

pub fn decode_role(s: &str) -> Result<Role> { Ok(Role::parse(s)?) }

// ─── Messages ────────────────────────────────────────────────────────────────

pub fn encode_messages(messages: &[ChatMessage]) -> Result<String> {
  Ok(serde_json::to_string(messages)?)
}

pub fn decode_messages(s: &str) -> Result<Vec<ChatMessage>> {
  Ok(serde_json::from_str(s)?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `users` row.
pub struct RawUser {
  pub id:            String,
  pub role:          String,
  pub name:          String,
  pub email:         String,
  pub password:      String,
  pub department_id: Option<String>,
  pub profile_id:    Option<String>,
}

impl RawUser {
  pub fn into_account(self) -> Result<UserAccount> {
    Ok(UserAccount {
      id:            self.id,
      role:          decode_role(&self.role)?,
      name:          self.name,
      email:         self.email,
      password:      self.password,
      department_id: self.department_id,
      profile_id:    self.profile_id,
    })
  }
}

/// Raw strings read directly from a `topics` row.
pub struct RawTopic {
  pub id:            String,
  pub user_id:       String,
  pub title:         String,
  pub created_at:    String,
  pub messages_json: String,
}

impl RawTopic {
  pub fn into_topic(self) -> Result<ChatTopic> {
    Ok(ChatTopic {
      id:         self.id,
      user_id:    self.user_id,
      title:      self.title,
      created_at: decode_dt(&self.created_at)?,
      messages:   decode_messages(&self.messages_json)?,
    })
  }
}
