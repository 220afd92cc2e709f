//! Chat topics — persisted conversation threads, one per user per thread.
//!
//! Messages are not independently addressable; they live as an ordered
//! sequence inside their topic, and edits replace the whole sequence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Who authored a message within a topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
  User,
  Assistant,
}

impl MessageRole {
  pub fn as_str(self) -> &'static str {
    match self {
      MessageRole::User => "user",
      MessageRole::Assistant => "assistant",
    }
  }

  pub fn parse(s: &str) -> Result<Self> {
    match s {
      "user" => Ok(MessageRole::User),
      "assistant" => Ok(MessageRole::Assistant),
      other => Err(Error::UnknownMessageRole(other.to_owned())),
    }
  }
}

/// A single exchange turn embedded in a [`ChatTopic`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
  pub role:       MessageRole,
  pub content:    String,
  pub created_at: DateTime<Utc>,
}

/// A persisted conversation thread belonging to one user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatTopic {
  pub id:         String,
  pub user_id:    String,
  pub title:      String,
  pub created_at: DateTime<Utc>,
  pub messages:   Vec<ChatMessage>,
}
