//! `POST /chat` — ground the conversation in the most relevant knowledge
//! entries, then forward it to the completion API.

use axum::{Json, extract::State};
use onbuddy_core::{
  org::KnowledgeEntry,
  relevance::{select_relevant, SelectionMode},
  store::OnbuddyStore,
  topic::{ChatMessage, MessageRole},
};
use serde::{Deserialize, Serialize};

use crate::{ApiState, error::ApiError};

/// How many knowledge entries are handed to the completion API per request.
const CONTEXT_LIMIT: usize = 6;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatBody {
  pub messages:       Option<Vec<ChatMessage>>,
  #[serde(default)]
  pub knowledge_base: Vec<KnowledgeEntry>,
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
  pub reply: String,
}

pub async fn complete<S>(
  State(state): State<ApiState<S>>,
  Json(body): Json<ChatBody>,
) -> Result<Json<ChatReply>, ApiError>
where
  S: OnbuddyStore,
{
  let messages = body
    .messages
    .ok_or_else(|| ApiError::Validation("Messages payload is required".into()))?;

  // The latest user turn is what the knowledge selection keys on.
  let question = messages
    .iter()
    .rev()
    .find(|m| m.role == MessageRole::User)
    .map(|m| m.content.as_str())
    .unwrap_or_default();

  let selected = select_relevant(
    question,
    &body.knowledge_base,
    CONTEXT_LIMIT,
    SelectionMode::Fallback,
  );

  let reply = state.assistant.complete(&selected, &messages).await?;
  Ok(Json(ChatReply { reply }))
}
