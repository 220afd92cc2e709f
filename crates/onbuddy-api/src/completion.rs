//! Outbound client for the OpenAI-compatible chat-completion API.
//!
//! The API key is sourced from the environment by the server binary and is
//! optional at construction: a missing key fails each `/chat` request, not
//! startup, so the CRUD surface stays usable without one.

use std::time::Duration;

use onbuddy_core::{
  org::KnowledgeEntry,
  topic::{ChatMessage, MessageRole},
};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Returned when the upstream completion has no content.
pub const NO_REPLY_FALLBACK: &str =
  "I couldn't generate a response right now. Please try again.";

// ─── Error ───────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CompletionError {
  #[error("Missing OpenAI API key. Set the OPENAI_API_KEY environment variable.")]
  MissingApiKey,

  #[error("OpenAI API request failed. Verify the OPENAI_API_KEY key.")]
  Upstream,

  #[error("Unable to reach the OpenAI API. Please try again later.")]
  Transport(#[source] reqwest::Error),

  #[error("failed to build HTTP client: {0}")]
  Build(#[source] reqwest::Error),
}

// ─── Configuration ───────────────────────────────────────────────────────────

/// Connection settings for the completion API.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
  pub api_base_url:    String,
  pub model:           String,
  pub temperature:     f32,
  pub timeout_seconds: u64,
}

impl Default for CompletionConfig {
  fn default() -> Self {
    Self {
      api_base_url:    "https://api.openai.com/v1".to_string(),
      model:           "gpt-4o-mini".to_string(),
      temperature:     0.35,
      timeout_seconds: 30,
    }
  }
}

// ─── Wire types ──────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct WireMessage<'a> {
  role:    &'static str,
  content: &'a str,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
  model:       &'a str,
  temperature: f32,
  messages:    Vec<WireMessage<'a>>,
}

#[derive(Deserialize)]
struct CompletionResponse {
  choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
  message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
  content: Option<String>,
}

// ─── Client ──────────────────────────────────────────────────────────────────

/// Async HTTP client for the chat-completion endpoint.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct CompletionClient {
  client:  Client,
  config:  CompletionConfig,
  api_key: Option<String>,
}

impl CompletionClient {
  pub fn new(config: CompletionConfig, api_key: Option<String>) -> Result<Self, CompletionError> {
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_seconds))
      .build()
      .map_err(CompletionError::Build)?;
    Ok(Self { client, config, api_key })
  }

  /// Build the grounding prompt from the selected knowledge entries.
  pub fn system_prompt(knowledge: &[KnowledgeEntry]) -> String {
    let listing = knowledge
      .iter()
      .map(|entry| format!("- {}: {}", entry.title, entry.details))
      .collect::<Vec<_>>()
      .join("\n");

    [
      "You are Onbuddy, a helpful onboarding assistant.",
      "Use the provided knowledge entries to answer the user. If the answer is unclear, say you don't have enough info.",
      "Cite the title of the knowledge entry you used when relevant.",
      "Knowledge base:",
      if listing.is_empty() { "(No knowledge provided)" } else { listing.as_str() },
    ]
    .join("\n")
  }

  /// `POST {api_base_url}/chat/completions`
  ///
  /// The selected `knowledge` becomes the system prompt; `messages` are
  /// forwarded in order, with any non-assistant role sent as `"user"`.
  pub async fn complete(
    &self,
    knowledge: &[KnowledgeEntry],
    messages:  &[ChatMessage],
  ) -> Result<String, CompletionError> {
    let api_key = self.api_key.as_deref().ok_or(CompletionError::MissingApiKey)?;

    let system = Self::system_prompt(knowledge);
    let mut wire = vec![WireMessage { role: "system", content: &system }];
    for message in messages {
      let role = match message.role {
        MessageRole::Assistant => "assistant",
        MessageRole::User => "user",
      };
      wire.push(WireMessage { role, content: &message.content });
    }

    let url = format!(
      "{}/chat/completions",
      self.config.api_base_url.trim_end_matches('/')
    );
    let response = self
      .client
      .post(&url)
      .bearer_auth(api_key)
      .json(&CompletionRequest {
        model:       &self.config.model,
        temperature: self.config.temperature,
        messages:    wire,
      })
      .send()
      .await
      .map_err(CompletionError::Transport)?;

    if !response.status().is_success() {
      let status = response.status();
      let detail = response.text().await.unwrap_or_default();
      tracing::error!(%status, %detail, "completion API rejected the request");
      return Err(CompletionError::Upstream);
    }

    let completion: CompletionResponse =
      response.json().await.map_err(CompletionError::Transport)?;

    Ok(
      completion
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .unwrap_or_else(|| NO_REPLY_FALLBACK.to_string()),
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn entry(title: &str, details: &str) -> KnowledgeEntry {
    KnowledgeEntry {
      id:         "kb-x".into(),
      profile_id: "profile-x".into(),
      title:      title.into(),
      details:    details.into(),
    }
  }

  #[test]
  fn system_prompt_lists_entries() {
    let prompt = CompletionClient::system_prompt(&[
      entry("Laptop provisioning", "Ship within 48h."),
      entry("Escalation rules", "Page the department head."),
    ]);
    assert!(prompt.starts_with("You are Onbuddy"));
    assert!(prompt.contains("- Laptop provisioning: Ship within 48h."));
    assert!(prompt.contains("- Escalation rules: Page the department head."));
  }

  #[test]
  fn system_prompt_notes_missing_knowledge() {
    let prompt = CompletionClient::system_prompt(&[]);
    assert!(prompt.ends_with("(No knowledge provided)"));
  }

  #[tokio::test]
  async fn complete_without_key_fails_before_any_request() {
    let client = CompletionClient::new(CompletionConfig::default(), None).unwrap();
    let err = client.complete(&[], &[]).await.unwrap_err();
    assert!(matches!(err, CompletionError::MissingApiKey));
  }
}
