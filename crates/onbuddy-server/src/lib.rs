//! Server configuration for the Onbuddy binary.

use std::path::PathBuf;

use onbuddy_api::CompletionConfig;
use serde::Deserialize;

/// Deserialised from `config.toml` and `ONBUDDY_*` environment variables.
///
/// The OpenAI API key is deliberately absent here; it is read from the
/// `OPENAI_API_KEY` environment variable only, never from the config file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
  pub completion: CompletionConfig,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:       "127.0.0.1".to_string(),
      port:       8080,
      store_path: PathBuf::from("onbuddy.db"),
      completion: CompletionConfig::default(),
    }
  }
}
