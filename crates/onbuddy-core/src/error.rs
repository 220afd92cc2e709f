//! Error types for `onbuddy-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown account role: {0:?}")]
  UnknownRole(String),

  #[error("unknown message role: {0:?}")]
  UnknownMessageRole(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
