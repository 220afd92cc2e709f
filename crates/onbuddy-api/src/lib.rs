//! JSON REST API for Onbuddy.
//!
//! Exposes an axum [`Router`] backed by any [`onbuddy_core::store::OnbuddyStore`].
//! Auth sessions, TLS, and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", onbuddy_api::api_router(state))
//! ```

pub mod bootstrap;
pub mod chat;
pub mod completion;
pub mod departments;
pub mod error;
pub mod knowledge;
pub mod profiles;
pub mod topics;
pub mod users;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post, put},
};
use onbuddy_core::store::OnbuddyStore;

pub use completion::{CompletionClient, CompletionConfig};
pub use error::ApiError;

/// Shared handler state: the storage backend plus the completion client.
pub struct ApiState<S> {
  pub store:     Arc<S>,
  pub assistant: Arc<CompletionClient>,
}

// Derived Clone would require S: Clone.
impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self {
      store:     Arc::clone(&self.store),
      assistant: Arc::clone(&self.assistant),
    }
  }
}

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: ApiState<S>) -> Router<()>
where
  S: OnbuddyStore + 'static,
{
  Router::new()
    // Bootstrap
    .route("/bootstrap", get(bootstrap::fetch::<S>))
    // Departments
    .route("/departments", post(departments::create::<S>))
    .route(
      "/departments/{id}",
      put(departments::update::<S>).delete(departments::remove::<S>),
    )
    // Profiles
    .route("/profiles", post(profiles::create::<S>))
    .route(
      "/profiles/{id}",
      put(profiles::update::<S>).delete(profiles::remove::<S>),
    )
    // Knowledge entries
    .route("/knowledge", post(knowledge::create::<S>))
    .route(
      "/knowledge/{id}",
      put(knowledge::update::<S>).delete(knowledge::remove::<S>),
    )
    // Users
    .route("/users", post(users::create::<S>))
    .route("/users/login", post(users::login::<S>))
    // Topics
    .route("/topics", get(topics::list::<S>).post(topics::create::<S>))
    .route(
      "/topics/{id}",
      put(topics::update::<S>).delete(topics::remove::<S>),
    )
    // Chat
    .route("/chat", post(chat::complete::<S>))
    .with_state(state)
}
