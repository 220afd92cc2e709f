//! The `OnbuddyStore` trait and supporting payload types.
//!
//! The trait is implemented by storage backends (e.g.
//! `onbuddy-store-sqlite`). The HTTP layer (`onbuddy-api`) depends on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use chrono::{DateTime, Utc};

use crate::{
  account::{Role, UserAccount},
  cascade::{DeletionPlan, Snapshot},
  org::{Department, KnowledgeEntry, Profile},
  seed::SeedData,
  topic::{ChatMessage, ChatTopic},
};

// ─── Payload types ───────────────────────────────────────────────────────────

/// Caller-supplied fields for creating or replacing a profile.
#[derive(Debug, Clone)]
pub struct NewProfile {
  pub department_id: String,
  pub name:          String,
  pub summary:       String,
}

/// Caller-supplied fields for creating or replacing a knowledge entry.
#[derive(Debug, Clone)]
pub struct NewKnowledgeEntry {
  pub profile_id: String,
  pub title:      String,
  pub details:    String,
}

/// Caller-supplied fields for a signup. The id is always store-assigned;
/// the email must already be trimmed and lowercased.
#[derive(Debug, Clone)]
pub struct NewUserAccount {
  pub role:          Role,
  pub name:          String,
  pub email:         String,
  pub password:      String,
  pub department_id: Option<String>,
  pub profile_id:    Option<String>,
}

/// Caller-supplied fields for a new topic. `created_at` defaults to now
/// when absent.
#[derive(Debug, Clone)]
pub struct NewTopic {
  pub user_id:    String,
  pub title:      String,
  pub created_at: Option<DateTime<Utc>>,
  pub messages:   Vec<ChatMessage>,
}

/// Partial topic update; only present fields are written.
#[derive(Debug, Clone, Default)]
pub struct TopicPatch {
  pub title:    Option<String>,
  pub messages: Option<Vec<ChatMessage>>,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over an Onbuddy persistence backend.
///
/// Updates and deletes of unknown ids succeed as no-ops (idempotent from
/// the caller's perspective). All methods return `Send` futures so the
/// trait can be used from multi-threaded async runtimes (tokio + axum).
pub trait OnbuddyStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Departments ───────────────────────────────────────────────────────

  /// Create and persist a department with a store-assigned id.
  fn add_department(
    &self,
    name: String,
  ) -> impl Future<Output = Result<Department, Self::Error>> + Send + '_;

  fn rename_department(
    &self,
    id: String,
    name: String,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn list_departments(
    &self,
  ) -> impl Future<Output = Result<Vec<Department>, Self::Error>> + Send + '_;

  // ── Profiles ──────────────────────────────────────────────────────────

  fn add_profile(
    &self,
    input: NewProfile,
  ) -> impl Future<Output = Result<Profile, Self::Error>> + Send + '_;

  /// Replace a profile's fields and re-point the `department_id` of every
  /// user account linked to it.
  fn update_profile(
    &self,
    id: String,
    input: NewProfile,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn list_profiles(
    &self,
  ) -> impl Future<Output = Result<Vec<Profile>, Self::Error>> + Send + '_;

  // ── Knowledge entries ─────────────────────────────────────────────────

  fn add_knowledge_entry(
    &self,
    input: NewKnowledgeEntry,
  ) -> impl Future<Output = Result<KnowledgeEntry, Self::Error>> + Send + '_;

  fn update_knowledge_entry(
    &self,
    id: String,
    input: NewKnowledgeEntry,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn list_knowledge(
    &self,
  ) -> impl Future<Output = Result<Vec<KnowledgeEntry>, Self::Error>> + Send + '_;

  // ── User accounts ─────────────────────────────────────────────────────

  /// Persist a new account. The uniqueness check against the current
  /// snapshot happens in the caller immediately before this call; the
  /// check-insert race is accepted.
  fn add_user(
    &self,
    input: NewUserAccount,
  ) -> impl Future<Output = Result<UserAccount, Self::Error>> + Send + '_;

  /// Case-insensitive email lookup.
  fn find_user_by_email(
    &self,
    email: String,
  ) -> impl Future<Output = Result<Option<UserAccount>, Self::Error>> + Send + '_;

  fn list_users(
    &self,
  ) -> impl Future<Output = Result<Vec<UserAccount>, Self::Error>> + Send + '_;

  // ── Topics ────────────────────────────────────────────────────────────

  /// One user's topics, newest first.
  fn topics_for_user(
    &self,
    user_id: String,
  ) -> impl Future<Output = Result<Vec<ChatTopic>, Self::Error>> + Send + '_;

  fn add_topic(
    &self,
    input: NewTopic,
  ) -> impl Future<Output = Result<ChatTopic, Self::Error>> + Send + '_;

  fn update_topic(
    &self,
    id: String,
    patch: TopicPatch,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn delete_topic(
    &self,
    id: String,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Cascade ───────────────────────────────────────────────────────────

  /// Read a point-in-time copy of the four referential collections for
  /// [`crate::cascade::plan_deletion`].
  fn snapshot(
    &self,
  ) -> impl Future<Output = Result<Snapshot, Self::Error>> + Send + '_;

  /// Apply a deletion plan as a single logical unit.
  fn apply_deletion_plan<'a>(
    &'a self,
    plan: &'a DeletionPlan,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  // ── Bootstrap ─────────────────────────────────────────────────────────

  /// Insert `seed` records into each empty collection.
  fn seed_if_empty<'a>(
    &'a self,
    seed: &'a SeedData,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}
