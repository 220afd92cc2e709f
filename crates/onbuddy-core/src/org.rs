//! Organisational records: departments, role profiles, and the knowledge
//! entries curated for each profile.
//!
//! Ids are opaque `<prefix>-<base36>` strings (see [`crate::id`]); the
//! referential links (`department_id`, `profile_id`) are maintained by the
//! cascade planner, not by database constraints.

use serde::{Deserialize, Serialize};

/// Top-level organisational unit. Root of the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
  pub id:   String,
  pub name: String,
}

/// A role template within a department, holding curated knowledge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
  pub id:            String,
  pub department_id: String,
  pub name:          String,
  pub summary:       String,
}

/// A titled fact or procedure attached to one profile; selected entries
/// ground the assistant's chat replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeEntry {
  pub id:         String,
  pub profile_id: String,
  pub title:      String,
  pub details:    String,
}
