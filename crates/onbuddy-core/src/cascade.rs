//! Referential-integrity cascade planning.
//!
//! Deleting a department, profile, or knowledge entry must leave no
//! orphaned dependents. [`plan_deletion`] is a pure computation over a
//! point-in-time [`Snapshot`] of the four collections; the caller applies
//! the resulting [`DeletionPlan`] as a single logical unit.
//!
//! Department deletion is destructive to dependents (a profile cannot
//! exist without its department); profile deletion only detaches linked
//! user accounts, which persist role-lessly pending reassignment. The
//! asymmetry is deliberate policy.

use std::collections::BTreeSet;

use crate::{
  account::UserAccount,
  org::{Department, KnowledgeEntry, Profile},
};

/// Point-in-time copy of the referential collections.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
  pub departments:       Vec<Department>,
  pub profiles:          Vec<Profile>,
  pub knowledge_entries: Vec<KnowledgeEntry>,
  pub user_accounts:     Vec<UserAccount>,
}

/// The record whose deletion is being planned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionTarget {
  Department(String),
  Profile(String),
  KnowledgeEntry(String),
}

/// Exact id sets to remove or mutate. `users` are deleted outright;
/// `detached_users` are kept with their `profile_id` cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletionPlan {
  pub departments:       BTreeSet<String>,
  pub profiles:          BTreeSet<String>,
  pub knowledge_entries: BTreeSet<String>,
  pub users:             BTreeSet<String>,
  pub detached_users:    BTreeSet<String>,
}

/// Compute the full dependent set for deleting `target`.
///
/// Deleting an id absent from the snapshot yields a plan that names just
/// that id; applying it is a no-op (idempotent delete).
pub fn plan_deletion(target: &DeletionTarget, snapshot: &Snapshot) -> DeletionPlan {
  let mut plan = DeletionPlan::default();

  match target {
    DeletionTarget::Department(id) => {
      plan.departments.insert(id.clone());

      for profile in &snapshot.profiles {
        if profile.department_id == *id {
          plan.profiles.insert(profile.id.clone());
        }
      }

      for entry in &snapshot.knowledge_entries {
        if plan.profiles.contains(&entry.profile_id) {
          plan.knowledge_entries.insert(entry.id.clone());
        }
      }

      for account in &snapshot.user_accounts {
        let in_department = account.department_id.as_deref() == Some(id.as_str());
        let in_removed_profile = account
          .profile_id
          .as_ref()
          .is_some_and(|p| plan.profiles.contains(p));
        if in_department || in_removed_profile {
          plan.users.insert(account.id.clone());
        }
      }
    }

    DeletionTarget::Profile(id) => {
      plan.profiles.insert(id.clone());

      for entry in &snapshot.knowledge_entries {
        if entry.profile_id == *id {
          plan.knowledge_entries.insert(entry.id.clone());
        }
      }

      for account in &snapshot.user_accounts {
        if account.profile_id.as_deref() == Some(id.as_str()) {
          plan.detached_users.insert(account.id.clone());
        }
      }
    }

    DeletionTarget::KnowledgeEntry(id) => {
      plan.knowledge_entries.insert(id.clone());
    }
  }

  plan
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::account::Role;

  fn snapshot() -> Snapshot {
    Snapshot {
      departments: vec![
        Department { id: "dept-ops".into(), name: "Operations".into() },
        Department { id: "dept-it".into(), name: "IT".into() },
      ],
      profiles: vec![
        Profile {
          id:            "profile-ops-lead".into(),
          department_id: "dept-ops".into(),
          name:          "Operations Lead".into(),
          summary:       String::new(),
        },
        Profile {
          id:            "profile-it-analyst".into(),
          department_id: "dept-it".into(),
          name:          "IT Analyst".into(),
          summary:       String::new(),
        },
      ],
      knowledge_entries: vec![
        KnowledgeEntry {
          id:         "kb-ops-1".into(),
          profile_id: "profile-ops-lead".into(),
          title:      "First week onboarding".into(),
          details:    String::new(),
        },
        KnowledgeEntry {
          id:         "kb-it-1".into(),
          profile_id: "profile-it-analyst".into(),
          title:      "Laptop provisioning".into(),
          details:    String::new(),
        },
      ],
      user_accounts: vec![
        UserAccount {
          id:            "user-analyst".into(),
          role:          Role::User,
          name:          "Analyst".into(),
          email:         "analyst@example.com".into(),
          password:      "pw".into(),
          department_id: Some("dept-it".into()),
          profile_id:    Some("profile-it-analyst".into()),
        },
        UserAccount {
          id:            "user-lead".into(),
          role:          Role::User,
          name:          "Lead".into(),
          email:         "lead@example.com".into(),
          password:      "pw".into(),
          department_id: Some("dept-ops".into()),
          profile_id:    Some("profile-ops-lead".into()),
        },
        UserAccount {
          id:            "user-admin".into(),
          role:          Role::Superadmin,
          name:          "Admin".into(),
          email:         "admin@example.com".into(),
          password:      "pw".into(),
          department_id: None,
          profile_id:    None,
        },
      ],
    }
  }

  #[test]
  fn department_deletion_takes_profiles_knowledge_and_accounts() {
    let plan = plan_deletion(&DeletionTarget::Department("dept-it".into()), &snapshot());

    assert_eq!(plan.departments, BTreeSet::from(["dept-it".to_owned()]));
    assert_eq!(plan.profiles, BTreeSet::from(["profile-it-analyst".to_owned()]));
    assert_eq!(plan.knowledge_entries, BTreeSet::from(["kb-it-1".to_owned()]));
    assert_eq!(plan.users, BTreeSet::from(["user-analyst".to_owned()]));
    assert!(plan.detached_users.is_empty());
  }

  #[test]
  fn department_deletion_leaves_other_records_alone() {
    let plan = plan_deletion(&DeletionTarget::Department("dept-it".into()), &snapshot());

    assert!(!plan.profiles.contains("profile-ops-lead"));
    assert!(!plan.knowledge_entries.contains("kb-ops-1"));
    assert!(!plan.users.contains("user-lead"));
    assert!(!plan.users.contains("user-admin"));
  }

  #[test]
  fn department_deletion_takes_accounts_linked_by_department_alone() {
    let mut snap = snapshot();
    snap.user_accounts.push(UserAccount {
      id:            "user-unassigned".into(),
      role:          Role::User,
      name:          "Unassigned".into(),
      email:         "unassigned@example.com".into(),
      password:      "pw".into(),
      department_id: Some("dept-it".into()),
      profile_id:    None,
    });

    let plan = plan_deletion(&DeletionTarget::Department("dept-it".into()), &snap);
    assert!(plan.users.contains("user-unassigned"));
  }

  #[test]
  fn profile_deletion_detaches_accounts_instead_of_deleting() {
    let plan = plan_deletion(&DeletionTarget::Profile("profile-it-analyst".into()), &snapshot());

    assert!(plan.departments.is_empty());
    assert_eq!(plan.profiles, BTreeSet::from(["profile-it-analyst".to_owned()]));
    assert_eq!(plan.knowledge_entries, BTreeSet::from(["kb-it-1".to_owned()]));
    assert!(plan.users.is_empty());
    assert_eq!(plan.detached_users, BTreeSet::from(["user-analyst".to_owned()]));
  }

  #[test]
  fn knowledge_deletion_has_no_cascade() {
    let plan = plan_deletion(&DeletionTarget::KnowledgeEntry("kb-it-1".into()), &snapshot());

    assert_eq!(plan.knowledge_entries, BTreeSet::from(["kb-it-1".to_owned()]));
    assert!(plan.departments.is_empty());
    assert!(plan.profiles.is_empty());
    assert!(plan.users.is_empty());
    assert!(plan.detached_users.is_empty());
  }

  #[test]
  fn unknown_department_plans_only_itself() {
    let plan = plan_deletion(&DeletionTarget::Department("dept-gone".into()), &snapshot());

    assert_eq!(plan.departments, BTreeSet::from(["dept-gone".to_owned()]));
    assert!(plan.profiles.is_empty());
    assert!(plan.knowledge_entries.is_empty());
    assert!(plan.users.is_empty());
  }
}
