//! Built-in records loaded into an empty store by the bootstrap endpoint.

use crate::{
  account::{Role, UserAccount},
  org::{Department, KnowledgeEntry, Profile},
};

/// The seed records. Each collection is inserted only when its collection
/// is empty; the superadmin only when no account carries its email.
#[derive(Debug, Clone)]
pub struct SeedData {
  pub departments:       Vec<Department>,
  pub profiles:          Vec<Profile>,
  pub knowledge_entries: Vec<KnowledgeEntry>,
  pub superadmin:        UserAccount,
}

impl SeedData {
  pub fn builtin() -> Self {
    Self {
      departments: vec![
        Department { id: "dept-ops".into(), name: "Operations".into() },
        Department { id: "dept-it".into(), name: "IT".into() },
      ],
      profiles: vec![
        Profile {
          id:            "profile-ops-lead".into(),
          department_id: "dept-ops".into(),
          name:          "Operations Lead".into(),
          summary:       "Owns onboarding, playbooks, and daily coordination for new hires.".into(),
        },
        Profile {
          id:            "profile-it-analyst".into(),
          department_id: "dept-it".into(),
          name:          "IT Analyst".into(),
          summary:       "Maintains device inventory, access provisioning, and security reviews.".into(),
        },
      ],
      knowledge_entries: vec![
        KnowledgeEntry {
          id:         "kb-ops-1".into(),
          profile_id: "profile-ops-lead".into(),
          title:      "First week onboarding".into(),
          details:    "Welcome the teammate, share the playbook link, and schedule a day-3 retro to adjust their ramp plan.".into(),
        },
        KnowledgeEntry {
          id:         "kb-ops-2".into(),
          profile_id: "profile-ops-lead".into(),
          title:      "Escalation rules".into(),
          details:    "For blockers over 24h, page the department head and log the incident in the onboarding tracker.".into(),
        },
        KnowledgeEntry {
          id:         "kb-it-1".into(),
          profile_id: "profile-it-analyst".into(),
          title:      "Laptop provisioning".into(),
          details:    "Ship MacBook Air 16GB/512GB within 48h. Preload VPN, password manager, Slack, and MDM profiles.".into(),
        },
      ],
      superadmin: UserAccount {
        id:            "super-aman".into(),
        role:          Role::Superadmin,
        name:          "Aman Raja".into(),
        email:         "aman@raja.com".into(),
        password:      "123456".into(),
        department_id: None,
        profile_id:    None,
      },
    }
  }
}
