//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::Utc;
use onbuddy_core::{
  account::Role,
  cascade::{plan_deletion, DeletionTarget},
  seed::SeedData,
  store::{NewKnowledgeEntry, NewProfile, NewTopic, NewUserAccount, OnbuddyStore, TopicPatch},
  topic::{ChatMessage, MessageRole},
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn user(email: &str, department_id: Option<&str>, profile_id: Option<&str>) -> NewUserAccount {
  NewUserAccount {
    role:          Role::User,
    name:          "Teammate".into(),
    email:         email.to_owned(),
    password:      "secret".into(),
    department_id: department_id.map(str::to_owned),
    profile_id:    profile_id.map(str::to_owned),
  }
}

// ─── Departments ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_list_departments() {
  let s = store().await;

  let department = s.add_department("Operations".into()).await.unwrap();
  assert!(department.id.starts_with("dept-"));

  let all = s.list_departments().await.unwrap();
  assert_eq!(all.len(), 1);
  assert_eq!(all[0].name, "Operations");
}

#[tokio::test]
async fn rename_department_updates_name() {
  let s = store().await;
  let department = s.add_department("Ops".into()).await.unwrap();

  s.rename_department(department.id.clone(), "Operations".into())
    .await
    .unwrap();

  let all = s.list_departments().await.unwrap();
  assert_eq!(all[0].name, "Operations");
}

#[tokio::test]
async fn rename_unknown_department_is_a_noop() {
  let s = store().await;
  s.rename_department("dept-gone".into(), "Ghost".into())
    .await
    .unwrap();
  assert!(s.list_departments().await.unwrap().is_empty());
}

// ─── Profiles ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_profile_repoints_linked_users() {
  let s = store().await;
  let old_dept = s.add_department("IT".into()).await.unwrap();
  let new_dept = s.add_department("Security".into()).await.unwrap();
  let profile = s
    .add_profile(NewProfile {
      department_id: old_dept.id.clone(),
      name:          "Analyst".into(),
      summary:       String::new(),
    })
    .await
    .unwrap();
  s.add_user(user("analyst@example.com", Some(&old_dept.id), Some(&profile.id)))
    .await
    .unwrap();

  s.update_profile(
    profile.id.clone(),
    NewProfile {
      department_id: new_dept.id.clone(),
      name:          "Security Analyst".into(),
      summary:       "Reviews access.".into(),
    },
  )
  .await
  .unwrap();

  let profiles = s.list_profiles().await.unwrap();
  assert_eq!(profiles[0].department_id, new_dept.id);
  assert_eq!(profiles[0].name, "Security Analyst");

  let users = s.list_users().await.unwrap();
  assert_eq!(users[0].department_id.as_deref(), Some(new_dept.id.as_str()));
  assert_eq!(users[0].profile_id.as_deref(), Some(profile.id.as_str()));
}

// ─── Users ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn find_user_by_email_is_case_insensitive() {
  let s = store().await;
  s.add_user(user("alice@example.com", None, None)).await.unwrap();

  let found = s.find_user_by_email("Alice@Example.COM".into()).await.unwrap();
  assert!(found.is_some());
  assert_eq!(found.unwrap().email, "alice@example.com");

  let missing = s.find_user_by_email("bob@example.com".into()).await.unwrap();
  assert!(missing.is_none());
}

// ─── Topics ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_topic_and_list_by_user() {
  let s = store().await;
  let account = s.add_user(user("alice@example.com", None, None)).await.unwrap();

  let topic = s
    .add_topic(NewTopic {
      user_id:    account.id.clone(),
      title:      "New topic".into(),
      created_at: None,
      messages:   vec![],
    })
    .await
    .unwrap();
  assert!(topic.id.starts_with("topic-"));

  let topics = s.topics_for_user(account.id.clone()).await.unwrap();
  assert_eq!(topics.len(), 1);
  assert_eq!(topics[0].title, "New topic");
  assert!(topics[0].messages.is_empty());

  let none = s.topics_for_user("user-other".into()).await.unwrap();
  assert!(none.is_empty());
}

#[tokio::test]
async fn topics_are_listed_newest_first() {
  let s = store().await;
  for (title, ts) in [
    ("Oldest", "2026-01-01T09:00:00Z"),
    ("Newest", "2026-03-01T09:00:00Z"),
    ("Middle", "2026-02-01T09:00:00Z"),
  ] {
    s.add_topic(NewTopic {
      user_id:    "user-a".into(),
      title:      title.into(),
      created_at: Some(ts.parse().unwrap()),
      messages:   vec![],
    })
    .await
    .unwrap();
  }

  let topics = s.topics_for_user("user-a".into()).await.unwrap();
  let titles: Vec<&str> = topics.iter().map(|t| t.title.as_str()).collect();
  assert_eq!(titles, ["Newest", "Middle", "Oldest"]);
}

#[tokio::test]
async fn update_topic_patches_only_present_fields() {
  let s = store().await;
  let topic = s
    .add_topic(NewTopic {
      user_id:    "user-a".into(),
      title:      "New topic".into(),
      created_at: None,
      messages:   vec![],
    })
    .await
    .unwrap();

  let messages = vec![
    ChatMessage {
      role:       MessageRole::User,
      content:    "How do I get a laptop?".into(),
      created_at: Utc::now(),
    },
    ChatMessage {
      role:       MessageRole::Assistant,
      content:    "Laptops ship within 48h.".into(),
      created_at: Utc::now(),
    },
  ];

  s.update_topic(
    topic.id.clone(),
    TopicPatch { title: None, messages: Some(messages.clone()) },
  )
  .await
  .unwrap();

  let stored = s.topics_for_user("user-a".into()).await.unwrap();
  assert_eq!(stored[0].title, "New topic");
  assert_eq!(stored[0].messages, messages);

  s.update_topic(
    topic.id.clone(),
    TopicPatch { title: Some("Laptop questions".into()), messages: None },
  )
  .await
  .unwrap();

  let stored = s.topics_for_user("user-a".into()).await.unwrap();
  assert_eq!(stored[0].title, "Laptop questions");
  assert_eq!(stored[0].messages, messages);
}

#[tokio::test]
async fn delete_topic_is_idempotent() {
  let s = store().await;
  let topic = s
    .add_topic(NewTopic {
      user_id:    "user-a".into(),
      title:      "New topic".into(),
      created_at: None,
      messages:   vec![],
    })
    .await
    .unwrap();

  s.delete_topic(topic.id.clone()).await.unwrap();
  s.delete_topic(topic.id).await.unwrap();
  assert!(s.topics_for_user("user-a".into()).await.unwrap().is_empty());
}

// ─── Cascade application ─────────────────────────────────────────────────────

#[tokio::test]
async fn department_cascade_removes_all_dependents() {
  let s = store().await;
  let department = s.add_department("IT".into()).await.unwrap();
  let profile = s
    .add_profile(NewProfile {
      department_id: department.id.clone(),
      name:          "IT Analyst".into(),
      summary:       String::new(),
    })
    .await
    .unwrap();
  s.add_knowledge_entry(NewKnowledgeEntry {
    profile_id: profile.id.clone(),
    title:      "Laptop provisioning".into(),
    details:    "Ship MacBook Air within 48h.".into(),
  })
  .await
  .unwrap();
  s.add_user(user("analyst@example.com", Some(&department.id), Some(&profile.id)))
    .await
    .unwrap();

  let snapshot = s.snapshot().await.unwrap();
  let plan = plan_deletion(&DeletionTarget::Department(department.id), &snapshot);
  s.apply_deletion_plan(&plan).await.unwrap();

  assert!(s.list_departments().await.unwrap().is_empty());
  assert!(s.list_profiles().await.unwrap().is_empty());
  assert!(s.list_knowledge().await.unwrap().is_empty());
  assert!(s.list_users().await.unwrap().is_empty());
}

#[tokio::test]
async fn profile_cascade_detaches_accounts() {
  let s = store().await;
  let department = s.add_department("IT".into()).await.unwrap();
  let profile = s
    .add_profile(NewProfile {
      department_id: department.id.clone(),
      name:          "IT Analyst".into(),
      summary:       String::new(),
    })
    .await
    .unwrap();
  s.add_knowledge_entry(NewKnowledgeEntry {
    profile_id: profile.id.clone(),
    title:      "Laptop provisioning".into(),
    details:    String::new(),
  })
  .await
  .unwrap();
  s.add_user(user("analyst@example.com", Some(&department.id), Some(&profile.id)))
    .await
    .unwrap();

  let snapshot = s.snapshot().await.unwrap();
  let plan = plan_deletion(&DeletionTarget::Profile(profile.id), &snapshot);
  s.apply_deletion_plan(&plan).await.unwrap();

  assert!(s.list_profiles().await.unwrap().is_empty());
  assert!(s.list_knowledge().await.unwrap().is_empty());

  let users = s.list_users().await.unwrap();
  assert_eq!(users.len(), 1);
  assert!(users[0].profile_id.is_none());
  assert_eq!(users[0].department_id.as_deref(), Some(department.id.as_str()));
}

// ─── Bootstrap seeding ───────────────────────────────────────────────────────

#[tokio::test]
async fn seed_if_empty_populates_and_is_idempotent() {
  let s = store().await;
  let seed = SeedData::builtin();

  s.seed_if_empty(&seed).await.unwrap();
  assert_eq!(s.list_departments().await.unwrap().len(), 2);
  assert_eq!(s.list_profiles().await.unwrap().len(), 2);
  assert_eq!(s.list_knowledge().await.unwrap().len(), 3);
  assert_eq!(s.list_users().await.unwrap().len(), 1);

  s.seed_if_empty(&seed).await.unwrap();
  assert_eq!(s.list_departments().await.unwrap().len(), 2);
  assert_eq!(s.list_users().await.unwrap().len(), 1);
}

#[tokio::test]
async fn seed_skips_nonempty_collections() {
  let s = store().await;
  s.add_department("Custom".into()).await.unwrap();

  s.seed_if_empty(&SeedData::builtin()).await.unwrap();

  let departments = s.list_departments().await.unwrap();
  assert_eq!(departments.len(), 1);
  assert_eq!(departments[0].name, "Custom");
  // Other collections were still empty, so they are seeded.
  assert_eq!(s.list_profiles().await.unwrap().len(), 2);
}
