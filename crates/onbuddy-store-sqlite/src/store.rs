//! [`SqliteStore`] — the SQLite implementation of [`OnbuddyStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use onbuddy_core::{
  account::UserAccount,
  cascade::{DeletionPlan, Snapshot},
  id::uid,
  org::{Department, KnowledgeEntry, Profile},
  seed::SeedData,
  store::{
    NewKnowledgeEntry, NewProfile, NewTopic, NewUserAccount, OnbuddyStore, TopicPatch,
  },
  topic::ChatTopic,
};

use crate::{
  encode::{encode_dt, encode_messages, encode_role, RawTopic, RawUser},
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An Onbuddy store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn read_departments(&self) -> Result<Vec<Department>> {
    let rows: Vec<Department> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT id, name FROM departments")?;
        let rows = stmt
          .query_map([], |row| {
            Ok(Department { id: row.get(0)?, name: row.get(1)? })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  async fn read_profiles(&self) -> Result<Vec<Profile>> {
    let rows: Vec<Profile> = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare("SELECT id, department_id, name, summary FROM profiles")?;
        let rows = stmt
          .query_map([], |row| {
            Ok(Profile {
              id:            row.get(0)?,
              department_id: row.get(1)?,
              name:          row.get(2)?,
              summary:       row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  async fn read_knowledge(&self) -> Result<Vec<KnowledgeEntry>> {
    let rows: Vec<KnowledgeEntry> = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare("SELECT id, profile_id, title, details FROM knowledge_base")?;
        let rows = stmt
          .query_map([], |row| {
            Ok(KnowledgeEntry {
              id:         row.get(0)?,
              profile_id: row.get(1)?,
              title:      row.get(2)?,
              details:    row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  async fn read_users(&self) -> Result<Vec<UserAccount>> {
    let raws: Vec<RawUser> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, role, name, email, password, department_id, profile_id FROM users",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawUser {
              id:            row.get(0)?,
              role:          row.get(1)?,
              name:          row.get(2)?,
              email:         row.get(3)?,
              password:      row.get(4)?,
              department_id: row.get(5)?,
              profile_id:    row.get(6)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawUser::into_account).collect()
  }

  fn insert_user_sql(conn: &rusqlite::Connection, account: &UserAccount) -> rusqlite::Result<()> {
    conn.execute(
      "INSERT INTO users (id, role, name, email, password, department_id, profile_id)
       VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
      rusqlite::params![
        account.id,
        encode_role(account.role),
        account.name,
        account.email,
        account.password,
        account.department_id,
        account.profile_id,
      ],
    )?;
    Ok(())
  }
}

// ─── OnbuddyStore impl ───────────────────────────────────────────────────────

impl OnbuddyStore for SqliteStore {
  type Error = Error;

  // ── Departments ───────────────────────────────────────────────────────────

  async fn add_department(&self, name: String) -> Result<Department> {
    let department = Department { id: uid("dept"), name };

    let row = department.clone();
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO departments (id, name) VALUES (?1, ?2)",
          rusqlite::params![row.id, row.name],
        )?;
        Ok(())
      })
      .await?;

    Ok(department)
  }

  async fn rename_department(&self, id: String, name: String) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE departments SET name = ?2 WHERE id = ?1",
          rusqlite::params![id, name],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn list_departments(&self) -> Result<Vec<Department>> {
    self.read_departments().await
  }

  // ── Profiles ──────────────────────────────────────────────────────────────

  async fn add_profile(&self, input: NewProfile) -> Result<Profile> {
    let profile = Profile {
      id:            uid("profile"),
      department_id: input.department_id,
      name:          input.name,
      summary:       input.summary,
    };

    let row = profile.clone();
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO profiles (id, department_id, name, summary) VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![row.id, row.department_id, row.name, row.summary],
        )?;
        Ok(())
      })
      .await?;

    Ok(profile)
  }

  async fn update_profile(&self, id: String, input: NewProfile) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE profiles SET department_id = ?2, name = ?3, summary = ?4 WHERE id = ?1",
          rusqlite::params![id, input.department_id, input.name, input.summary],
        )?;
        // Accounts signed up against this profile follow it to the new
        // department.
        conn.execute(
          "UPDATE users SET department_id = ?2 WHERE profile_id = ?1",
          rusqlite::params![id, input.department_id],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn list_profiles(&self) -> Result<Vec<Profile>> {
    self.read_profiles().await
  }

  // ── Knowledge entries ─────────────────────────────────────────────────────

  async fn add_knowledge_entry(&self, input: NewKnowledgeEntry) -> Result<KnowledgeEntry> {
    let entry = KnowledgeEntry {
      id:         uid("kb"),
      profile_id: input.profile_id,
      title:      input.title,
      details:    input.details,
    };

    let row = entry.clone();
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO knowledge_base (id, profile_id, title, details) VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![row.id, row.profile_id, row.title, row.details],
        )?;
        Ok(())
      })
      .await?;

    Ok(entry)
  }

  async fn update_knowledge_entry(&self, id: String, input: NewKnowledgeEntry) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE knowledge_base SET profile_id = ?2, title = ?3, details = ?4 WHERE id = ?1",
          rusqlite::params![id, input.profile_id, input.title, input.details],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn list_knowledge(&self) -> Result<Vec<KnowledgeEntry>> {
    self.read_knowledge().await
  }

  // ── User accounts ─────────────────────────────────────────────────────────

  async fn add_user(&self, input: NewUserAccount) -> Result<UserAccount> {
    let account = UserAccount {
      id:            uid("user"),
      role:          input.role,
      name:          input.name,
      email:         input.email,
      password:      input.password,
      department_id: input.department_id,
      profile_id:    input.profile_id,
    };

    let row = account.clone();
    self
      .conn
      .call(move |conn| {
        Self::insert_user_sql(conn, &row)?;
        Ok(())
      })
      .await?;

    Ok(account)
  }

  async fn find_user_by_email(&self, email: String) -> Result<Option<UserAccount>> {
    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, role, name, email, password, department_id, profile_id
               FROM users WHERE email = LOWER(?1)",
              rusqlite::params![email],
              |row| {
                Ok(RawUser {
                  id:            row.get(0)?,
                  role:          row.get(1)?,
                  name:          row.get(2)?,
                  email:         row.get(3)?,
                  password:      row.get(4)?,
                  department_id: row.get(5)?,
                  profile_id:    row.get(6)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawUser::into_account).transpose()
  }

  async fn list_users(&self) -> Result<Vec<UserAccount>> {
    self.read_users().await
  }

  // ── Topics ────────────────────────────────────────────────────────────────

  async fn topics_for_user(&self, user_id: String) -> Result<Vec<ChatTopic>> {
    let raws: Vec<RawTopic> = self
      .conn
      .call(move |conn| {
        // RFC 3339 UTC strings sort lexicographically in time order.
        let mut stmt = conn.prepare(
          "SELECT id, user_id, title, created_at, messages_json
           FROM topics WHERE user_id = ?1 ORDER BY created_at DESC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![user_id], |row| {
            Ok(RawTopic {
              id:            row.get(0)?,
              user_id:       row.get(1)?,
              title:         row.get(2)?,
              created_at:    row.get(3)?,
              messages_json: row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawTopic::into_topic).collect()
  }

  async fn add_topic(&self, input: NewTopic) -> Result<ChatTopic> {
    let topic = ChatTopic {
      id:         uid("topic"),
      user_id:    input.user_id,
      title:      input.title,
      created_at: input.created_at.unwrap_or_else(Utc::now),
      messages:   input.messages,
    };

    let id            = topic.id.clone();
    let user_id       = topic.user_id.clone();
    let title         = topic.title.clone();
    let created_at    = encode_dt(topic.created_at);
    let messages_json = encode_messages(&topic.messages)?;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO topics (id, user_id, title, created_at, messages_json)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id, user_id, title, created_at, messages_json],
        )?;
        Ok(())
      })
      .await?;

    Ok(topic)
  }

  async fn update_topic(&self, id: String, patch: TopicPatch) -> Result<()> {
    let messages_json = patch.messages.as_deref().map(encode_messages).transpose()?;
    let title = patch.title;

    self
      .conn
      .call(move |conn| {
        if let Some(title) = &title {
          conn.execute(
            "UPDATE topics SET title = ?2 WHERE id = ?1",
            rusqlite::params![id, title],
          )?;
        }
        if let Some(json) = &messages_json {
          conn.execute(
            "UPDATE topics SET messages_json = ?2 WHERE id = ?1",
            rusqlite::params![id, json],
          )?;
        }
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn delete_topic(&self, id: String) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute("DELETE FROM topics WHERE id = ?1", rusqlite::params![id])?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Cascade ───────────────────────────────────────────────────────────────

  async fn snapshot(&self) -> Result<Snapshot> {
    Ok(Snapshot {
      departments:       self.read_departments().await?,
      profiles:          self.read_profiles().await?,
      knowledge_entries: self.read_knowledge().await?,
      user_accounts:     self.read_users().await?,
    })
  }

  async fn apply_deletion_plan<'a>(&'a self, plan: &'a DeletionPlan) -> Result<()> {
    // One transaction: the cascade either fully applies or not at all.
    let plan = plan.clone();
    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        {
          let mut stmt = tx.prepare("DELETE FROM departments WHERE id = ?1")?;
          for id in &plan.departments {
            stmt.execute(rusqlite::params![id])?;
          }

          let mut stmt = tx.prepare("DELETE FROM profiles WHERE id = ?1")?;
          for id in &plan.profiles {
            stmt.execute(rusqlite::params![id])?;
          }

          let mut stmt = tx.prepare("DELETE FROM knowledge_base WHERE id = ?1")?;
          for id in &plan.knowledge_entries {
            stmt.execute(rusqlite::params![id])?;
          }

          let mut stmt = tx.prepare("DELETE FROM users WHERE id = ?1")?;
          for id in &plan.users {
            stmt.execute(rusqlite::params![id])?;
          }

          let mut stmt = tx.prepare("UPDATE users SET profile_id = NULL WHERE id = ?1")?;
          for id in &plan.detached_users {
            stmt.execute(rusqlite::params![id])?;
          }
        }
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Bootstrap ─────────────────────────────────────────────────────────────

  async fn seed_if_empty<'a>(&'a self, seed: &'a SeedData) -> Result<()> {
    let seed = seed.clone();
    self
      .conn
      .call(move |conn| {
        let count = |conn: &rusqlite::Connection, table: &str| -> rusqlite::Result<i64> {
          conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
        };

        if count(conn, "departments")? == 0 {
          for department in &seed.departments {
            conn.execute(
              "INSERT INTO departments (id, name) VALUES (?1, ?2)",
              rusqlite::params![department.id, department.name],
            )?;
          }
        }

        if count(conn, "profiles")? == 0 {
          for profile in &seed.profiles {
            conn.execute(
              "INSERT INTO profiles (id, department_id, name, summary) VALUES (?1, ?2, ?3, ?4)",
              rusqlite::params![profile.id, profile.department_id, profile.name, profile.summary],
            )?;
          }
        }

        if count(conn, "knowledge_base")? == 0 {
          for entry in &seed.knowledge_entries {
            conn.execute(
              "INSERT INTO knowledge_base (id, profile_id, title, details) VALUES (?1, ?2, ?3, ?4)",
              rusqlite::params![entry.id, entry.profile_id, entry.title, entry.details],
            )?;
          }
        }

        let admin_exists: bool = conn
          .query_row(
            "SELECT 1 FROM users WHERE email = ?1",
            rusqlite::params![seed.superadmin.email],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);

        if !admin_exists {
          Self::insert_user_sql(conn, &seed.superadmin)?;
        }

        Ok(())
      })
      .await?;
    Ok(())
  }
}
