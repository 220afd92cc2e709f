//! SQL schema for the Onbuddy SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// There are deliberately no foreign-key constraints: referential
/// integrity on delete is maintained by the cascade planner, matching the
/// flat-record data model.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS departments (
    id    TEXT PRIMARY KEY,
    name  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS profiles (
    id            TEXT PRIMARY KEY,
    department_id TEXT NOT NULL,
    name          TEXT NOT NULL,
    summary       TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS knowledge_base (
    id          TEXT PRIMARY KEY,
    profile_id  TEXT NOT NULL,
    title       TEXT NOT NULL,
    details     TEXT NOT NULL DEFAULT ''
);

-- Emails are stored trimmed and lowercased; the unique index therefore
-- enforces the case-insensitive uniqueness invariant.
CREATE TABLE IF NOT EXISTS users (
    id            TEXT PRIMARY KEY,
    role          TEXT NOT NULL,    -- 'superadmin' | 'user'
    name          TEXT NOT NULL,
    email         TEXT NOT NULL,
    password      TEXT NOT NULL,
    department_id TEXT,
    profile_id    TEXT
);

CREATE UNIQUE INDEX IF NOT EXISTS users_email_idx ON users(email);

CREATE TABLE IF NOT EXISTS topics (
    id            TEXT PRIMARY KEY,
    user_id       TEXT NOT NULL,
    title         TEXT NOT NULL,
    created_at    TEXT NOT NULL,    -- RFC 3339 UTC
    messages_json TEXT NOT NULL DEFAULT '[]'
);

CREATE INDEX IF NOT EXISTS profiles_department_idx ON profiles(department_id);
CREATE INDEX IF NOT EXISTS knowledge_profile_idx   ON knowledge_base(profile_id);
CREATE INDEX IF NOT EXISTS topics_user_idx         ON topics(user_id);

PRAGMA user_version = 1;
";
