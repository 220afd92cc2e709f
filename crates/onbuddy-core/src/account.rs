//! User accounts and their roles.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Access level of an account. Login requires an exact role match: a
/// `superadmin` credential pair never authenticates a `user` session and
/// vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  Superadmin,
  User,
}

impl Role {
  pub fn as_str(self) -> &'static str {
    match self {
      Role::Superadmin => "superadmin",
      Role::User => "user",
    }
  }

  pub fn parse(s: &str) -> Result<Self> {
    match s {
      "superadmin" => Ok(Role::Superadmin),
      "user" => Ok(Role::User),
      other => Err(Error::UnknownRole(other.to_owned())),
    }
  }
}

/// An account that can sign in.
///
/// A `user`-role account is optionally linked to a department and profile;
/// a `superadmin` account has neither. Emails are stored lowercased and are
/// unique case-insensitively. Passwords are stored and compared as plain
/// text — exact, untrimmed equality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
  pub id:       String,
  pub role:     Role,
  pub name:     String,
  pub email:    String,
  pub password: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub department_id: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub profile_id:    Option<String>,
}
