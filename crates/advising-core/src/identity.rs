//! Identities: the students and deans who can log in.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which identity pool a record belongs to. University ids are unique per
/// role, not globally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  Student,
  Dean,
}

impl fmt::Display for Role {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Role::Student => f.write_str("student"),
      Role::Dean => f.write_str("dean"),
    }
  }
}

/// An authenticated principal, as resolved from a token.
///
/// This is also what a booked session records as its assigned student.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
  pub role:          Role,
  pub university_id: String,
}

impl Identity {
  pub fn new(role: Role, university_id: impl Into<String>) -> Self {
    Self { role, university_id: university_id.into() }
  }
}

impl fmt::Display for Identity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} {}", self.role, self.university_id)
  }
}

/// A stored login record. Never serialised.
#[derive(Clone)]
pub struct Credential {
  pub identity:      Identity,
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  pub password_hash: String,
}

impl fmt::Debug for Credential {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Credential")
      .field("identity", &self.identity)
      .finish_non_exhaustive()
  }
}
