//! Bookable advising sessions.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::Identity;

/// Identifier of a session, unique within the registry.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { self.0.fmt(f) }
}

impl FromStr for SessionId {
  type Err = std::num::ParseIntError;

  fn from_str(s: &str) -> Result<Self, Self::Err> { s.parse().map(Self) }
}

/// A snapshot of one session record.
///
/// `assigned_student` moves from `None` to `Some` at most once and never
/// changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
  pub id:               SessionId,
  pub start_time:       DateTime<Utc>,
  pub assigned_student: Option<Identity>,
}

impl Session {
  pub fn is_open(&self) -> bool { self.assigned_student.is_none() }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;
  use crate::identity::Role;

  #[test]
  fn serialises_wire_shape() {
    let session = Session {
      id:               SessionId(1),
      start_time:       Utc.with_ymd_and_hms(2026, 10, 22, 14, 0, 0).unwrap(),
      assigned_student: Some(Identity::new(Role::Student, "studentA")),
    };
    let json = serde_json::to_value(&session).unwrap();
    assert_eq!(json["id"], 1);
    assert_eq!(json["startTime"], "2026-10-22T14:00:00Z");
    assert_eq!(json["assignedStudent"]["universityId"], "studentA");
  }

  #[test]
  fn open_session_has_null_student() {
    let session = Session {
      id:               SessionId(2),
      start_time:       Utc.with_ymd_and_hms(2026, 10, 22, 14, 0, 0).unwrap(),
      assigned_student: None,
    };
    assert!(session.is_open());
    let json = serde_json::to_value(&session).unwrap();
    assert!(json["assignedStudent"].is_null());
  }
}
