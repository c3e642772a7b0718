//! Error type for `advising-store-memory`.

use advising_core::{identity::Role, session::SessionId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("duplicate {role} university id: {university_id}")]
  DuplicateIdentity { role: Role, university_id: String },

  #[error("duplicate session id: {0}")]
  DuplicateSession(SessionId),

  #[error("unknown {role} identity: {university_id}")]
  UnknownIdentity { role: Role, university_id: String },

  /// A freshly generated token is already held by another identity.
  #[error("token collision")]
  TokenCollision,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
