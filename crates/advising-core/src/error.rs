//! Error types for `advising-core`.

use thiserror::Error;

use crate::{session::SessionId, window::AdmissionWindow};

#[derive(Debug, Error)]
pub enum Error {
  /// The presented token does not resolve to any identity.
  #[error("invalid token")]
  Unauthenticated,

  /// Unknown university id or wrong password; the two are not distinguished.
  #[error("invalid credentials")]
  InvalidCredentials,

  #[error("session not found: {0}")]
  SessionNotFound(SessionId),

  #[error("session {0} is already booked")]
  AlreadyBooked(SessionId),

  #[error("sessions available only on {0}")]
  OutsideAdmissionWindow(AdmissionWindow),

  #[error("invalid admission window: {0}")]
  InvalidAdmissionWindow(String),

  #[error("password hashing error: {0}")]
  PasswordHash(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub(crate) fn store<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
