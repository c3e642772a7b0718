//! The `AdvisingStore` trait: credential store, token table and session
//! registry behind one seam.
//!
//! Implemented by storage backends (e.g. `advising-store-memory`). The
//! [`Authority`](crate::auth::Authority) and
//! [`BookingEngine`](crate::booking::BookingEngine) services depend on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  identity::{Credential, Identity, Role},
  session::{Session, SessionId},
  token::Token,
};

/// Outcome of [`AdvisingStore::assign_student`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assignment {
  /// The session was open and now belongs to the requester.
  Assigned(Session),
  /// Someone got there first. Carries the session as it stands.
  AlreadyAssigned(Session),
  UnknownSession,
}

/// Abstraction over an advising-session store backend.
///
/// All methods return `Send` futures so the trait can be used from axum
/// handlers on a multi-threaded runtime.
pub trait AdvisingStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Credentials ───────────────────────────────────────────────────────

  /// Look up a login record by exact university id within one role's pool.
  fn credential(
    &self,
    role: Role,
    university_id: String,
  ) -> impl Future<Output = Result<Option<Credential>, Self::Error>> + Send + '_;

  // ── Tokens ────────────────────────────────────────────────────────────

  /// Make `token` the identity's only live token. The previous token, if
  /// any, must stop resolving before this returns.
  fn replace_token(
    &self,
    identity: Identity,
    token: Token,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Find the identity whose current token equals `token` exactly.
  fn resolve_token(
    &self,
    token: Token,
  ) -> impl Future<Output = Result<Option<Identity>, Self::Error>> + Send + '_;

  // ── Sessions ──────────────────────────────────────────────────────────

  /// Snapshot of every session, in registry order.
  fn sessions(
    &self,
  ) -> impl Future<Output = Result<Vec<Session>, Self::Error>> + Send + '_;

  /// Assign `student` to session `id` if and only if it is still open.
  ///
  /// Must be atomic per session: of any number of concurrent calls for the
  /// same id, exactly one may observe [`Assignment::Assigned`].
  fn assign_student(
    &self,
    id: SessionId,
    student: Identity,
  ) -> impl Future<Output = Result<Assignment, Self::Error>> + Send + '_;
}
