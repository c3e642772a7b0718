//! The booking engine: admission rule, open-session listing and the one-way
//! `Open -> Booked` transition.
//!
//! Only the open-session listing is gated by the admission window. Booking by
//! id and the dean's review queries are available at any time, so a caller
//! who already knows a session id can book it outside the window.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc};
use tracing::{debug, info};

use crate::{
  Error, Result,
  identity::Identity,
  session::{Session, SessionId},
  store::{AdvisingStore, Assignment},
  window::AdmissionWindow,
};

pub struct BookingEngine<S> {
  store:  Arc<S>,
  window: AdmissionWindow,
}

impl<S: AdvisingStore> BookingEngine<S> {
  pub fn new(store: Arc<S>, window: AdmissionWindow) -> Self {
    Self { store, window }
  }

  pub fn window(&self) -> &AdmissionWindow { &self.window }

  /// All unassigned sessions, in registry order.
  ///
  /// Fails with [`Error::OutsideAdmissionWindow`] unless `as_of` falls inside
  /// the admission window. This is a gate on the query, not a filter.
  pub async fn list_open_sessions(
    &self,
    as_of: DateTime<FixedOffset>,
  ) -> Result<Vec<Session>> {
    if !self.window.admits(&as_of) {
      debug!(%as_of, "open-session listing outside admission window");
      return Err(Error::OutsideAdmissionWindow(self.window.clone()));
    }
    self.list_pending().await
  }

  /// Book session `id` for `requester`. First writer wins; the assignment
  /// never changes afterwards.
  pub async fn book(
    &self,
    id: SessionId,
    requester: &Identity,
    as_of: DateTime<FixedOffset>,
  ) -> Result<Session> {
    let outcome = self
      .store
      .assign_student(id, requester.clone())
      .await
      .map_err(Error::store)?;

    match outcome {
      Assignment::Assigned(session) => {
        info!(session = %id, student = %requester, %as_of, "session booked");
        Ok(session)
      }
      Assignment::AlreadyAssigned(_) => {
        debug!(session = %id, student = %requester, "session already booked");
        Err(Error::AlreadyBooked(id))
      }
      Assignment::UnknownSession => Err(Error::SessionNotFound(id)),
    }
  }

  /// Sessions nobody has booked yet. Not time-gated.
  pub async fn list_pending(&self) -> Result<Vec<Session>> {
    let mut sessions = self.store.sessions().await.map_err(Error::store)?;
    sessions.retain(Session::is_open);
    Ok(sessions)
  }

  /// Sessions whose start time is at or before `as_of`, booked or not.
  pub async fn list_past_deadline(
    &self,
    as_of: DateTime<FixedOffset>,
  ) -> Result<Vec<Session>> {
    let as_of = as_of.with_timezone(&Utc);
    let mut sessions = self.store.sessions().await.map_err(Error::store)?;
    sessions.retain(|s| s.start_time <= as_of);
    Ok(sessions)
  }
}
