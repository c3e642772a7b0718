//! [`MemoryStore`] — the in-memory implementation of [`AdvisingStore`].

use std::{
  collections::{HashMap, HashSet},
  sync::{Arc, OnceLock},
};

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{debug, trace};

use advising_core::{
  identity::{Credential, Identity, Role},
  session::{Session, SessionId},
  store::{AdvisingStore, Assignment},
  token::Token,
};

use crate::{Error, Result};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A process-local advising store.
///
/// Cloning is cheap — all clones share the same state.
#[derive(Clone)]
pub struct MemoryStore {
  inner: Arc<Inner>,
}

struct Inner {
  identities:    RwLock<Identities>,
  /// Fixed at build time; registry order is insertion order.
  sessions:      Vec<SessionSlot>,
  session_index: HashMap<SessionId, usize>,
}

#[derive(Default)]
struct Identities {
  records: HashMap<(Role, String), IdentityRecord>,
  /// Reverse index of every live token. Kept in lockstep with
  /// `IdentityRecord::current_token`.
  tokens:  HashMap<Token, Identity>,
}

struct IdentityRecord {
  password_hash: String,
  current_token: Option<Token>,
}

struct SessionSlot {
  id:         SessionId,
  start_time: DateTime<Utc>,
  assigned:   OnceLock<Identity>,
}

impl SessionSlot {
  fn snapshot(&self) -> Session {
    Session {
      id:               self.id,
      start_time:       self.start_time,
      assigned_student: self.assigned.get().cloned(),
    }
  }
}

impl MemoryStore {
  pub fn builder() -> MemoryStoreBuilder { MemoryStoreBuilder::default() }
}

// ─── Builder ─────────────────────────────────────────────────────────────────

/// Collects seed identities and sessions, then validates them in
/// [`MemoryStoreBuilder::build`].
#[derive(Default)]
pub struct MemoryStoreBuilder {
  identities: Vec<(Identity, String)>,
  sessions:   Vec<(SessionId, DateTime<Utc>)>,
}

impl MemoryStoreBuilder {
  pub fn identity(
    mut self,
    role: Role,
    university_id: impl Into<String>,
    password_hash: impl Into<String>,
  ) -> Self {
    self
      .identities
      .push((Identity::new(role, university_id), password_hash.into()));
    self
  }

  pub fn student(
    self,
    university_id: impl Into<String>,
    password_hash: impl Into<String>,
  ) -> Self {
    self.identity(Role::Student, university_id, password_hash)
  }

  pub fn dean(
    self,
    university_id: impl Into<String>,
    password_hash: impl Into<String>,
  ) -> Self {
    self.identity(Role::Dean, university_id, password_hash)
  }

  pub fn session(mut self, id: SessionId, start_time: DateTime<Utc>) -> Self {
    self.sessions.push((id, start_time));
    self
  }

  /// Fails on a repeated university id within a role or a repeated session
  /// id.
  pub fn build(self) -> Result<MemoryStore> {
    let mut records = HashMap::with_capacity(self.identities.len());
    for (identity, password_hash) in self.identities {
      let Identity { role, university_id } = identity;
      if records.contains_key(&(role, university_id.clone())) {
        return Err(Error::DuplicateIdentity { role, university_id });
      }
      records.insert((role, university_id), IdentityRecord {
        password_hash,
        current_token: None,
      });
    }

    let mut seen = HashSet::with_capacity(self.sessions.len());
    let mut sessions = Vec::with_capacity(self.sessions.len());
    for (id, start_time) in self.sessions {
      if !seen.insert(id) {
        return Err(Error::DuplicateSession(id));
      }
      sessions.push(SessionSlot { id, start_time, assigned: OnceLock::new() });
    }
    let session_index =
      sessions.iter().enumerate().map(|(i, s)| (s.id, i)).collect();

    debug!(
      identities = records.len(),
      sessions = sessions.len(),
      "built in-memory store"
    );

    Ok(MemoryStore {
      inner: Arc::new(Inner {
        identities: RwLock::new(Identities { records, tokens: HashMap::new() }),
        sessions,
        session_index,
      }),
    })
  }
}

// ─── AdvisingStore impl ──────────────────────────────────────────────────────

impl AdvisingStore for MemoryStore {
  type Error = Error;

  async fn credential(
    &self,
    role: Role,
    university_id: String,
  ) -> Result<Option<Credential>> {
    let identities = self.inner.identities.read().await;
    let key = (role, university_id);
    Ok(identities.records.get(&key).map(|record| Credential {
      identity:      Identity { role: key.0, university_id: key.1.clone() },
      password_hash: record.password_hash.clone(),
    }))
  }

  async fn replace_token(&self, identity: Identity, token: Token) -> Result<()> {
    let mut guard = self.inner.identities.write().await;
    let tables = &mut *guard;

    if tables.tokens.contains_key(&token) {
      return Err(Error::TokenCollision);
    }

    let key = (identity.role, identity.university_id.clone());
    let record = tables.records.get_mut(&key).ok_or_else(|| {
      Error::UnknownIdentity {
        role:          identity.role,
        university_id: identity.university_id.clone(),
      }
    })?;

    if let Some(previous) = record.current_token.replace(token.clone()) {
      trace!(%identity, "revoking previous token");
      tables.tokens.remove(&previous);
    }
    tables.tokens.insert(token, identity);
    Ok(())
  }

  async fn resolve_token(&self, token: Token) -> Result<Option<Identity>> {
    let identities = self.inner.identities.read().await;
    Ok(identities.tokens.get(&token).cloned())
  }

  async fn sessions(&self) -> Result<Vec<Session>> {
    Ok(self.inner.sessions.iter().map(SessionSlot::snapshot).collect())
  }

  async fn assign_student(
    &self,
    id: SessionId,
    student: Identity,
  ) -> Result<Assignment> {
    let Some(&index) = self.inner.session_index.get(&id) else {
      return Ok(Assignment::UnknownSession);
    };
    let slot = &self.inner.sessions[index];

    // The once-cell is the compare-and-swap: only one `set` can succeed.
    Ok(match slot.assigned.set(student) {
      Ok(()) => Assignment::Assigned(slot.snapshot()),
      Err(_) => Assignment::AlreadyAssigned(slot.snapshot()),
    })
  }
}
