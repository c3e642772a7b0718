//! Runtime configuration and seed data.
//!
//! Identities and sessions are seeded from configuration at startup; nothing
//! is persisted. Passwords appear only as argon2 PHC strings.

use std::sync::Arc;

use advising_core::{
  clock::Clock,
  identity::Role,
  session::SessionId,
  window::AdmissionWindow,
};
use advising_store_memory::MemoryStore;
use argon2::PasswordHash;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::AppState;

/// Server configuration, deserialised from `config.toml` and `ADVISING_*`
/// environment variables.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:      String,
  #[serde(default = "default_port")]
  pub port:      u16,
  #[serde(default)]
  pub admission: AdmissionWindow,
  #[serde(default)]
  pub students:  Vec<IdentitySeed>,
  #[serde(default)]
  pub deans:     Vec<IdentitySeed>,
  #[serde(default)]
  pub sessions:  Vec<SessionSeed>,
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 3000 }

#[derive(Deserialize, Clone)]
pub struct IdentitySeed {
  pub university_id: String,
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  pub password_hash: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionSeed {
  pub id:         SessionId,
  /// RFC 3339 timestamp.
  pub start_time: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("{role} {university_id}: password_hash is not a valid PHC string")]
  InvalidPasswordHash { role: Role, university_id: String },

  #[error(transparent)]
  Core(#[from] advising_core::Error),

  #[error("invalid seed data: {0}")]
  Seed(#[from] advising_store_memory::Error),
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  /// Validate the seed data and build the in-memory store from it.
  pub fn build_store(&self) -> Result<MemoryStore, ConfigError> {
    let mut builder = MemoryStore::builder();
    for (role, seeds) in [(Role::Student, &self.students), (Role::Dean, &self.deans)] {
      if seeds.is_empty() {
        warn!("no {role} identities configured");
      }
      for seed in seeds {
        if PasswordHash::new(&seed.password_hash).is_err() {
          return Err(ConfigError::InvalidPasswordHash {
            role,
            university_id: seed.university_id.clone(),
          });
        }
        builder =
          builder.identity(role, seed.university_id.clone(), seed.password_hash.clone());
      }
    }
    for seed in &self.sessions {
      builder = builder.session(seed.id, seed.start_time);
    }
    Ok(builder.build()?)
  }

  /// Build the full application state: validated window, seeded store and
  /// the supplied clock.
  pub fn build_state(
    &self,
    clock: Arc<dyn Clock>,
  ) -> Result<AppState<MemoryStore>, ConfigError> {
    self.admission.validate()?;
    let store = self.build_store()?;
    Ok(AppState::new(store, self.admission.clone(), clock)?)
  }
}

#[cfg(test)]
mod tests {
  use advising_core::clock::SystemClock;
  use chrono::Weekday;

  use super::*;

  fn parse(toml: &str) -> ServerConfig {
    config::Config::builder()
      .add_source(config::File::from_str(toml, config::FileFormat::Toml))
      .build()
      .unwrap()
      .try_deserialize()
      .unwrap()
  }

  #[test]
  fn defaults_apply_to_empty_file() {
    let cfg = parse("");
    assert_eq!(cfg.address(), "127.0.0.1:3000");
    assert_eq!(cfg.admission, AdmissionWindow::default());
    assert!(cfg.students.is_empty());
  }

  #[test]
  fn reads_seed_tables() {
    let hash = crate::tests::cheap_hash("password");
    let cfg = parse(&format!(
      r#"
        port = 8080

        [admission]
        weekdays = ["Wed"]
        hour = 14

        [[students]]
        university_id = "studentA"
        password_hash = "{hash}"

        [[deans]]
        university_id = "deanA"
        password_hash = "{hash}"

        [[sessions]]
        id = 1
        start_time = "2026-10-22T14:00:00Z"
      "#
    ));
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.admission.weekdays, vec![Weekday::Wed]);
    assert_eq!(cfg.admission.hour, 14);
    assert_eq!(cfg.sessions[0].id, SessionId(1));
    assert!(cfg.build_state(Arc::new(SystemClock)).is_ok());
  }

  #[test]
  fn plaintext_password_is_rejected() {
    let cfg = parse(
      r#"
        [[students]]
        university_id = "studentA"
        password_hash = "password"
      "#,
    );
    assert!(matches!(
      cfg.build_store(),
      Err(ConfigError::InvalidPasswordHash { role: Role::Student, .. })
    ));
  }

  #[test]
  fn duplicate_session_ids_are_rejected() {
    let cfg = parse(
      r#"
        [[sessions]]
        id = 1
        start_time = "2026-10-22T14:00:00Z"

        [[sessions]]
        id = 1
        start_time = "2026-10-23T14:00:00Z"
      "#,
    );
    assert!(matches!(cfg.build_store(), Err(ConfigError::Seed(_))));
  }

  #[test]
  fn out_of_range_hour_is_rejected() {
    let cfg = parse(
      r#"
        [admission]
        hour = 24
      "#,
    );
    assert!(matches!(
      cfg.build_state(Arc::new(SystemClock)),
      Err(ConfigError::Core(_))
    ));
  }
}
