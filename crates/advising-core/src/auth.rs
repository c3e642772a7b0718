//! Credential verification and the token authority.

use std::sync::Arc;

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
  password_hash::SaltString,
};
use rand_core::{OsRng, RngCore};
use tracing::{debug, info, warn};

use crate::{
  Error, Result,
  identity::{Identity, Role},
  store::AdvisingStore,
  token::Token,
};

/// Issues tokens on successful login and resolves them back to identities.
///
/// Resolution is role-agnostic: one token namespace covers both the student
/// and the dean pools.
pub struct Authority<S> {
  store:      Arc<S>,
  /// Verified against when the university id is unknown, so that a missing
  /// identity costs the same argon2 work as a wrong password.
  decoy_hash: String,
}

impl<S: AdvisingStore> Authority<S> {
  pub fn new(store: Arc<S>) -> Result<Self> {
    let mut secret = [0u8; 16];
    OsRng.fill_bytes(&mut secret);
    let salt = SaltString::generate(&mut OsRng);
    let decoy_hash = Argon2::default()
      .hash_password(&secret, &salt)
      .map_err(|e| Error::PasswordHash(e.to_string()))?
      .to_string();
    Ok(Self { store, decoy_hash })
  }

  /// Check `password` against the stored hash for `university_id` in the
  /// `role` pool and, on success, issue a fresh token.
  ///
  /// Unknown ids and wrong passwords both fail with
  /// [`Error::InvalidCredentials`].
  pub async fn login(
    &self,
    role: Role,
    university_id: &str,
    password: &str,
  ) -> Result<Token> {
    debug!(%role, university_id, "login attempt");

    let credential = self
      .store
      .credential(role, university_id.to_owned())
      .await
      .map_err(Error::store)?;

    let phc = credential
      .as_ref()
      .map_or(self.decoy_hash.as_str(), |c| c.password_hash.as_str());
    let verified = verify_password(password, phc);

    match credential {
      Some(credential) if verified => self.issue(&credential.identity).await,
      _ => {
        warn!(%role, university_id, "rejected login");
        Err(Error::InvalidCredentials)
      }
    }
  }

  /// Generate a new token for `identity`, invalidating any previous one.
  pub async fn issue(&self, identity: &Identity) -> Result<Token> {
    let token = Token::generate();
    self
      .store
      .replace_token(identity.clone(), token.clone())
      .await
      .map_err(Error::store)?;
    info!(%identity, token = %token.redacted(), "issued token");
    Ok(token)
  }

  /// Resolve a presented token to the identity currently holding it.
  pub async fn resolve(&self, token: &str) -> Result<Identity> {
    let resolved = self
      .store
      .resolve_token(Token::from(token))
      .await
      .map_err(Error::store)?;
    resolved.ok_or_else(|| {
      debug!("token did not resolve");
      Error::Unauthenticated
    })
  }
}

/// A malformed stored hash counts as a failed verification.
fn verify_password(password: &str, phc: &str) -> bool {
  PasswordHash::new(phc)
    .and_then(|hash| Argon2::default().verify_password(password.as_bytes(), &hash))
    .is_ok()
}
