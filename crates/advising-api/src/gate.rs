//! Access gate: resolves the `authorization` header to an identity before
//! any protected handler runs.

use advising_core::{Error as CoreError, identity::Identity, store::AdvisingStore};
use axum::{
  extract::FromRequestParts,
  http::{HeaderMap, header, request::Parts},
};
use tracing::trace;

use crate::{AppState, error::ApiError};

/// The identity behind the request's token. Taking this extractor in a
/// handler is what makes the route protected.
#[derive(Debug, Clone)]
pub struct Caller(pub Identity);

/// The raw header value is the token; no scheme prefix is stripped.
pub fn raw_token(headers: &HeaderMap) -> Result<&str, ApiError> {
  let value = headers
    .get(header::AUTHORIZATION)
    .ok_or(ApiError::MissingToken)?;
  // Issued tokens are hex, so a non-ASCII value can never match one.
  let token = value
    .to_str()
    .map_err(|_| ApiError::Core(CoreError::Unauthenticated))?;
  if token.is_empty() {
    return Err(ApiError::MissingToken);
  }
  Ok(token)
}

impl<S> FromRequestParts<AppState<S>> for Caller
where
  S: AdvisingStore + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let token = raw_token(&parts.headers)?;
    let identity = state.authority.resolve(token).await?;
    trace!(caller = %identity, path = %parts.uri.path(), "request authenticated");
    Ok(Caller(identity))
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use advising_core::{clock::SystemClock, identity::Role, window::AdmissionWindow};
  use advising_store_memory::MemoryStore;
  use axum::{body::Body, http::Request};

  use super::*;

  fn make_state() -> AppState<MemoryStore> {
    let store = MemoryStore::builder()
      .student("studentA", crate::tests::cheap_hash("password"))
      .build()
      .unwrap();
    AppState::new(store, AdmissionWindow::default(), Arc::new(SystemClock)).unwrap()
  }

  async fn extract(
    req: Request<Body>,
    state: &AppState<MemoryStore>,
  ) -> Result<Caller, ApiError> {
    let (mut parts, _) = req.into_parts();
    Caller::from_request_parts(&mut parts, state).await
  }

  #[tokio::test]
  async fn valid_token_resolves_identity() {
    let state = make_state();
    let token = state
      .authority
      .login(Role::Student, "studentA", "password")
      .await
      .unwrap();
    let req = Request::builder()
      .header(header::AUTHORIZATION, token.as_str())
      .body(Body::empty())
      .unwrap();
    let Caller(identity) = extract(req, &state).await.unwrap();
    assert_eq!(identity.university_id, "studentA");
  }

  #[tokio::test]
  async fn bearer_prefix_is_not_stripped() {
    let state = make_state();
    let token = state
      .authority
      .login(Role::Student, "studentA", "password")
      .await
      .unwrap();
    let req = Request::builder()
      .header(header::AUTHORIZATION, format!("Bearer {}", token.as_str()))
      .body(Body::empty())
      .unwrap();
    assert!(matches!(
      extract(req, &state).await,
      Err(ApiError::Core(CoreError::Unauthenticated))
    ));
  }

  #[tokio::test]
  async fn missing_header() {
    let state = make_state();
    let req = Request::builder().body(Body::empty()).unwrap();
    assert!(matches!(extract(req, &state).await, Err(ApiError::MissingToken)));
  }

  #[tokio::test]
  async fn empty_header_counts_as_missing() {
    let state = make_state();
    let req = Request::builder()
      .header(header::AUTHORIZATION, "")
      .body(Body::empty())
      .unwrap();
    assert!(matches!(extract(req, &state).await, Err(ApiError::MissingToken)));
  }

  #[tokio::test]
  async fn unknown_token() {
    let state = make_state();
    let req = Request::builder()
      .header(header::AUTHORIZATION, "not-a-token")
      .body(Body::empty())
      .unwrap();
    assert!(matches!(
      extract(req, &state).await,
      Err(ApiError::Core(CoreError::Unauthenticated))
    ));
  }
}
