//! Handlers for the login endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/students/login` | Also served at `/students-b/login` |
//! | `POST` | `/deans/login` | |
//!
//! Body: `{"universityId":"...","password":"..."}`; returns `{"token":"..."}`.

use advising_core::{identity::Role, store::AdvisingStore};
use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiError};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginBody {
  pub university_id: String,
  pub password:      String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenBody {
  pub token: String,
}

/// `POST /students/login`
pub async fn student<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<LoginBody>,
) -> Result<Json<TokenBody>, ApiError>
where
  S: AdvisingStore + 'static,
{
  login(&state, Role::Student, body).await
}

/// `POST /deans/login`
pub async fn dean<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<LoginBody>,
) -> Result<Json<TokenBody>, ApiError>
where
  S: AdvisingStore + 'static,
{
  login(&state, Role::Dean, body).await
}

async fn login<S: AdvisingStore>(
  state: &AppState<S>,
  role: Role,
  body: LoginBody,
) -> Result<Json<TokenBody>, ApiError> {
  let token = state
    .authority
    .login(role, &body.university_id, &body.password)
    .await?;
  Ok(Json(TokenBody { token: token.into_string() }))
}
