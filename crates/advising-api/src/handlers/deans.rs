//! Handlers for the dean review endpoints. Neither is time-gated.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/deans/sessions/pending` | Also served at `/deans/sessions` |
//! | `GET`  | `/deans/sessions/after-time` | Sessions whose start time has passed |

use advising_core::store::AdvisingStore;
use axum::{Json, extract::State};
use tracing::debug;

use super::SessionsBody;
use crate::{AppState, error::ApiError, gate::Caller};

/// `GET /deans/sessions/pending`
pub async fn pending<S>(
  State(state): State<AppState<S>>,
  Caller(caller): Caller,
) -> Result<Json<SessionsBody>, ApiError>
where
  S: AdvisingStore + 'static,
{
  debug!(%caller, "listing pending sessions");
  let sessions = state.booking.list_pending().await?;
  Ok(Json(SessionsBody { sessions }))
}

/// `GET /deans/sessions/after-time`
pub async fn past_deadline<S>(
  State(state): State<AppState<S>>,
  Caller(caller): Caller,
) -> Result<Json<SessionsBody>, ApiError>
where
  S: AdvisingStore + 'static,
{
  let as_of = state.clock.now();
  debug!(%caller, %as_of, "listing sessions past their start time");
  let sessions = state.booking.list_past_deadline(as_of).await?;
  Ok(Json(SessionsBody { sessions }))
}
