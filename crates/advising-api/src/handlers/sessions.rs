//! Handlers for the student-facing `/sessions` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/sessions` | 403 outside the admission window |
//! | `POST` | `/sessions/book` | Body: `{"sessionId":1}`; also at `/students-b/sessions/book` |

use advising_core::{session::SessionId, store::AdvisingStore};
use axum::{Json, extract::State};
use serde::Deserialize;
use tracing::debug;

use super::{MessageBody, SessionsBody};
use crate::{AppState, error::ApiError, gate::Caller};

/// `GET /sessions`
pub async fn list_open<S>(
  State(state): State<AppState<S>>,
  Caller(caller): Caller,
) -> Result<Json<SessionsBody>, ApiError>
where
  S: AdvisingStore + 'static,
{
  debug!(%caller, "listing open sessions");
  let sessions = state.booking.list_open_sessions(state.clock.now()).await?;
  Ok(Json(SessionsBody { sessions }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookBody {
  pub session_id: SessionId,
}

/// `POST /sessions/book`
///
/// Not gated by the admission window.
pub async fn book<S>(
  State(state): State<AppState<S>>,
  Caller(caller): Caller,
  Json(body): Json<BookBody>,
) -> Result<Json<MessageBody>, ApiError>
where
  S: AdvisingStore + 'static,
{
  state
    .booking
    .book(body.session_id, &caller, state.clock.now())
    .await?;
  Ok(Json(MessageBody { message: "Session booked successfully".into() }))
}
