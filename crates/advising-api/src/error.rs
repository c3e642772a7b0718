//! API error type and [`axum::response::IntoResponse`] implementation.

use advising_core::Error as CoreError;
use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by a handler or by the access gate.
///
/// Every variant renders as `{"message": "..."}` with a status code that
/// tells auth failures, conflicts, unknown sessions and a closed admission
/// window apart.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("missing token")]
  MissingToken,

  #[error(transparent)]
  Core(#[from] CoreError),
}

impl ApiError {
  fn status_and_message(&self) -> (StatusCode, String) {
    let core = match self {
      ApiError::MissingToken => {
        return (StatusCode::UNAUTHORIZED, "Missing token".into());
      }
      ApiError::Core(e) => e,
    };
    match core {
      CoreError::Unauthenticated => (StatusCode::UNAUTHORIZED, "Invalid token".into()),
      CoreError::InvalidCredentials => {
        (StatusCode::UNAUTHORIZED, "Invalid credentials".into())
      }
      CoreError::SessionNotFound(_) => (StatusCode::NOT_FOUND, "Session not found".into()),
      CoreError::AlreadyBooked(_) => {
        (StatusCode::BAD_REQUEST, "Session already booked".into())
      }
      CoreError::OutsideAdmissionWindow(window) => (
        StatusCode::FORBIDDEN,
        format!("Sessions available only on {window}"),
      ),
      CoreError::InvalidAdmissionWindow(_)
      | CoreError::PasswordHash(_)
      | CoreError::Store(_) => {
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".into())
      }
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = self.status_and_message();
    if status.is_server_error() {
      tracing::error!(error = %self, "request failed");
    }
    (status, Json(json!({ "message": message }))).into_response()
  }
}
