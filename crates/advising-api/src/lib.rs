//! JSON HTTP surface for the advising-session booking service.
//!
//! Exposes an axum [`Router`] backed by any [`AdvisingStore`]. Login routes
//! are open; every other route takes the [`gate::Caller`] extractor and is
//! rejected with 401 before the handler runs if the token does not resolve.
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | `POST` | `/students/login`, `/students-b/login` | [`handlers::login::student`] |
//! | `POST` | `/deans/login` | [`handlers::login::dean`] |
//! | `GET`  | `/sessions` | [`handlers::sessions::list_open`] |
//! | `POST` | `/sessions/book`, `/students-b/sessions/book` | [`handlers::sessions::book`] |
//! | `GET`  | `/deans/sessions`, `/deans/sessions/pending` | [`handlers::deans::pending`] |
//! | `GET`  | `/deans/sessions/after-time` | [`handlers::deans::past_deadline`] |

pub mod error;
pub mod gate;
pub mod handlers;
pub mod settings;

pub use error::ApiError;
pub use settings::ServerConfig;

use std::sync::Arc;

use advising_core::{
  auth::Authority,
  booking::BookingEngine,
  clock::Clock,
  store::AdvisingStore,
  window::AdmissionWindow,
};
use axum::{
  Router,
  routing::{get, post},
};
use tower_http::trace::TraceLayer;

use handlers::{deans, login, sessions};

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
///
/// The authority and the booking engine share one store.
pub struct AppState<S: AdvisingStore> {
  pub authority: Arc<Authority<S>>,
  pub booking:   Arc<BookingEngine<S>>,
  pub clock:     Arc<dyn Clock>,
}

impl<S: AdvisingStore> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      authority: self.authority.clone(),
      booking:   self.booking.clone(),
      clock:     self.clock.clone(),
    }
  }
}

impl<S: AdvisingStore> AppState<S> {
  pub fn new(
    store: S,
    window: AdmissionWindow,
    clock: Arc<dyn Clock>,
  ) -> advising_core::Result<Self> {
    let store = Arc::new(store);
    Ok(Self {
      authority: Arc::new(Authority::new(store.clone())?),
      booking: Arc::new(BookingEngine::new(store, window)),
      clock,
    })
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the axum [`Router`] for the booking API.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: AdvisingStore + 'static,
{
  Router::new()
    // Login
    .route("/students/login", post(login::student::<S>))
    .route("/students-b/login", post(login::student::<S>))
    .route("/deans/login", post(login::dean::<S>))
    // Students
    .route("/sessions", get(sessions::list_open::<S>))
    .route("/sessions/book", post(sessions::book::<S>))
    .route("/students-b/sessions/book", post(sessions::book::<S>))
    // Deans
    .route("/deans/sessions", get(deans::pending::<S>))
    .route("/deans/sessions/pending", get(deans::pending::<S>))
    .route("/deans/sessions/after-time", get(deans::past_deadline::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
