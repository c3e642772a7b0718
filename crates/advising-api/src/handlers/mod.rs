pub mod deans;
pub mod login;
pub mod sessions;

use advising_core::session::Session;
use serde::{Deserialize, Serialize};

/// `{"sessions": [...]}`
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionsBody {
  pub sessions: Vec<Session>,
}

/// `{"message": "..."}`
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageBody {
  pub message: String,
}
