//! Opaque bearer tokens.

use std::fmt;

use rand_core::{OsRng, RngCore};

const TOKEN_BYTES: usize = 32;

/// An opaque, unguessable bearer token.
///
/// Compared byte-for-byte; the `Debug` impl only shows a short prefix so
/// tokens never end up whole in logs.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Token(String);

impl Token {
  /// Draw a fresh token from the operating system's CSPRNG.
  pub fn generate() -> Self {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    Self(hex::encode(bytes))
  }

  pub fn as_str(&self) -> &str { &self.0 }

  pub fn into_string(self) -> String { self.0 }

  /// First few characters, for log lines.
  pub fn redacted(&self) -> String {
    let prefix: String = self.0.chars().take(6).collect();
    format!("{prefix}…")
  }
}

impl From<String> for Token {
  fn from(value: String) -> Self { Self(value) }
}

impl From<&str> for Token {
  fn from(value: &str) -> Self { Self(value.to_owned()) }
}

impl fmt::Debug for Token {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("Token").field(&self.redacted()).finish()
  }
}
