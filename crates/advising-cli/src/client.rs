//! Async HTTP client wrapping the advising JSON API.

use std::time::Duration;

use advising_core::{
  identity::Role,
  session::{Session, SessionId},
};
use anyhow::{Context, Result, anyhow, bail};
use reqwest::{Client, RequestBuilder, Response, header};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::json;

#[derive(Deserialize)]
struct TokenBody {
  token: String,
}

#[derive(Deserialize)]
struct SessionsBody {
  sessions: Vec<Session>,
}

#[derive(Deserialize)]
struct MessageBody {
  message: String,
}

/// Async HTTP client for the booking API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client:   Client,
  base_url: String,
  token:    Option<String>,
}

impl ApiClient {
  pub fn new(base_url: String, token: Option<String>) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, base_url, token })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.base_url.trim_end_matches('/'), path)
  }

  /// Attach the raw token as the `authorization` header.
  fn authed(&self, req: RequestBuilder) -> Result<RequestBuilder> {
    let token = self
      .token
      .as_deref()
      .ok_or_else(|| anyhow!("no token; run `advising login` or set ADVISING_TOKEN"))?;
    Ok(req.header(header::AUTHORIZATION, token))
  }

  // ── Login ─────────────────────────────────────────────────────────────────

  /// `POST /students/login` or `POST /deans/login`
  pub async fn login(
    &self,
    role: Role,
    university_id: &str,
    password: &str,
  ) -> Result<String> {
    let path = match role {
      Role::Student => "/students/login",
      Role::Dean => "/deans/login",
    };
    let resp = self
      .client
      .post(self.url(path))
      .json(&json!({ "universityId": university_id, "password": password }))
      .send()
      .await
      .with_context(|| format!("POST {path} failed"))?;
    let body: TokenBody = read_json(resp, path).await?;
    Ok(body.token)
  }

  // ── Sessions ──────────────────────────────────────────────────────────────

  /// `GET /sessions`
  pub async fn open_sessions(&self) -> Result<Vec<Session>> {
    self.get_sessions("/sessions").await
  }

  /// `POST /sessions/book`
  pub async fn book(&self, session_id: SessionId) -> Result<String> {
    let resp = self
      .authed(self.client.post(self.url("/sessions/book")))?
      .json(&json!({ "sessionId": session_id }))
      .send()
      .await
      .context("POST /sessions/book failed")?;
    let body: MessageBody = read_json(resp, "/sessions/book").await?;
    Ok(body.message)
  }

  // ── Dean review ───────────────────────────────────────────────────────────

  /// `GET /deans/sessions/pending`
  pub async fn pending(&self) -> Result<Vec<Session>> {
    self.get_sessions("/deans/sessions/pending").await
  }

  /// `GET /deans/sessions/after-time`
  pub async fn past_deadline(&self) -> Result<Vec<Session>> {
    self.get_sessions("/deans/sessions/after-time").await
  }

  async fn get_sessions(&self, path: &str) -> Result<Vec<Session>> {
    let resp = self
      .authed(self.client.get(self.url(path)))?
      .send()
      .await
      .with_context(|| format!("GET {path} failed"))?;
    let body: SessionsBody = read_json(resp, path).await?;
    Ok(body.sessions)
  }
}

/// Deserialise a success body, or turn the server's `{message}` into an
/// error.
async fn read_json<T: DeserializeOwned>(resp: Response, path: &str) -> Result<T> {
  let status = resp.status();
  if !status.is_success() {
    let message = resp
      .json::<MessageBody>()
      .await
      .map(|b| b.message)
      .unwrap_or_else(|_| status.canonical_reason().unwrap_or("error").to_string());
    bail!("{path} → {status}: {message}");
  }
  resp
    .json()
    .await
    .with_context(|| format!("deserialising response from {path}"))
}
