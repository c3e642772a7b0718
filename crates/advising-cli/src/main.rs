//! `advising` — command-line client for the advising-session booking API.
//!
//! # Usage
//!
//! ```
//! advising login studentA            # prints a token
//! export ADVISING_TOKEN=<token>
//! advising sessions                  # only inside the admission window
//! advising book 1
//! advising login --dean deanA
//! advising pending
//! advising past-deadline
//! ```

mod client;

use std::path::PathBuf;

use advising_core::{
  identity::Role,
  session::{Session, SessionId},
};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client::ApiClient;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "advising", about = "Client for the advising-session booking API")]
struct Args {
  /// Path to a TOML config file (url, token).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the server (default: http://localhost:3000).
  #[arg(long, env = "ADVISING_URL")]
  url: Option<String>,

  /// Token from a previous `login`.
  #[arg(long, env = "ADVISING_TOKEN", hide_env_values = true)]
  token: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Log in and print the issued token. Prompts for the password.
  Login {
    university_id: String,
    /// Log in as a dean instead of a student.
    #[arg(long)]
    dean:          bool,
  },
  /// List open sessions.
  Sessions,
  /// Book a session by id.
  Book { session_id: SessionId },
  /// List sessions nobody has booked.
  Pending,
  /// List sessions whose start time has passed.
  PastDeadline,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url:   String,
  #[serde(default)]
  token: String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .with_writer(std::io::stderr)
    .init();

  let args = Args::parse();

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let base_url = args
    .url
    .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
    .unwrap_or_else(|| "http://localhost:3000".to_string());
  let token = args
    .token
    .or_else(|| (!file_cfg.token.is_empty()).then(|| file_cfg.token.clone()));

  tracing::debug!(%base_url, "using server");
  let client = ApiClient::new(base_url, token)?;

  match args.command {
    Command::Login { university_id, dean } => {
      let role = if dean { Role::Dean } else { Role::Student };
      let password = read_password()?;
      let token = client.login(role, &university_id, &password).await?;
      println!("{token}");
    }
    Command::Sessions => print_sessions(&client.open_sessions().await?),
    Command::Book { session_id } => println!("{}", client.book(session_id).await?),
    Command::Pending => print_sessions(&client.pending().await?),
    Command::PastDeadline => print_sessions(&client.past_deadline().await?),
  }

  Ok(())
}

/// Read a password from stdin.
fn read_password() -> Result<String> {
  use std::io::{self, BufRead, Write};
  eprint!("Password: ");
  io::stderr().flush().ok();
  let mut line = String::new();
  io::stdin().lock().read_line(&mut line)?;
  Ok(line.trim_end_matches(['\n', '\r']).to_string())
}

fn print_sessions(sessions: &[Session]) {
  if sessions.is_empty() {
    println!("no sessions");
    return;
  }
  for session in sessions {
    let holder = session
      .assigned_student
      .as_ref()
      .map_or_else(|| "open".to_string(), |s| s.university_id.clone());
    println!("{}\t{}\t{holder}", session.id, session.start_time.to_rfc3339());
  }
}
