//! Warden server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens an
//! in-process SQLite store, and serves the JSON API over HTTP. Every
//! setting can be overridden with a `WARDEN_*` environment variable
//! (e.g. `WARDEN_PORT=8080`).

use std::{
  path::{Path, PathBuf},
  sync::Arc,
  time::Duration,
};

use anyhow::Context as _;
use clap::Parser;
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use warden_store_sqlite::SqliteStore;

#[derive(Parser)]
#[command(author, version, about = "Warden facility records server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Debug, Clone, Deserialize)]
struct ServerConfig {
  #[serde(default = "default_host")]
  host:       String,
  #[serde(default = "default_port")]
  port:       u16,
  #[serde(default = "default_store_path")]
  store_path: PathBuf,
}

fn default_host() -> String { "127.0.0.1".into() }

fn default_port() -> u16 { 7070 }

fn default_store_path() -> PathBuf { PathBuf::from("warden.db") }

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("WARDEN"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // Expand `~` in store path and open the store.
  let store_path = expand_tilde(&server_cfg.store_path);
  let store = open_store_with_retry(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let app = axum::Router::new()
    .nest("/api", warden_api::api_router(Arc::new(store)))
    .layer(TraceLayer::new_for_http());
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Open the store, retrying a bounded number of times before giving up.
///
/// Startup is the only place any retry happens; three attempts with a fixed
/// two-second delay, then the last error surfaces.
async fn open_store_with_retry(path: &Path) -> anyhow::Result<SqliteStore> {
  const ATTEMPTS: u32 = 3;
  const DELAY: Duration = Duration::from_secs(2);

  let mut last_err = None;
  for attempt in 1..=ATTEMPTS {
    match SqliteStore::open(path).await {
      Ok(store) => return Ok(store),
      Err(e) => {
        tracing::warn!("store open attempt {attempt}/{ATTEMPTS} failed: {e}");
        last_err = Some(e);
        if attempt < ATTEMPTS {
          tokio::time::sleep(DELAY).await;
        }
      }
    }
  }
  Err(
    last_err
      .map(anyhow::Error::from)
      .unwrap_or_else(|| anyhow::anyhow!("store open failed")),
  )
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test(start_paused = true)]
  async fn store_open_retry_gives_up_after_three_attempts() {
    // A directory is never a valid SQLite file, so every attempt fails.
    let started = tokio::time::Instant::now();
    let result = open_store_with_retry(Path::new("/")).await;
    assert!(result.is_err());
    // Two inter-attempt delays of 2 s each, auto-advanced by the paused
    // clock.
    assert_eq!(started.elapsed(), Duration::from_secs(4));
  }

  #[test]
  fn tilde_expansion() {
    // SAFETY: tests run single-threaded within this module.
    unsafe { std::env::set_var("HOME", "/home/guard") };
    assert_eq!(
      expand_tilde(Path::new("~/warden.db")),
      PathBuf::from("/home/guard/warden.db"),
    );
    assert_eq!(
      expand_tilde(Path::new("/var/lib/warden.db")),
      PathBuf::from("/var/lib/warden.db"),
    );
  }
}
