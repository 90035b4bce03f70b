//! scripture-server binary.
//!
//! Reads `config.toml` (or the path given with `--config`) layered under
//! `SCRIPTURES_*` environment variables, opens the corpus database
//! read-only, and serves the JSON API over HTTP.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use scripture_core::Engine;
use scripture_server::{AppState, ServerConfig, paths::resolve_database_path};
use scripture_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Scripture query server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

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
  let server_cfg = ServerConfig::load(&cli.config).context("failed to load configuration")?;

  // Locate and open the corpus.
  let cwd = std::env::current_dir().context("failed to read working directory")?;
  let database_path = resolve_database_path(&server_cfg.database_path, &cwd)?;
  tracing::info!(path = %database_path.display(), "opening scripture database");

  let store = SqliteStore::open(&database_path)
    .await
    .with_context(|| format!("failed to open database at {database_path:?}"))?;

  let engine = Engine::new(store, server_cfg.engine.clone())
    .context("invalid engine configuration")?;

  // Build application state.
  let state = AppState {
    engine: Arc::new(engine),
    config: Arc::new(server_cfg.clone()),
  };

  let app = scripture_server::router(state)?;
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
