//! HTTP server for the scripture query service.
//!
//! Wraps the [`scripture_api`] router with service-level endpoints, CORS and
//! request tracing, and owns configuration loading.

pub mod error;
pub mod paths;

pub use error::Error;

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::{
  Json, Router,
  extract::State,
  http::{HeaderValue, Method, StatusCode},
  routing::get,
};
use scripture_core::{Engine, EngineConfig, store::ScriptureStore};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::{
  cors::{AllowOrigin, Any, CorsLayer},
  trace::TraceLayer,
};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Prefix of environment variables that override the config file, e.g.
/// `SCRIPTURES_PORT=9000` or `SCRIPTURES_ENGINE__MAX_SEARCH_LIMIT=200`.
pub const ENV_PREFIX: &str = "SCRIPTURES";

/// Runtime server configuration, deserialised from `config.toml` and the
/// environment. Every field has a default.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
  pub host:          String,
  pub port:          u16,
  pub database_path: PathBuf,
  pub cors_origins:  Vec<String>,
  pub engine:        EngineConfig,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:          "0.0.0.0".to_owned(),
      port:          8000,
      database_path: PathBuf::from("lds-scriptures-sqlite.db"),
      cors_origins:  [
        "http://localhost:5173",
        "http://127.0.0.1:5173",
        "http://localhost:3000",
        "http://127.0.0.1:3000",
      ]
      .map(str::to_owned)
      .to_vec(),
      engine:        EngineConfig::default(),
    }
  }
}

impl ServerConfig {
  /// Layer the optional TOML file at `path` under `SCRIPTURES_*` variables.
  pub fn load(path: &Path) -> Result<Self, Error> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(
        config::Environment::with_prefix(ENV_PREFIX)
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true)
          .list_separator(",")
          .with_list_parse_key("cors_origins"),
      )
      .build()?;
    Ok(settings.try_deserialize()?)
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through the service-level handlers.
pub struct AppState<S> {
  pub engine: Arc<Engine<S>>,
  pub config: Arc<ServerConfig>,
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self { engine: self.engine.clone(), config: self.config.clone() }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router: `/`, `/health` and the scripture API
/// under `/api/scriptures`.
pub fn router<S>(state: AppState<S>) -> Result<Router, Error>
where
  S: ScriptureStore + 'static,
{
  let cors = cors_layer(&state.config.cors_origins)?;
  let api = scripture_api::api_router(state.engine.clone());

  Ok(
    Router::new()
      .route("/", get(root))
      .route("/health", get(health::<S>))
      .with_state(state)
      .nest("/api/scriptures", api)
      .layer(cors)
      .layer(TraceLayer::new_for_http()),
  )
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer, Error> {
  let origins = origins
    .iter()
    .map(|o| HeaderValue::from_str(o).map_err(|_| Error::InvalidOrigin(o.clone())))
    .collect::<Result<Vec<_>, _>>()?;
  Ok(
    CorsLayer::new()
      .allow_origin(AllowOrigin::list(origins))
      .allow_methods([Method::GET])
      .allow_headers(Any),
  )
}

// ─── Service handlers ────────────────────────────────────────────────────────

async fn root() -> Json<Value> {
  Json(json!({
    "message": "Scripture Query API",
    "version": env!("CARGO_PKG_VERSION"),
  }))
}

async fn health<S>(State(state): State<AppState<S>>) -> (StatusCode, Json<Value>)
where
  S: ScriptureStore,
{
  match state.engine.volume_count().await {
    Ok(volumes_count) => (
      StatusCode::OK,
      Json(json!({
        "status": "healthy",
        "database": "connected",
        "volumes_count": volumes_count,
      })),
    ),
    Err(e) => {
      tracing::error!(error = %e, "health check failed");
      (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(json!({
          "status": "unhealthy",
          "database": "error",
          "error": e.to_string(),
        })),
      )
    }
  }
}
