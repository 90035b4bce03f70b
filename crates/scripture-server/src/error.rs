//! Startup errors for the server binary.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("scripture database not found; searched: {}", join(.searched))]
  DatabaseNotFound { searched: Vec<PathBuf> },

  #[error("invalid CORS origin {0:?}")]
  InvalidOrigin(String),

  #[error("configuration error: {0}")]
  Config(#[from] config::ConfigError),
}

fn join(paths: &[PathBuf]) -> String {
  paths
    .iter()
    .map(|p| p.display().to_string())
    .collect::<Vec<_>>()
    .join(", ")
}
