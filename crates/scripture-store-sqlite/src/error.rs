//! Error type for `scripture-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// The file opened fine but does not look like a scripture corpus.
  #[error("corpus is missing table {0:?}")]
  MissingTable(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
