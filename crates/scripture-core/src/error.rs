//! Error types for `scripture-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Malformed input, e.g. a search limit outside the configured range.
  #[error("invalid request: {0}")]
  Validation(String),

  /// Random sampling was asked to draw from a population with no members.
  #[error("no scriptures found to sample from")]
  EmptyPopulation,

  /// The corpus store could not answer the query.
  #[error("store unavailable: {0}")]
  StoreUnavailable(#[source] Box<dyn std::error::Error + Send + Sync>),

  /// The sampler drew an ordinal the store could not produce.
  #[error("ordinal {ordinal} out of range for a population of {population}")]
  OrdinalOutOfRange { ordinal: u64, population: u64 },
}

impl Error {
  pub(crate) fn store<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::StoreUnavailable(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
