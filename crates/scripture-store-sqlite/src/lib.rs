//! SQLite backend for the scripture corpus.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. The corpus file is opened read-only.

mod predicate;
mod rows;
mod schema;
mod store;

pub mod error;
#[cfg(any(test, feature = "fixture"))]
pub mod fixture;

pub use error::{Error, Result};
pub use schema::{REQUIRED_TABLES, SCHEMA};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
