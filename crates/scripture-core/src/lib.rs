//! Core types, the store trait and the query engine for the scripture
//! service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod category;
pub mod engine;
pub mod error;
pub mod model;
pub mod query;
pub mod store;

pub use engine::{Engine, EngineConfig, SearchRequest, SearchResults};
pub use error::{Error, Result};
