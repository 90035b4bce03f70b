//! JSON REST API for the scripture service.
//!
//! Exposes an axum [`Router`] backed by a scripture [`Engine`] over any
//! [`ScriptureStore`]. TLS, CORS and transport concerns are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api/scriptures", scripture_api::api_router(engine.clone()))
//! ```

pub mod error;
pub mod navigation;
pub mod random;
pub mod reference;
pub mod search;

use std::sync::Arc;

use axum::{Router, routing::get};
use scripture_core::{Engine, store::ScriptureStore};

pub use error::ApiError;

/// Build a fully-materialised API router for `engine`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(engine: Arc<Engine<S>>) -> Router<()>
where
  S: ScriptureStore + 'static,
{
  Router::new()
    // Hierarchy
    .route("/volumes", get(navigation::volumes::<S>))
    .route("/volumes/{volume_id}/books", get(navigation::books::<S>))
    .route("/books/{book_id}/chapters", get(navigation::chapters::<S>))
    .route("/chapters/{chapter_id}/verses", get(navigation::verses::<S>))
    // Search
    .route("/search", get(search::handler::<S>))
    .route("/search/volumes", get(search::volume_counts::<S>))
    // Lookup and sampling
    .route("/reference/{book_title}/{chapter}", get(reference::handler::<S>))
    .route("/random", get(random::handler::<S>))
    .with_state(engine)
}
