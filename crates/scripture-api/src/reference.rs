//! Handler for `GET /reference/{book_title}/{chapter}[?verse=...]`.
//!
//! The book title must match exactly, e.g. `1 Nephi` (percent-encoded in
//! the path). An unknown reference is an empty list.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
};
use scripture_core::{Engine, model::Scripture, query::Reference, store::ScriptureStore};
use serde::Deserialize;

use crate::error::ApiError;

#[derive(Debug, Deserialize, Default)]
pub struct ReferenceParams {
  pub verse: Option<u32>,
}

pub async fn handler<S>(
  State(engine): State<Arc<Engine<S>>>,
  Path((book_title, chapter)): Path<(String, u32)>,
  Query(params): Query<ReferenceParams>,
) -> Result<Json<Vec<Scripture>>, ApiError>
where
  S: ScriptureStore,
{
  let reference = Reference { book_title, chapter, verse: params.verse };
  Ok(Json(engine.resolve_reference(&reference).await?))
}
