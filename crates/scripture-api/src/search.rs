//! Handlers for `GET /search` and `GET /search/volumes`.
//!
//! `volume_id` and `category` may be combined; the search then covers only
//! volumes named by both.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
};
use scripture_core::{
  Engine, SearchRequest, SearchResults,
  model::Id,
  query::{VolumeCount, VolumeSet, restrict},
  store::ScriptureStore,
};
use serde::Deserialize;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
  /// Substring to look for; empty matches every verse.
  pub q:         String,
  /// Page size. Defaults to the engine's configured default.
  pub limit:     Option<u32>,
  #[serde(default)]
  pub offset:    u64,
  pub volume_id: Option<Id>,
  /// Name of a configured category, e.g. `bible`.
  pub category:  Option<String>,
}

/// `GET /search?q=...[&limit=...][&offset=...][&volume_id=...][&category=...]`
pub async fn handler<S>(
  State(engine): State<Arc<Engine<S>>>,
  Query(params): Query<SearchParams>,
) -> Result<Json<SearchResults>, ApiError>
where
  S: ScriptureStore,
{
  let by_category = params
    .category
    .as_deref()
    .map(|name| engine.categories().resolve(name))
    .transpose()?;

  let request = SearchRequest {
    text:    params.q,
    limit:   params.limit.unwrap_or(engine.default_search_limit()),
    offset:  params.offset,
    volumes: restrict(params.volume_id.map(VolumeSet::single), by_category),
  };

  Ok(Json(engine.search(&request).await?))
}

#[derive(Debug, Deserialize)]
pub struct CountParams {
  pub q: String,
}

/// `GET /search/volumes?q=...`
///
/// Match counts per volume; volumes without a match are omitted.
pub async fn volume_counts<S>(
  State(engine): State<Arc<Engine<S>>>,
  Query(params): Query<CountParams>,
) -> Result<Json<Vec<VolumeCount>>, ApiError>
where
  S: ScriptureStore,
{
  Ok(Json(engine.grouped_counts(&params.q).await?))
}
