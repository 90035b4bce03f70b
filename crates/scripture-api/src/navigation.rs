//! Handlers for walking the corpus hierarchy.
//!
//! | Method | Path                               | Description                 |
//! |--------|------------------------------------|-----------------------------|
//! | GET    | `/volumes`                         | Every volume, by id         |
//! | GET    | `/volumes/{volume_id}/books`       | Books of one volume         |
//! | GET    | `/books/{book_id}/chapters`        | Chapters of one book        |
//! | GET    | `/chapters/{chapter_id}/verses`    | Verses of one chapter       |
//!
//! An unknown parent id yields an empty list, not a 404.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use scripture_core::{
  Engine,
  model::{Book, Chapter, Id, Verse, Volume},
  store::ScriptureStore,
};

use crate::error::ApiError;

/// `GET /volumes`
pub async fn volumes<S>(
  State(engine): State<Arc<Engine<S>>>,
) -> Result<Json<Vec<Volume>>, ApiError>
where
  S: ScriptureStore,
{
  Ok(Json(engine.list_volumes().await?))
}

/// `GET /volumes/{volume_id}/books`
pub async fn books<S>(
  State(engine): State<Arc<Engine<S>>>,
  Path(volume_id): Path<Id>,
) -> Result<Json<Vec<Book>>, ApiError>
where
  S: ScriptureStore,
{
  Ok(Json(engine.list_books(volume_id).await?))
}

/// `GET /books/{book_id}/chapters`
pub async fn chapters<S>(
  State(engine): State<Arc<Engine<S>>>,
  Path(book_id): Path<Id>,
) -> Result<Json<Vec<Chapter>>, ApiError>
where
  S: ScriptureStore,
{
  Ok(Json(engine.list_chapters(book_id).await?))
}

/// `GET /chapters/{chapter_id}/verses`
pub async fn verses<S>(
  State(engine): State<Arc<Engine<S>>>,
  Path(chapter_id): Path<Id>,
) -> Result<Json<Vec<Verse>>, ApiError>
where
  S: ScriptureStore,
{
  Ok(Json(engine.list_verses(chapter_id).await?))
}
