//! The `ScriptureStore` trait.
//!
//! The trait is implemented by corpus backends (e.g. `scripture-store-sqlite`).
//! The [`Engine`](crate::engine::Engine) and everything above it depend on
//! this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  model::{Book, Chapter, Id, Scripture, Verse, Volume},
  query::{Page, ScriptureFilter, SearchPage, VolumeCount},
};

/// Read-only access to an immutable scripture corpus.
///
/// No method mutates the corpus, so implementations may serve any number of
/// calls concurrently. Unknown ids are not errors: filtering by a key that
/// does not exist simply yields no rows.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait ScriptureStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Hierarchy ─────────────────────────────────────────────────────────

  /// All volumes, ordered by id.
  fn list_volumes(
    &self,
  ) -> impl Future<Output = Result<Vec<Volume>, Self::Error>> + Send + '_;

  /// Books of one volume, ordered by id.
  fn list_books(
    &self,
    volume_id: Id,
  ) -> impl Future<Output = Result<Vec<Book>, Self::Error>> + Send + '_;

  /// Chapters of one book, ordered by chapter number.
  fn list_chapters(
    &self,
    book_id: Id,
  ) -> impl Future<Output = Result<Vec<Chapter>, Self::Error>> + Send + '_;

  /// Verses of one chapter, ordered by verse number.
  fn list_verses(
    &self,
    chapter_id: Id,
  ) -> impl Future<Output = Result<Vec<Verse>, Self::Error>> + Send + '_;

  // ── Flattened rows ────────────────────────────────────────────────────

  /// Count the rows matching `filter` and fetch one page of them, ordered by
  /// volume, book, chapter and verse id. Both halves use the same predicate.
  fn search<'a>(
    &'a self,
    filter: &'a ScriptureFilter,
    page: Page,
  ) -> impl Future<Output = Result<SearchPage, Self::Error>> + Send + 'a;

  /// Every row matching `filter`, ordered by verse id.
  fn lookup<'a>(
    &'a self,
    filter: &'a ScriptureFilter,
  ) -> impl Future<Output = Result<Vec<Scripture>, Self::Error>> + Send + 'a;

  /// Matching rows grouped by volume, ordered by volume id. Volumes without a
  /// match are omitted.
  fn count_by_volume<'a>(
    &'a self,
    filter: &'a ScriptureFilter,
  ) -> impl Future<Output = Result<Vec<VolumeCount>, Self::Error>> + Send + 'a;

  /// Number of rows matching `filter`.
  fn count<'a>(
    &'a self,
    filter: &'a ScriptureFilter,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + 'a;

  /// The row at zero-based position `ordinal` among the rows matching
  /// `filter` ordered by verse id, or `None` past the end.
  fn nth<'a>(
    &'a self,
    filter: &'a ScriptureFilter,
    ordinal: u64,
  ) -> impl Future<Output = Result<Option<Scripture>, Self::Error>> + Send + 'a;
}
