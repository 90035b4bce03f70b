//! The scripture query engine.
//!
//! [`Engine`] layers validation, category resolution and random sampling on
//! top of any [`ScriptureStore`]. It holds no mutable state: every call is one
//! logical read against the store.

use rand::Rng as _;
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  category::{Categories, Category, default_categories},
  model::{Book, Chapter, Id, Scripture, Verse, Volume},
  query::{Page, Reference, ScriptureFilter, VolumeCount, VolumeSet},
  store::ScriptureStore,
};

// ─── Configuration ───────────────────────────────────────────────────────────

/// Engine settings, usually embedded in the server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
  /// Largest accepted search page size.
  #[serde(default = "default_max_search_limit")]
  pub max_search_limit:     u32,
  /// Page size used when a caller does not ask for one.
  #[serde(default = "default_search_limit")]
  pub default_search_limit: u32,
  #[serde(default = "default_categories")]
  pub categories:           Vec<Category>,
}

fn default_max_search_limit() -> u32 { 100 }

fn default_search_limit() -> u32 { 50 }

impl Default for EngineConfig {
  fn default() -> Self {
    Self {
      max_search_limit:     default_max_search_limit(),
      default_search_limit: default_search_limit(),
      categories:           default_categories(),
    }
  }
}

// ─── Requests and responses ──────────────────────────────────────────────────

/// Input to [`Engine::search`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRequest {
  /// Substring to look for; empty matches every verse.
  pub text:    String,
  pub limit:   u32,
  pub offset:  u64,
  pub volumes: Option<VolumeSet>,
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
  pub scriptures: Vec<Scripture>,
  pub total:      u64,
  pub limit:      u32,
  pub offset:     u64,
}

// ─── Engine ──────────────────────────────────────────────────────────────────

pub struct Engine<S> {
  store:                S,
  categories:           Categories,
  max_search_limit:     u32,
  default_search_limit: u32,
}

impl<S: ScriptureStore> Engine<S> {
  /// Build an engine over `store`, validating `config`.
  pub fn new(store: S, config: EngineConfig) -> Result<Self> {
    if config.max_search_limit == 0 {
      return Err(Error::Validation("max_search_limit must be at least 1".into()));
    }
    if !(1..=config.max_search_limit).contains(&config.default_search_limit) {
      return Err(Error::Validation(format!(
        "default_search_limit must be between 1 and {}",
        config.max_search_limit
      )));
    }
    Ok(Self {
      store,
      categories: Categories::new(config.categories)?,
      max_search_limit: config.max_search_limit,
      default_search_limit: config.default_search_limit,
    })
  }

  pub fn store(&self) -> &S { &self.store }

  pub fn categories(&self) -> &Categories { &self.categories }

  pub fn max_search_limit(&self) -> u32 { self.max_search_limit }

  pub fn default_search_limit(&self) -> u32 { self.default_search_limit }

  // ── Hierarchy ─────────────────────────────────────────────────────────

  pub async fn list_volumes(&self) -> Result<Vec<Volume>> {
    self.store.list_volumes().await.map_err(Error::store)
  }

  pub async fn volume_count(&self) -> Result<usize> {
    Ok(self.list_volumes().await?.len())
  }

  pub async fn list_books(&self, volume_id: Id) -> Result<Vec<Book>> {
    self.store.list_books(volume_id).await.map_err(Error::store)
  }

  pub async fn list_chapters(&self, book_id: Id) -> Result<Vec<Chapter>> {
    self.store.list_chapters(book_id).await.map_err(Error::store)
  }

  pub async fn list_verses(&self, chapter_id: Id) -> Result<Vec<Verse>> {
    self.store.list_verses(chapter_id).await.map_err(Error::store)
  }

  // ── Search ────────────────────────────────────────────────────────────

  /// Substring search with pagination. `limit` outside
  /// `1..=max_search_limit` is rejected, never clamped.
  pub async fn search(&self, request: &SearchRequest) -> Result<SearchResults> {
    if !(1..=self.max_search_limit).contains(&request.limit) {
      return Err(Error::Validation(format!(
        "limit must be between 1 and {}, got {}",
        self.max_search_limit, request.limit
      )));
    }

    let filter = ScriptureFilter::containing(request.text.as_str())
      .in_volumes(request.volumes.clone());
    let page = Page { limit: request.limit, offset: request.offset };
    let found = self.store.search(&filter, page).await.map_err(Error::store)?;

    tracing::debug!(
      text = %request.text,
      total = found.total,
      returned = found.scriptures.len(),
      "search"
    );

    Ok(SearchResults {
      scriptures: found.scriptures,
      total:      found.total,
      limit:      request.limit,
      offset:     request.offset,
    })
  }

  /// Match counts per volume for `text`, zero-count volumes omitted.
  pub async fn grouped_counts(&self, text: &str) -> Result<Vec<VolumeCount>> {
    let filter = ScriptureFilter::containing(text);
    self.store.count_by_volume(&filter).await.map_err(Error::store)
  }

  // ── Reference ─────────────────────────────────────────────────────────

  /// All verses of a chapter, or the single verse when one is given. An
  /// unknown reference yields an empty result.
  pub async fn resolve_reference(&self, reference: &Reference) -> Result<Vec<Scripture>> {
    if reference.book_title.trim().is_empty() {
      return Err(Error::Validation("book title must not be empty".into()));
    }
    if reference.chapter == 0 {
      return Err(Error::Validation("chapter numbers start at 1".into()));
    }
    if reference.verse == Some(0) {
      return Err(Error::Validation("verse numbers start at 1".into()));
    }

    let filter = ScriptureFilter::reference(reference.clone());
    let rows = self.store.lookup(&filter).await.map_err(Error::store)?;
    tracing::debug!(
      book = %reference.book_title,
      chapter = reference.chapter,
      verse = ?reference.verse,
      found = rows.len(),
      "reference lookup"
    );
    Ok(rows)
  }

  // ── Random sampling ───────────────────────────────────────────────────

  /// A uniformly random verse. Without the extended canon the population is
  /// restricted to the base-canon categories.
  pub async fn sample(&self, include_extended_canon: bool) -> Result<Scripture> {
    let volumes = (!include_extended_canon).then(|| self.categories.base_canon());
    self.sample_from(volumes).await
  }

  /// A uniformly random verse from one named category.
  pub async fn sample_category(&self, name: &str) -> Result<Scripture> {
    let volumes = self.categories.resolve(name)?;
    self.sample_from(Some(volumes)).await
  }

  /// Count the population, draw an ordinal, fetch that one row.
  async fn sample_from(&self, volumes: Option<VolumeSet>) -> Result<Scripture> {
    let filter = ScriptureFilter::all().in_volumes(volumes);

    let population = self.store.count(&filter).await.map_err(Error::store)?;
    if population == 0 {
      tracing::warn!(volumes = ?filter.volumes, "sample population is empty");
      return Err(Error::EmptyPopulation);
    }

    let ordinal = draw(population);
    tracing::debug!(population, ordinal, "sample draw");

    self
      .store
      .nth(&filter, ordinal)
      .await
      .map_err(Error::store)?
      .ok_or(Error::OrdinalOutOfRange { ordinal, population })
  }
}

/// Uniform integer in `[0, population)`.
fn draw(population: u64) -> u64 { rand::thread_rng().gen_range(0..population) }
