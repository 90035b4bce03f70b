//! [`SqliteStore`]: the SQLite implementation of [`ScriptureStore`].

use std::path::Path;

use rusqlite::{OpenFlags, OptionalExtension as _, types::Value};
use scripture_core::{
  model::{Book, Chapter, Id, Scripture, Verse, Volume},
  query::{Page, ScriptureFilter, SearchPage, VolumeCount},
  store::ScriptureStore,
};

use crate::{
  Error, Result,
  predicate::{Order, Predicate},
  rows::{self, BOOK_COLUMNS, CHAPTER_COLUMNS, VERSE_COLUMNS, VOLUME_COLUMNS},
  schema::{REQUIRED_TABLES, SCHEMA},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A scripture corpus backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open the corpus at `path` read-only and check that it has every table
  /// the store queries.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
      | OpenFlags::SQLITE_OPEN_NO_MUTEX
      | OpenFlags::SQLITE_OPEN_URI;
    let conn = tokio_rusqlite::Connection::open_with_flags(path, flags).await?;
    let store = Self { conn };
    store.verify_schema().await?;
    Ok(store)
  }

  /// Open an empty in-memory corpus, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    let store = Self { conn };
    store.verify_schema().await?;
    Ok(store)
  }

  async fn verify_schema(&self) -> Result<()> {
    let present: Vec<String> = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare("SELECT name FROM sqlite_master WHERE type IN ('table', 'view')")?;
        let names = stmt
          .query_map([], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(names)
      })
      .await?;

    for table in REQUIRED_TABLES {
      if !present.iter().any(|name| name == table) {
        return Err(Error::MissingTable(table.to_owned()));
      }
    }
    tracing::debug!(tables = present.len(), "corpus schema verified");
    Ok(())
  }

  /// Run `sql`, binding `parent` as `?1` when given, and map every row.
  async fn children<T, F>(&self, sql: String, parent: Option<Id>, map: F) -> Result<Vec<T>>
  where
    T: Send + 'static,
    F: Fn(&rusqlite::Row<'_>) -> rusqlite::Result<T> + Send + 'static,
  {
    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows: rusqlite::Result<Vec<T>> = match parent {
          Some(id) => stmt.query_map(rusqlite::params![id], &map)?.collect(),
          None => stmt.query_map([], &map)?.collect(),
        };
        Ok(rows?)
      })
      .await?;
    Ok(rows)
  }
}

fn sql_offset(n: u64) -> Value { Value::Integer(i64::try_from(n).unwrap_or(i64::MAX)) }

// ─── ScriptureStore impl ─────────────────────────────────────────────────────

impl ScriptureStore for SqliteStore {
  type Error = Error;

  // ── Hierarchy ─────────────────────────────────────────────────────────────

  async fn list_volumes(&self) -> Result<Vec<Volume>> {
    let sql = format!("SELECT {VOLUME_COLUMNS} FROM volumes ORDER BY id");
    self.children(sql, None, rows::volume).await
  }

  async fn list_books(&self, volume_id: Id) -> Result<Vec<Book>> {
    let sql = format!("SELECT {BOOK_COLUMNS} FROM books WHERE volume_id = ?1 ORDER BY id");
    self.children(sql, Some(volume_id), rows::book).await
  }

  async fn list_chapters(&self, book_id: Id) -> Result<Vec<Chapter>> {
    let sql = format!(
      "SELECT {CHAPTER_COLUMNS} FROM chapters WHERE book_id = ?1 ORDER BY chapter_number"
    );
    self.children(sql, Some(book_id), rows::chapter).await
  }

  async fn list_verses(&self, chapter_id: Id) -> Result<Vec<Verse>> {
    let sql = format!(
      "SELECT {VERSE_COLUMNS} FROM verses WHERE chapter_id = ?1 ORDER BY verse_number"
    );
    self.children(sql, Some(chapter_id), rows::verse).await
  }

  // ── Flattened rows ────────────────────────────────────────────────────────

  async fn search(&self, filter: &ScriptureFilter, page: Page) -> Result<SearchPage> {
    let predicate = Predicate::compile(filter);

    let (total, scriptures): (i64, Vec<Scripture>) = self
      .conn
      .call(move |conn| {
        let total: i64 =
          conn.query_row(&predicate.count_sql(), predicate.bind(&[]), |r| r.get(0))?;

        let window = [Value::Integer(page.limit.into()), sql_offset(page.offset)];
        let mut stmt = conn.prepare(&predicate.page_sql(Order::Canonical))?;
        let rows = stmt
          .query_map(predicate.bind(&window), rows::scripture)?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok((total, rows))
      })
      .await?;

    Ok(SearchPage { scriptures, total: total.unsigned_abs() })
  }

  async fn lookup(&self, filter: &ScriptureFilter) -> Result<Vec<Scripture>> {
    let predicate = Predicate::compile(filter);

    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&predicate.select_sql(Order::VerseId))?;
        let rows = stmt
          .query_map(predicate.bind(&[]), rows::scripture)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(rows)
  }

  async fn count_by_volume(&self, filter: &ScriptureFilter) -> Result<Vec<VolumeCount>> {
    let predicate = Predicate::compile(filter);

    let counts = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&predicate.grouped_sql())?;
        let counts = stmt
          .query_map(predicate.bind(&[]), rows::volume_count)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(counts)
      })
      .await?;

    Ok(counts)
  }

  async fn count(&self, filter: &ScriptureFilter) -> Result<u64> {
    let predicate = Predicate::compile(filter);

    let total: i64 = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(&predicate.count_sql(), predicate.bind(&[]), |r| r.get(0))?)
      })
      .await?;

    Ok(total.unsigned_abs())
  }

  async fn nth(&self, filter: &ScriptureFilter, ordinal: u64) -> Result<Option<Scripture>> {
    let predicate = Predicate::compile(filter);

    let row = self
      .conn
      .call(move |conn| {
        let window = [Value::Integer(1), sql_offset(ordinal)];
        Ok(
          conn
            .query_row(
              &predicate.page_sql(Order::VerseId),
              predicate.bind(&window),
              rows::scripture,
            )
            .optional()?,
        )
      })
      .await?;

    Ok(row)
  }
}
