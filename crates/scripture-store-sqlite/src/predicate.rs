//! Compiles a [`ScriptureFilter`] into one parameterised `WHERE` clause.
//!
//! Every statement that touches the `scriptures` table is rendered from a
//! single [`Predicate`], so a count and the fetch it accompanies always see
//! the same rows. User input only ever travels as bound parameters.

use rusqlite::{ParamsFromIter, types::Value};
use scripture_core::query::ScriptureFilter;

use crate::rows::SCRIPTURE_COLUMNS;

/// Row order of a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
  /// Volume, book, chapter, verse: the order search pages are cut from.
  Canonical,
  /// Verse id alone: reference lookups and ordinal sampling.
  VerseId,
}

impl Order {
  fn sql(self) -> &'static str {
    match self {
      Order::Canonical => "ORDER BY volume_id, book_id, chapter_id, verse_id",
      Order::VerseId => "ORDER BY verse_id",
    }
  }
}

type Bound<'a> =
  ParamsFromIter<std::iter::Chain<std::slice::Iter<'a, Value>, std::slice::Iter<'a, Value>>>;

/// A compiled filter: the `WHERE` clause text and its positional parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
  clause: String,
  params: Vec<Value>,
}

impl Predicate {
  pub fn compile(filter: &ScriptureFilter) -> Self {
    let mut conds: Vec<String> = vec![];
    let mut params: Vec<Value> = vec![];

    if let Some(text) = filter.text() {
      let pattern = format!("%{}%", escape_like(text));
      conds.push(
        "(scripture_text LIKE ? ESCAPE '\\' OR verse_title LIKE ? ESCAPE '\\')".to_owned(),
      );
      params.push(Value::Text(pattern.clone()));
      params.push(Value::Text(pattern));
    }

    if let Some(volumes) = &filter.volumes {
      if volumes.is_empty() {
        conds.push("0".to_owned());
      } else {
        let slots = vec!["?"; volumes.len()].join(", ");
        conds.push(format!("volume_id IN ({slots})"));
        params.extend(volumes.iter().map(Value::Integer));
      }
    }

    if let Some(reference) = &filter.reference {
      conds.push("book_title = ?".to_owned());
      params.push(Value::Text(reference.book_title.clone()));
      conds.push("chapter_number = ?".to_owned());
      params.push(Value::Integer(reference.chapter.into()));
      if let Some(verse) = reference.verse {
        conds.push("verse_number = ?".to_owned());
        params.push(Value::Integer(verse.into()));
      }
    }

    let clause = if conds.is_empty() {
      String::new()
    } else {
      format!("WHERE {}", conds.join(" AND "))
    };

    Self { clause, params }
  }

  pub fn count_sql(&self) -> String {
    format!("SELECT COUNT(*) FROM scriptures {}", self.clause)
  }

  /// Fetch with a trailing `LIMIT ? OFFSET ?`; bind those two with
  /// [`Predicate::bind`].
  pub fn page_sql(&self, order: Order) -> String {
    format!(
      "SELECT {SCRIPTURE_COLUMNS} FROM scriptures {} {} LIMIT ? OFFSET ?",
      self.clause,
      order.sql()
    )
  }

  pub fn select_sql(&self, order: Order) -> String {
    format!("SELECT {SCRIPTURE_COLUMNS} FROM scriptures {} {}", self.clause, order.sql())
  }

  pub fn grouped_sql(&self) -> String {
    format!(
      "SELECT volume_id, volume_title, COUNT(*) FROM scriptures {}
       GROUP BY volume_id, volume_title
       ORDER BY volume_id",
      self.clause
    )
  }

  /// The filter's parameters followed by `tail` (e.g. limit and offset).
  pub fn bind<'a>(&'a self, tail: &'a [Value]) -> Bound<'a> {
    rusqlite::params_from_iter(self.params.iter().chain(tail.iter()))
  }
}

/// Escape `LIKE` metacharacters so `text` matches literally under
/// `ESCAPE '\'`.
fn escape_like(text: &str) -> String {
  let mut out = String::with_capacity(text.len());
  for c in text.chars() {
    if matches!(c, '\\' | '%' | '_') {
      out.push('\\');
    }
    out.push(c);
  }
  out
}
