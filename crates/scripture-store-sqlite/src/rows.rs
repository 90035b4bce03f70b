//! Column lists and row mappers between corpus tables and domain types.
//!
//! Statements always name their columns; the indices used by each mapper
//! follow the matching `*_COLUMNS` constant.

use rusqlite::Row;
use scripture_core::{
  model::{Book, Chapter, Scripture, Verse, Volume},
  query::VolumeCount,
};

// ─── Hierarchy ───────────────────────────────────────────────────────────────

pub const VOLUME_COLUMNS: &str =
  "id, volume_title, volume_long_title, volume_subtitle, volume_short_title, volume_lds_url";

pub fn volume(row: &Row<'_>) -> rusqlite::Result<Volume> {
  Ok(Volume {
    id:          row.get(0)?,
    title:       row.get(1)?,
    long_title:  row.get(2)?,
    subtitle:    row.get(3)?,
    short_title: row.get(4)?,
    lds_url:     row.get(5)?,
  })
}

pub const BOOK_COLUMNS: &str = "id, volume_id, book_title, book_long_title, book_subtitle, \
                                book_short_title, book_lds_url";

pub fn book(row: &Row<'_>) -> rusqlite::Result<Book> {
  Ok(Book {
    id:          row.get(0)?,
    volume_id:   row.get(1)?,
    title:       row.get(2)?,
    long_title:  row.get(3)?,
    subtitle:    row.get(4)?,
    short_title: row.get(5)?,
    lds_url:     row.get(6)?,
  })
}

pub const CHAPTER_COLUMNS: &str = "id, book_id, chapter_number";

pub fn chapter(row: &Row<'_>) -> rusqlite::Result<Chapter> {
  Ok(Chapter {
    id:      row.get(0)?,
    book_id: row.get(1)?,
    number:  row.get(2)?,
  })
}

pub const VERSE_COLUMNS: &str = "id, chapter_id, verse_number, scripture_text";

pub fn verse(row: &Row<'_>) -> rusqlite::Result<Verse> {
  Ok(Verse {
    id:         row.get(0)?,
    chapter_id: row.get(1)?,
    number:     row.get(2)?,
    text:       row.get(3)?,
  })
}

// ─── Flattened rows ──────────────────────────────────────────────────────────

pub const SCRIPTURE_COLUMNS: &str = "volume_id, book_id, chapter_id, verse_id, \
   volume_title, book_title, volume_long_title, book_long_title, \
   volume_subtitle, book_subtitle, volume_short_title, book_short_title, \
   volume_lds_url, book_lds_url, chapter_number, verse_number, \
   scripture_text, verse_title, verse_short_title";

pub fn scripture(row: &Row<'_>) -> rusqlite::Result<Scripture> {
  Ok(Scripture {
    volume_id:          row.get(0)?,
    book_id:            row.get(1)?,
    chapter_id:         row.get(2)?,
    verse_id:           row.get(3)?,
    volume_title:       row.get(4)?,
    book_title:         row.get(5)?,
    volume_long_title:  row.get(6)?,
    book_long_title:    row.get(7)?,
    volume_subtitle:    row.get(8)?,
    book_subtitle:      row.get(9)?,
    volume_short_title: row.get(10)?,
    book_short_title:   row.get(11)?,
    volume_lds_url:     row.get(12)?,
    book_lds_url:       row.get(13)?,
    chapter_number:     row.get(14)?,
    verse_number:       row.get(15)?,
    scripture_text:     row.get(16)?,
    verse_title:        row.get(17)?,
    verse_short_title:  row.get(18)?,
  })
}

/// Maps `volume_id, volume_title, COUNT(*)`.
pub fn volume_count(row: &Row<'_>) -> rusqlite::Result<VolumeCount> {
  let count: i64 = row.get(2)?;
  Ok(VolumeCount {
    volume_id: row.get(0)?,
    volume:    row.get(1)?,
    count:     count.unsigned_abs(),
  })
}
