//! A small on-disk corpus with the same layout as the real one.
//!
//! Volumes 1 to 5 follow the standard works. Genesis 1 has all 31 verses so
//! chapter-level assertions can be made against a known shape; other books
//! carry a handful of verses each, enough to exercise every category.

use std::path::Path;

use rusqlite::{Connection, params};
use scripture_core::model::Id;
use tempfile::TempDir;

use crate::{SqliteStore, schema::SCHEMA};

struct FixtureVolume {
  id:          Id,
  title:       &'static str,
  short_title: &'static str,
}

const VOLUMES: [FixtureVolume; 5] = [
  FixtureVolume { id: 1, title: "Old Testament", short_title: "OT" },
  FixtureVolume { id: 2, title: "New Testament", short_title: "NT" },
  FixtureVolume { id: 3, title: "Book of Mormon", short_title: "BoM" },
  FixtureVolume { id: 4, title: "Doctrine and Covenants", short_title: "D&C" },
  FixtureVolume { id: 5, title: "Pearl of Great Price", short_title: "PGP" },
];

struct FixtureBook {
  volume_id:   Id,
  title:       &'static str,
  short_title: &'static str,
  chapters:    &'static [(u32, &'static [&'static str])],
}

const GENESIS_1_OPENING: [&str; 5] = [
  "In the beginning God created the heaven and the earth.",
  "And the earth was without form, and void; and darkness was upon the face of the deep.",
  "And God said, Let there be light: and there was light.",
  "And God saw the light, that it was good: and God divided the light from the darkness.",
  "And God called the light Day, and the darkness he called Night.",
];

const BOOKS: [FixtureBook; 6] = [
  FixtureBook {
    volume_id:   1,
    title:       "Genesis",
    short_title: "Gen.",
    // Chapter 1 is generated from GENESIS_1_OPENING; see `book_chapters`.
    chapters:    &[(2, &[
      "Thus the heavens and the earth were finished, and all the host of them.",
      "And on the seventh day God ended his work which he had made.",
    ])],
  },
  FixtureBook {
    volume_id:   1,
    title:       "Psalms",
    short_title: "Ps.",
    chapters:    &[(119, &[
      "Blessed are the undefiled in the way, who walk in the law of the Lord.",
      "Thy word is a lamp unto my feet, and a light unto my path.",
    ])],
  },
  FixtureBook {
    volume_id:   2,
    title:       "John",
    short_title: "John",
    chapters:    &[
      (1, &[
        "In the beginning was the Word, and the Word was with God, and the Word was God.",
        "The same was in the beginning with God.",
        "All things were made by him.",
        "In him was life; and the life was the light of men.",
        "And the light shineth in darkness; and the darkness comprehended it not.",
      ]),
      (3, &[
        "There was a man of the Pharisees, named Nicodemus.",
        "For God so loved the world, that he gave his only begotten Son.",
      ]),
    ],
  },
  FixtureBook {
    volume_id:   3,
    title:       "1 Nephi",
    short_title: "1 Ne.",
    chapters:    &[(1, &[
      "I, Nephi, having been born of goodly parents.",
      "Yea, I make a record in the language of my father.",
      "And I know that the record which I make is true.",
    ])],
  },
  FixtureBook {
    volume_id:   4,
    title:       "Doctrine and Covenants",
    short_title: "D&C",
    chapters:    &[(93, &[
      "The glory of God is intelligence, or, in other words, LIGHT and truth.",
      "Light and truth forsake that evil one.",
    ])],
  },
  FixtureBook {
    volume_id:   5,
    title:       "Moses",
    short_title: "Moses",
    chapters:    &[(1, &[
      "The words of God, which he spake unto Moses.",
      "And he saw God face to face, and he talked with him.",
    ])],
  },
];

/// Number of verses in Genesis 1.
pub const GENESIS_1_VERSES: u32 = 31;

/// Total verse count of the full fixture.
pub const VERSE_COUNT: u64 = 49;

/// Verses in the base canon (volumes 1 and 2).
pub const BASE_CANON_VERSES: u64 = 42;

fn book_chapters(book: &FixtureBook) -> Vec<(u32, Vec<String>)> {
  let mut chapters: Vec<(u32, Vec<String>)> = Vec::new();
  if book.title == "Genesis" {
    let verses = (1..=GENESIS_1_VERSES)
      .map(|n| match GENESIS_1_OPENING.get(n as usize - 1) {
        Some(text) => (*text).to_owned(),
        None => "And it was so.".to_owned(),
      })
      .collect();
    chapters.push((1, verses));
  }
  for (number, verses) in book.chapters {
    chapters.push((*number, verses.iter().map(|v| (*v).to_owned()).collect()));
  }
  chapters
}

/// Denormalise the hierarchy into `scriptures`, as the corpus build does.
const FLATTEN: &str = "
INSERT INTO scriptures
SELECT v.id, b.id, c.id, ve.id,
       v.volume_title, b.book_title, v.volume_long_title, b.book_long_title,
       v.volume_subtitle, b.book_subtitle, v.volume_short_title, b.book_short_title,
       v.volume_lds_url, b.book_lds_url,
       c.chapter_number, ve.verse_number, ve.scripture_text,
       b.book_title || ' ' || c.chapter_number || ':' || ve.verse_number,
       b.book_short_title || ' ' || c.chapter_number || ':' || ve.verse_number
FROM verses ve
JOIN chapters c ON c.id = ve.chapter_id
JOIN books    b ON b.id = c.book_id
JOIN volumes  v ON v.id = b.volume_id
ORDER BY ve.id;
";

/// Write the fixture corpus to `path`, keeping only books whose volume is in
/// `volumes`. Every volume row is written regardless.
pub fn write_corpus_in(path: &Path, volumes: &[Id]) -> rusqlite::Result<()> {
  let mut conn = Connection::open(path)?;
  conn.execute_batch(SCHEMA)?;
  let tx = conn.transaction()?;

  for v in &VOLUMES {
    tx.execute(
      "INSERT INTO volumes (id, volume_title, volume_long_title, volume_subtitle,
                            volume_short_title, volume_lds_url)
       VALUES (?1, ?2, ?3, NULL, ?4, ?5)",
      params![
        v.id,
        v.title,
        format!("The {}", v.title),
        v.short_title,
        format!("/scriptures/{}", v.short_title.to_lowercase()),
      ],
    )?;
  }

  let mut book_id: Id = 0;
  let mut chapter_id: Id = 0;
  let mut verse_id: Id = 0;
  for book in BOOKS.iter().filter(|b| volumes.contains(&b.volume_id)) {
    book_id += 1;
    tx.execute(
      "INSERT INTO books (id, volume_id, book_title, book_long_title, book_subtitle,
                          book_short_title, book_lds_url)
       VALUES (?1, ?2, ?3, ?4, NULL, ?5, NULL)",
      params![
        book_id,
        book.volume_id,
        book.title,
        format!("The Book of {}", book.title),
        book.short_title,
      ],
    )?;

    for (number, verses) in book_chapters(book) {
      chapter_id += 1;
      tx.execute(
        "INSERT INTO chapters (id, book_id, chapter_number) VALUES (?1, ?2, ?3)",
        params![chapter_id, book_id, number],
      )?;
      for (i, text) in verses.iter().enumerate() {
        verse_id += 1;
        tx.execute(
          "INSERT INTO verses (id, chapter_id, verse_number, scripture_text)
           VALUES (?1, ?2, ?3, ?4)",
          params![verse_id, chapter_id, i as i64 + 1, text],
        )?;
      }
    }
  }

  tx.execute_batch(FLATTEN)?;
  tx.commit()
}

/// Write the full fixture corpus to `path`.
pub fn write_corpus(path: &Path) -> rusqlite::Result<()> {
  write_corpus_in(path, &[1, 2, 3, 4, 5])
}

/// Write the full corpus into a fresh temporary directory and open it.
///
/// The directory is deleted when the returned [`TempDir`] is dropped.
pub async fn open() -> (TempDir, SqliteStore) { open_in(&[1, 2, 3, 4, 5]).await }

/// Like [`open`], restricted to books of `volumes`.
pub async fn open_in(volumes: &[Id]) -> (TempDir, SqliteStore) {
  let dir = TempDir::new().expect("temp dir");
  let path = dir.path().join("scriptures.db");
  write_corpus_in(&path, volumes).expect("write fixture corpus");
  let store = SqliteStore::open(&path).await.expect("open fixture corpus");
  (dir, store)
}
