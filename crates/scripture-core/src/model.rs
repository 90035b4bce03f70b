//! The scripture corpus data model.
//!
//! The corpus is a strict tree (volume → book → chapter → verse) plus one
//! flattened row per verse, [`Scripture`], which carries the full ancestor
//! chain. Every identifier is a stable integer assigned when the corpus was
//! built; nothing here is ever created or mutated at runtime.
//!
//! Serialised field names follow the corpus column names so the JSON shape
//! matches the underlying tables.

use serde::{Deserialize, Serialize};

/// Integer primary key of a corpus row.
pub type Id = i64;

// ─── Hierarchy ───────────────────────────────────────────────────────────────

/// A top-level scriptural collection, e.g. the Old Testament.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Volume {
  pub id:          Id,
  #[serde(rename = "volume_title")]
  pub title:       String,
  #[serde(rename = "volume_long_title")]
  pub long_title:  String,
  #[serde(rename = "volume_subtitle")]
  pub subtitle:    Option<String>,
  #[serde(rename = "volume_short_title")]
  pub short_title: String,
  #[serde(rename = "volume_lds_url")]
  pub lds_url:     Option<String>,
}

/// A named subdivision of a [`Volume`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
  pub id:          Id,
  pub volume_id:   Id,
  #[serde(rename = "book_title")]
  pub title:       String,
  #[serde(rename = "book_long_title")]
  pub long_title:  String,
  #[serde(rename = "book_subtitle")]
  pub subtitle:    Option<String>,
  #[serde(rename = "book_short_title")]
  pub short_title: String,
  #[serde(rename = "book_lds_url")]
  pub lds_url:     Option<String>,
}

/// A numbered subdivision of a [`Book`]. `number` is unique within the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
  pub id:      Id,
  pub book_id: Id,
  #[serde(rename = "chapter_number")]
  pub number:  u32,
}

/// The atomic unit of scripture text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
  pub id:         Id,
  pub chapter_id: Id,
  #[serde(rename = "verse_number")]
  pub number:     u32,
  #[serde(rename = "scripture_text")]
  pub text:       String,
}

// ─── Flattened row ───────────────────────────────────────────────────────────

/// One verse together with every attribute of its chapter, book and volume.
///
/// This is the unit returned by search, reference lookup and random sampling.
/// `verse_title` is a display label such as `"Genesis 1:1"`;
/// `verse_short_title` is its abbreviated form, `"Gen. 1:1"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scripture {
  pub volume_id:          Id,
  pub book_id:            Id,
  pub chapter_id:         Id,
  pub verse_id:           Id,
  pub volume_title:       String,
  pub book_title:         String,
  pub volume_long_title:  String,
  pub book_long_title:    String,
  pub volume_subtitle:    Option<String>,
  pub book_subtitle:      Option<String>,
  pub volume_short_title: String,
  pub book_short_title:   String,
  pub volume_lds_url:     Option<String>,
  pub book_lds_url:       Option<String>,
  pub chapter_number:     u32,
  pub verse_number:       u32,
  pub scripture_text:     String,
  pub verse_title:        String,
  pub verse_short_title:  String,
}
