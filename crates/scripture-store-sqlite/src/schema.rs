//! SQL layout of a scripture corpus database.
//!
//! Real corpora are built elsewhere and opened read-only; this DDL is the
//! column contract the row mappers depend on. It is executed only to create
//! in-memory and fixture corpora.

/// Tables (or views) that must exist for a file to be served.
pub const REQUIRED_TABLES: [&str; 5] = ["volumes", "books", "chapters", "verses", "scriptures"];

/// Full corpus DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS volumes (
    id                 INTEGER PRIMARY KEY,
    volume_title       TEXT NOT NULL,
    volume_long_title  TEXT NOT NULL,
    volume_subtitle    TEXT,
    volume_short_title TEXT NOT NULL,
    volume_lds_url     TEXT
);

CREATE TABLE IF NOT EXISTS books (
    id               INTEGER PRIMARY KEY,
    volume_id        INTEGER NOT NULL REFERENCES volumes(id),
    book_title       TEXT NOT NULL,
    book_long_title  TEXT NOT NULL,
    book_subtitle    TEXT,
    book_short_title TEXT NOT NULL,
    book_lds_url     TEXT
);

CREATE TABLE IF NOT EXISTS chapters (
    id             INTEGER PRIMARY KEY,
    book_id        INTEGER NOT NULL REFERENCES books(id),
    chapter_number INTEGER NOT NULL,
    UNIQUE (book_id, chapter_number)
);

CREATE TABLE IF NOT EXISTS verses (
    id             INTEGER PRIMARY KEY,
    chapter_id     INTEGER NOT NULL REFERENCES chapters(id),
    verse_number   INTEGER NOT NULL,
    scripture_text TEXT NOT NULL,
    UNIQUE (chapter_id, verse_number)
);

-- One row per verse with the full ancestor chain copied in.
-- Built once with the corpus; searched without joins.
CREATE TABLE IF NOT EXISTS scriptures (
    volume_id          INTEGER NOT NULL,
    book_id            INTEGER NOT NULL,
    chapter_id         INTEGER NOT NULL,
    verse_id           INTEGER PRIMARY KEY,
    volume_title       TEXT NOT NULL,
    book_title         TEXT NOT NULL,
    volume_long_title  TEXT NOT NULL,
    book_long_title    TEXT NOT NULL,
    volume_subtitle    TEXT,
    book_subtitle      TEXT,
    volume_short_title TEXT NOT NULL,
    book_short_title   TEXT NOT NULL,
    volume_lds_url     TEXT,
    book_lds_url       TEXT,
    chapter_number     INTEGER NOT NULL,
    verse_number       INTEGER NOT NULL,
    scripture_text     TEXT NOT NULL,
    verse_title        TEXT NOT NULL,
    verse_short_title  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS books_volume_idx       ON books(volume_id);
CREATE INDEX IF NOT EXISTS chapters_book_idx      ON chapters(book_id);
CREATE INDEX IF NOT EXISTS verses_chapter_idx     ON verses(chapter_id);
CREATE INDEX IF NOT EXISTS scriptures_volume_idx  ON scriptures(volume_id);
CREATE INDEX IF NOT EXISTS scriptures_ref_idx
    ON scriptures(book_title, chapter_number, verse_number);
";
