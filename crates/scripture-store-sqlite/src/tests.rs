//! Integration tests for `SqliteStore` against on-disk fixture corpora.

use std::collections::HashMap;

use scripture_core::{
  Engine, EngineConfig, Error as CoreError, SearchRequest,
  model::Id,
  query::{Page, Reference, ScriptureFilter, VolumeSet},
  store::ScriptureStore,
};

use crate::{
  Error, SqliteStore,
  fixture::{self, BASE_CANON_VERSES, GENESIS_1_VERSES, VERSE_COUNT},
};

fn page(limit: u32, offset: u64) -> Page { Page { limit, offset } }

fn genesis(chapter: u32, verse: Option<u32>) -> Reference {
  Reference { book_title: "Genesis".into(), chapter, verse }
}

// ─── Opening ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn open_missing_file_fails() {
  let dir = tempfile::TempDir::new().unwrap();
  let result = SqliteStore::open(dir.path().join("absent.db")).await;
  assert!(matches!(result, Err(Error::Database(_))));
}

#[tokio::test]
async fn open_rejects_files_without_corpus_tables() {
  let dir = tempfile::TempDir::new().unwrap();
  let path = dir.path().join("partial.db");
  rusqlite::Connection::open(&path)
    .unwrap()
    .execute_batch("CREATE TABLE volumes (id INTEGER PRIMARY KEY);")
    .unwrap();

  let err = SqliteStore::open(&path).await.err().unwrap();
  assert!(matches!(err, Error::MissingTable(ref t) if t == "books"), "{err}");
}

#[tokio::test]
async fn in_memory_store_is_empty() {
  let s = SqliteStore::open_in_memory().await.unwrap();
  assert!(s.list_volumes().await.unwrap().is_empty());
  assert_eq!(s.count(&ScriptureFilter::all()).await.unwrap(), 0);
}

// ─── Hierarchy ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn volumes_are_ordered_by_id() {
  let (_dir, s) = fixture::open().await;
  let volumes = s.list_volumes().await.unwrap();
  assert_eq!(volumes.iter().map(|v| v.id).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
  assert_eq!(volumes[0].title, "Old Testament");
  assert_eq!(volumes[0].subtitle, None);
}

#[tokio::test]
async fn books_belong_to_their_volume() {
  let (_dir, s) = fixture::open().await;
  let books = s.list_books(1).await.unwrap();
  let titles: Vec<_> = books.iter().map(|b| b.title.as_str()).collect();
  assert_eq!(titles, vec!["Genesis", "Psalms"]);
  assert!(books.iter().all(|b| b.volume_id == 1));
  assert!(books.windows(2).all(|w| w[0].id < w[1].id));
}

#[tokio::test]
async fn unknown_parents_yield_no_children() {
  let (_dir, s) = fixture::open().await;
  assert!(s.list_books(999_999).await.unwrap().is_empty());
  assert!(s.list_chapters(999_999).await.unwrap().is_empty());
  assert!(s.list_verses(999_999).await.unwrap().is_empty());
}

#[tokio::test]
async fn genesis_one_has_thirty_one_ordered_verses() {
  let (_dir, s) = fixture::open().await;
  let genesis = s.list_books(1).await.unwrap().remove(0);
  assert_eq!(genesis.title, "Genesis");

  let chapters = s.list_chapters(genesis.id).await.unwrap();
  let chapter_one = chapters.iter().find(|c| c.number == 1).unwrap();
  assert!(chapters.windows(2).all(|w| w[0].number < w[1].number));

  let verses = s.list_verses(chapter_one.id).await.unwrap();
  assert_eq!(verses.len(), GENESIS_1_VERSES as usize);
  assert_eq!(
    verses.iter().map(|v| v.number).collect::<Vec<_>>(),
    (1..=GENESIS_1_VERSES).collect::<Vec<_>>()
  );
  assert!(verses[0].text.starts_with("In the beginning"));
}

// ─── Search ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn empty_query_counts_every_row() {
  let (_dir, s) = fixture::open().await;
  let found = s.search(&ScriptureFilter::containing(""), page(10, 0)).await.unwrap();
  assert_eq!(found.total, VERSE_COUNT);
  assert_eq!(found.scriptures.len(), 10);
}

#[tokio::test]
async fn search_is_case_insensitive() {
  let (_dir, s) = fixture::open().await;
  let lower = s.search(&ScriptureFilter::containing("light"), page(50, 0)).await.unwrap();
  let upper = s.search(&ScriptureFilter::containing("LIGHT"), page(50, 0)).await.unwrap();
  assert_eq!(lower.total, 8);
  assert_eq!(lower, upper);
}

#[tokio::test]
async fn search_matches_verse_titles() {
  let (_dir, s) = fixture::open().await;
  let found = s.search(&ScriptureFilter::containing("Psalms 119"), page(50, 0)).await.unwrap();
  assert_eq!(found.total, 2);
  assert!(found.scriptures.iter().all(|r| r.book_title == "Psalms"));
}

#[tokio::test]
async fn like_wildcards_are_literal() {
  let (_dir, s) = fixture::open().await;
  for q in ["%", "_", "light%", "\\"] {
    let found = s.search(&ScriptureFilter::containing(q), page(50, 0)).await.unwrap();
    assert_eq!(found.total, 0, "query {q:?}");
  }
}

#[tokio::test]
async fn pages_are_canonically_ordered_and_disjoint() {
  let (_dir, s) = fixture::open().await;
  let filter = ScriptureFilter::containing("God");
  let total = s.count(&filter).await.unwrap();

  let mut rows = Vec::new();
  let mut offset = 0;
  loop {
    let found = s.search(&filter, page(3, offset)).await.unwrap();
    assert_eq!(found.total, total);
    if found.scriptures.is_empty() {
      break;
    }
    rows.extend(found.scriptures);
    offset += 3;
  }

  assert_eq!(rows.len() as u64, total);
  let keys: Vec<_> = rows
    .iter()
    .map(|r| (r.volume_id, r.book_id, r.chapter_id, r.verse_id))
    .collect();
  assert!(keys.windows(2).all(|w| w[0] < w[1]), "{keys:?}");
}

#[tokio::test]
async fn requesting_total_rows_returns_total_rows() {
  let (_dir, s) = fixture::open().await;
  let filter = ScriptureFilter::containing("the").in_volumes(Some(VolumeSet::new([1, 2])));
  let total = s.search(&filter, page(1, 0)).await.unwrap().total;
  let all = s.search(&filter, page(total as u32, 0)).await.unwrap();
  assert_eq!(all.scriptures.len() as u64, total);
}

#[tokio::test]
async fn offset_past_the_end_is_an_empty_page() {
  let (_dir, s) = fixture::open().await;
  let found = s.search(&ScriptureFilter::all(), page(10, VERSE_COUNT + 5)).await.unwrap();
  assert_eq!(found.total, VERSE_COUNT);
  assert!(found.scriptures.is_empty());
}

#[tokio::test]
async fn volume_restriction_filters_rows() {
  let (_dir, s) = fixture::open().await;
  let filter = ScriptureFilter::containing("light").in_volumes(Some(VolumeSet::single(4)));
  let found = s.search(&filter, page(50, 0)).await.unwrap();
  assert_eq!(found.total, 2);
  assert!(found.scriptures.iter().all(|r| r.volume_id == 4));

  let nothing = ScriptureFilter::all().in_volumes(Some(VolumeSet::default()));
  assert_eq!(s.search(&nothing, page(50, 0)).await.unwrap().total, 0);
}

#[tokio::test]
async fn grouped_counts_omit_empty_volumes_and_sum_to_total() {
  let (_dir, s) = fixture::open().await;
  let filter = ScriptureFilter::containing("light");
  let counts = s.count_by_volume(&filter).await.unwrap();

  assert_eq!(
    counts.iter().map(|c| (c.volume_id, c.volume.as_str(), c.count)).collect::<Vec<_>>(),
    vec![
      (1, "Old Testament", 4),
      (2, "New Testament", 2),
      (4, "Doctrine and Covenants", 2),
    ]
  );
  let total = s.search(&filter, page(1, 0)).await.unwrap().total;
  assert_eq!(counts.iter().map(|c| c.count).sum::<u64>(), total);
}

// ─── Reference lookup ────────────────────────────────────────────────────────

#[tokio::test]
async fn every_genesis_verse_round_trips_by_reference() {
  let (_dir, s) = fixture::open().await;
  let chapter = s.list_chapters(1).await.unwrap().remove(0);
  for verse in s.list_verses(chapter.id).await.unwrap() {
    let rows = s
      .lookup(&ScriptureFilter::reference(genesis(1, Some(verse.number))))
      .await
      .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].scripture_text, verse.text);
    assert_eq!(rows[0].verse_title, format!("Genesis 1:{}", verse.number));
    assert_eq!(rows[0].verse_short_title, format!("Gen. 1:{}", verse.number));
  }
}

#[tokio::test]
async fn chapter_reference_returns_whole_chapter_in_order() {
  let (_dir, s) = fixture::open().await;
  let rows = s.lookup(&ScriptureFilter::reference(genesis(1, None))).await.unwrap();
  assert_eq!(rows.len(), GENESIS_1_VERSES as usize);
  assert!(rows.windows(2).all(|w| w[0].verse_id < w[1].verse_id));
}

#[tokio::test]
async fn unknown_reference_is_empty() {
  let (_dir, s) = fixture::open().await;
  for reference in [
    genesis(50, None),
    genesis(1, Some(32)),
    Reference { book_title: "genesis".into(), chapter: 1, verse: None },
  ] {
    let rows = s.lookup(&ScriptureFilter::reference(reference)).await.unwrap();
    assert!(rows.is_empty());
  }
}

// ─── Ordinal access ──────────────────────────────────────────────────────────

#[tokio::test]
async fn nth_walks_the_filtered_population_by_verse_id() {
  let (_dir, s) = fixture::open().await;
  let filter = ScriptureFilter::all().in_volumes(Some(VolumeSet::single(2)));
  let first = s.nth(&filter, 0).await.unwrap().unwrap();
  assert_eq!(first.book_title, "John");
  assert_eq!((first.chapter_number, first.verse_number), (1, 1));

  let population = s.count(&filter).await.unwrap();
  let last = s.nth(&filter, population - 1).await.unwrap().unwrap();
  assert_eq!((last.chapter_number, last.verse_number), (3, 2));
  assert!(s.nth(&filter, population).await.unwrap().is_none());
}

// ─── Engine over SQLite ──────────────────────────────────────────────────────

#[tokio::test]
async fn engine_search_totals_match_grouped_counts() {
  let (_dir, s) = fixture::open().await;
  let engine = Engine::new(s, EngineConfig::default()).unwrap();
  for q in ["", "God", "light", "truth", "no such words"] {
    let request = SearchRequest { text: q.into(), limit: 5, offset: 0, volumes: None };
    let total = engine.search(&request).await.unwrap().total;
    let grouped: u64 = engine.grouped_counts(q).await.unwrap().iter().map(|c| c.count).sum();
    assert_eq!(grouped, total, "query {q:?}");
  }
}

#[tokio::test]
async fn base_canon_sampling_is_uniform_and_restricted() {
  let (_dir, s) = fixture::open().await;
  let engine = Engine::new(s, EngineConfig::default()).unwrap();

  let draws = 10_000u32;
  let mut hits: HashMap<Id, u32> = HashMap::new();
  for _ in 0..draws {
    let verse = engine.sample(false).await.unwrap();
    assert!(matches!(verse.volume_id, 1 | 2), "sampled volume {}", verse.volume_id);
    *hits.entry(verse.verse_id).or_default() += 1;
  }

  // Every cell gets ~238 expected hits; a verse never drawn would be a
  // bias, not bad luck.
  assert_eq!(hits.len() as u64, BASE_CANON_VERSES);

  let cells = BASE_CANON_VERSES as f64;
  let expected = f64::from(draws) / cells;
  let chi2: f64 = hits
    .values()
    .map(|&o| (f64::from(o) - expected).powi(2) / expected)
    .sum();
  // 41 degrees of freedom: the 0.001 critical value is about 74.7.
  assert!(chi2 < 100.0, "chi-square {chi2}");
}

#[tokio::test]
async fn sampling_an_empty_population_fails() {
  let (_dir, s) = fixture::open_in(&[3, 4, 5]).await;
  let engine = Engine::new(s, EngineConfig::default()).unwrap();
  assert!(matches!(engine.sample(false).await, Err(CoreError::EmptyPopulation)));
  assert!(engine.sample(true).await.is_ok());

  let empty = Engine::new(SqliteStore::open_in_memory().await.unwrap(), EngineConfig::default())
    .unwrap();
  assert!(matches!(empty.sample(true).await, Err(CoreError::EmptyPopulation)));
}
