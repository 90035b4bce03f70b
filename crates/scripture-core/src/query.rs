//! Store-agnostic query types.
//!
//! A [`ScriptureFilter`] describes *which* flattened rows a request covers. A
//! store compiles it exactly once per call and applies the compiled form to
//! both its count and its fetch, so a reported total can never disagree with
//! the rows behind it.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::model::{Id, Scripture};

// ─── Volume restriction ──────────────────────────────────────────────────────

/// A set of volume ids a query is restricted to.
///
/// An empty set is a legitimate restriction that matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VolumeSet(BTreeSet<Id>);

impl VolumeSet {
  pub fn new(ids: impl IntoIterator<Item = Id>) -> Self {
    Self(ids.into_iter().collect())
  }

  pub fn single(id: Id) -> Self { Self::new([id]) }

  pub fn contains(&self, id: Id) -> bool { self.0.contains(&id) }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  pub fn len(&self) -> usize { self.0.len() }

  /// Ids in ascending order.
  pub fn iter(&self) -> impl Iterator<Item = Id> + '_ { self.0.iter().copied() }

  pub fn intersection(&self, other: &VolumeSet) -> VolumeSet {
    Self(self.0.intersection(&other.0).copied().collect())
  }

  pub fn union(&self, other: &VolumeSet) -> VolumeSet {
    Self(self.0.union(&other.0).copied().collect())
  }
}

impl FromIterator<Id> for VolumeSet {
  fn from_iter<I: IntoIterator<Item = Id>>(iter: I) -> Self { Self::new(iter) }
}

/// Intersect two optional restrictions, where `None` means "every volume".
pub fn restrict(a: Option<VolumeSet>, b: Option<VolumeSet>) -> Option<VolumeSet> {
  match (a, b) {
    (Some(a), Some(b)) => Some(a.intersection(&b)),
    (a, None) => a,
    (None, b) => b,
  }
}

// ─── Reference ───────────────────────────────────────────────────────────────

/// A canonical reference: book title and chapter, optionally one verse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
  pub book_title: String,
  pub chapter:    u32,
  pub verse:      Option<u32>,
}

// ─── Filter ──────────────────────────────────────────────────────────────────

/// The predicate shared by count and fetch operations.
///
/// All present parts are combined with logical AND. The default filter
/// matches every row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptureFilter {
  /// Substring that must occur in `scripture_text` or `verse_title`. `None`
  /// and the empty string both match everything.
  pub text:      Option<String>,
  /// Restrict to these volumes. `None` means no restriction.
  pub volumes:   Option<VolumeSet>,
  /// Exact book/chapter(/verse) equality.
  pub reference: Option<Reference>,
}

impl ScriptureFilter {
  pub fn all() -> Self { Self::default() }

  pub fn containing(text: impl Into<String>) -> Self {
    Self { text: Some(text.into()), ..Self::default() }
  }

  pub fn reference(reference: Reference) -> Self {
    Self { reference: Some(reference), ..Self::default() }
  }

  pub fn in_volumes(mut self, volumes: Option<VolumeSet>) -> Self {
    self.volumes = volumes;
    self
  }

  /// The effective search text, with the empty string treated as absent.
  pub fn text(&self) -> Option<&str> {
    self.text.as_deref().filter(|t| !t.is_empty())
  }
}

// ─── Pagination and results ──────────────────────────────────────────────────

/// A window over an ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
  pub limit:  u32,
  pub offset: u64,
}

/// One page of search results plus the total across all pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPage {
  pub scriptures: Vec<Scripture>,
  pub total:      u64,
}

/// Number of search matches inside one volume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeCount {
  pub volume_id: Id,
  /// The volume title, used as the category label.
  pub volume:    String,
  pub count:     u64,
}
