//! Named partitions of the volume id space.
//!
//! Categories are fixed at engine-build time. They restrict searches and
//! define the "base canon" population the random sampler draws from when the
//! extended canon is excluded.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  model::Id,
  query::VolumeSet,
};

/// A named group of volumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
  /// Machine name used in query strings, e.g. `bible`.
  pub name:       String,
  /// Human-readable label.
  pub label:      String,
  pub volume_ids: Vec<Id>,
  /// Whether this category belongs to the base canon.
  #[serde(default)]
  pub base:       bool,
}

impl Category {
  pub fn volumes(&self) -> VolumeSet { self.volume_ids.iter().copied().collect() }
}

/// A validated partition: names are unique and no volume id is claimed by two
/// categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Categories {
  categories: Vec<Category>,
}

impl Categories {
  pub fn new(categories: Vec<Category>) -> Result<Self> {
    let mut names = HashSet::new();
    let mut claimed = HashSet::new();
    for category in &categories {
      if !names.insert(category.name.as_str()) {
        return Err(Error::Validation(format!(
          "duplicate category name {:?}",
          category.name
        )));
      }
      for id in &category.volume_ids {
        if !claimed.insert(*id) {
          return Err(Error::Validation(format!(
            "volume {id} appears in more than one category"
          )));
        }
      }
    }
    Ok(Self { categories })
  }

  pub fn get(&self, name: &str) -> Option<&Category> {
    self.categories.iter().find(|c| c.name == name)
  }

  /// Look up a category by name, failing on unknown names.
  pub fn resolve(&self, name: &str) -> Result<VolumeSet> {
    self
      .get(name)
      .map(Category::volumes)
      .ok_or_else(|| Error::Validation(format!("unknown category {name:?}")))
  }

  /// Union of the volumes of every base category.
  pub fn base_canon(&self) -> VolumeSet {
    self
      .categories
      .iter()
      .filter(|c| c.base)
      .flat_map(|c| c.volume_ids.iter().copied())
      .collect()
  }

  pub fn iter(&self) -> impl Iterator<Item = &Category> { self.categories.iter() }
}

/// The standard-works layout: the Bible (Old and New Testament) as the base
/// canon, the Book of Mormon, Doctrine and Covenants and Pearl of Great Price
/// as the extended canon.
pub fn default_categories() -> Vec<Category> {
  vec![
    Category {
      name:       "bible".into(),
      label:      "The Bible".into(),
      volume_ids: vec![1, 2],
      base:       true,
    },
    Category {
      name:       "latter_day".into(),
      label:      "Latter-day Scripture".into(),
      volume_ids: vec![3, 4, 5],
      base:       false,
    },
  ]
}

impl Default for Categories {
  fn default() -> Self {
    Self { categories: default_categories() }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn category(name: &str, ids: &[Id], base: bool) -> Category {
    Category {
      name:       name.into(),
      label:      name.to_uppercase(),
      volume_ids: ids.to_vec(),
      base,
    }
  }

  #[test]
  fn default_base_canon_is_the_bible() {
    let categories = Categories::default();
    assert_eq!(categories.base_canon(), VolumeSet::new([1, 2]));
  }

  #[test]
  fn defaults_form_a_valid_partition() {
    assert!(Categories::new(default_categories()).is_ok());
  }

  #[test]
  fn overlapping_categories_are_rejected() {
    let err = Categories::new(vec![
      category("a", &[1, 2], true),
      category("b", &[2, 3], false),
    ])
    .unwrap_err();
    assert!(matches!(err, Error::Validation(m) if m.contains("volume 2")));
  }

  #[test]
  fn duplicate_names_are_rejected() {
    let err = Categories::new(vec![
      category("a", &[1], true),
      category("a", &[2], false),
    ])
    .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
  }

  #[test]
  fn resolve_unknown_category_fails() {
    let categories = Categories::default();
    assert_eq!(categories.resolve("latter_day").unwrap(), VolumeSet::new([3, 4, 5]));
    assert!(matches!(categories.resolve("apocrypha"), Err(Error::Validation(_))));
  }

  #[test]
  fn base_canon_unions_every_base_category() {
    let categories = Categories::new(vec![
      category("a", &[1], true),
      category("b", &[2], false),
      category("c", &[3, 4], true),
    ])
    .unwrap();
    assert_eq!(categories.base_canon(), VolumeSet::new([1, 3, 4]));
  }
}
