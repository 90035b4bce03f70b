//! Locating the corpus database on disk.

use std::path::{Path, PathBuf};

use crate::error::Error;

/// Directory, relative to a checkout root, that holds the corpus database
/// when it is vendored as a submodule.
pub const SUBMODULE_DIR: &str = "submodules/lds-scriptures/sqlite";

/// How many directories (starting at `cwd`) are searched for
/// [`SUBMODULE_DIR`].
const SEARCH_DEPTH: usize = 3;

/// Resolve the configured database path.
///
/// `~` is expanded and relative paths are taken from `cwd`. If nothing
/// exists there, the file name is looked up under [`SUBMODULE_DIR`] in `cwd`
/// and its two ancestors.
pub fn resolve_database_path(configured: &Path, cwd: &Path) -> Result<PathBuf, Error> {
  let direct = cwd.join(expand_tilde(configured));
  if direct.is_file() {
    return Ok(direct);
  }

  let mut searched = vec![direct.clone()];
  if let Some(file_name) = direct.file_name() {
    for dir in cwd.ancestors().take(SEARCH_DEPTH) {
      let candidate = dir.join(SUBMODULE_DIR).join(file_name);
      if candidate.is_file() {
        tracing::debug!(path = %candidate.display(), "found database in submodule checkout");
        return Ok(candidate);
      }
      searched.push(candidate);
    }
  }

  Err(Error::DatabaseNotFound { searched })
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use std::fs;

  use tempfile::TempDir;

  use super::*;

  const DB: &str = "lds-scriptures-sqlite.db";

  fn touch(path: &Path) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, b"").unwrap();
  }

  #[test]
  fn existing_relative_path_is_taken_from_cwd() {
    let root = TempDir::new().unwrap();
    touch(&root.path().join("data").join(DB));

    let found = resolve_database_path(&Path::new("data").join(DB), root.path()).unwrap();
    assert_eq!(found, root.path().join("data").join(DB));
  }

  #[test]
  fn falls_back_to_submodule_in_an_ancestor() {
    let root = TempDir::new().unwrap();
    let expected = root.path().join(SUBMODULE_DIR).join(DB);
    touch(&expected);
    let cwd = root.path().join("backend").join("app");
    fs::create_dir_all(&cwd).unwrap();

    let found = resolve_database_path(Path::new(DB), &cwd).unwrap();
    assert_eq!(found, expected);
  }

  #[test]
  fn search_stops_after_two_ancestors() {
    let root = TempDir::new().unwrap();
    touch(&root.path().join(SUBMODULE_DIR).join(DB));
    let cwd = root.path().join("a").join("b").join("c");
    fs::create_dir_all(&cwd).unwrap();

    let err = resolve_database_path(Path::new(DB), &cwd).unwrap_err();
    let Error::DatabaseNotFound { searched } = &err else {
      panic!("unexpected error: {err}");
    };
    assert_eq!(searched.len(), 1 + SEARCH_DEPTH);
    assert!(err.to_string().contains(SUBMODULE_DIR));
  }

  #[test]
  fn absolute_path_ignores_cwd() {
    let root = TempDir::new().unwrap();
    let db = root.path().join(DB);
    touch(&db);
    let elsewhere = TempDir::new().unwrap();

    assert_eq!(resolve_database_path(&db, elsewhere.path()).unwrap(), db);
  }

  #[test]
  fn tilde_is_expanded_against_home() {
    let Ok(home) = std::env::var("HOME") else { return };
    assert_eq!(expand_tilde(Path::new("~/x.db")), PathBuf::from(home).join("x.db"));
    assert_eq!(expand_tilde(Path::new("/abs/x.db")), PathBuf::from("/abs/x.db"));
  }
}
