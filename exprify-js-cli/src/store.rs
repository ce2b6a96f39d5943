use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

/// Key of the editor buffer.
pub const CODE_KEY: &str = "code";

#[derive(Debug, Error)]
pub enum StoreError {
  #[error("failed to read store {path}: {source}")]
  Read {
    path: String,
    #[source]
    source: io::Error,
  },
  #[error("store {path} is not a JSON object of strings: {source}")]
  Invalid {
    path: String,
    #[source]
    source: serde_json::Error,
  },
  #[error("failed to write store {path}: {source}")]
  Write {
    path: String,
    #[source]
    source: io::Error,
  },
}

/// String values persisted across runs in a JSON object file.
#[derive(Debug)]
pub struct BufferStore {
  path: PathBuf,
  entries: BTreeMap<String, String>,
}

impl BufferStore {
  /// Loads the store at `path`. A missing file is an empty store.
  pub fn open(path: &Path) -> Result<BufferStore, StoreError> {
    let display = path.display().to_string();
    let entries = match fs::read_to_string(path) {
      Ok(text) => serde_json::from_str(&text).map_err(|source| StoreError::Invalid {
        path: display,
        source,
      })?,
      Err(err) if err.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
      Err(source) => {
        return Err(StoreError::Read {
          path: display,
          source,
        })
      }
    };
    Ok(BufferStore {
      path: path.to_path_buf(),
      entries,
    })
  }

  pub fn get(&self, key: &str) -> Option<&str> {
    self.entries.get(key).map(String::as_str)
  }

  pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
    self.entries.insert(key.into(), value.into());
  }

  pub fn save(&self) -> Result<(), StoreError> {
    let path = self.path.display().to_string();
    let json = serde_json::to_string_pretty(&self.entries).map_err(|source| StoreError::Invalid {
      path: path.clone(),
      source,
    })?;
    fs::write(&self.path, json).map_err(|source| StoreError::Write { path, source })
  }
}

#[cfg(test)]
mod tests {
  use super::BufferStore;
  use super::StoreError;
  use super::CODE_KEY;
  use std::fs;

  #[test]
  fn missing_file_is_an_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = BufferStore::open(&dir.path().join("buffer.json")).unwrap();
    assert_eq!(store.get(CODE_KEY), None);
  }

  #[test]
  fn saved_entries_are_read_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("buffer.json");
    let mut store = BufferStore::open(&path).unwrap();
    store.set(CODE_KEY, "x = 1;");
    store.set("other", "kept");
    store.save().unwrap();

    let store = BufferStore::open(&path).unwrap();
    assert_eq!(store.get(CODE_KEY), Some("x = 1;"));
    assert_eq!(store.get("other"), Some("kept"));
  }

  #[test]
  fn rejects_files_that_are_not_string_maps() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("buffer.json");
    fs::write(&path, r#"{"code": 1}"#).unwrap();
    assert!(matches!(
      BufferStore::open(&path),
      Err(StoreError::Invalid { .. })
    ));
  }
}
