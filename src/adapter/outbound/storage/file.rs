//! File-backed storage.
//!
//! All keys live in one JSON object on disk. The file is read once when the
//! store is opened and rewritten in full after every mutation, via a
//! temporary file and a rename so a crash never leaves a half-written
//! document behind.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::debug;

use crate::error::{Result, StorageError};
use crate::port::outbound::storage::{KeyValueStore, StorageKey};

pub struct FileStore {
    path: PathBuf,
    values: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`. A missing file is an empty store; the file
    /// is created on the first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => {
                serde_json::from_str(&content).map_err(|source| StorageError::Corrupt {
                    key: path.display().to_string(),
                    source,
                })?
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => {
                return Err(StorageError::Read {
                    path: path.display().to_string(),
                    source,
                }
                .into())
            }
        };

        debug!(path = %path.display(), keys = values.len(), "Opened storage");
        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, values: &BTreeMap<String, String>) -> Result<()> {
        let write_err = |source| StorageError::Write {
            path: self.path.display().to_string(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(write_err)?;
            }
        }

        let content = serde_json::to_string_pretty(values)?;
        let tmp = self.path.with_extension("tmp");
        {
            let mut file = open_private(&tmp).map_err(write_err)?;
            file.write_all(content.as_bytes()).map_err(write_err)?;
            file.sync_all().map_err(write_err)?;
        }
        fs::rename(&tmp, &self.path).map_err(write_err)?;
        Ok(())
    }

    fn update(&self, apply: impl FnOnce(&mut BTreeMap<String, String>) -> bool) -> Result<()> {
        let mut values = self.values.lock();
        let mut next = values.clone();
        if !apply(&mut next) {
            return Ok(());
        }
        self.flush(&next)?;
        *values = next;
        Ok(())
    }
}

/// The store may hold a bearer token, so the file is private to the user.
#[cfg(unix)]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    use std::os::unix::fs::OpenOptionsExt;

    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    fs::File::create(path)
}

impl KeyValueStore for FileStore {
    fn get(&self, key: StorageKey) -> Result<Option<String>> {
        Ok(self.values.lock().get(key.as_str()).cloned())
    }

    fn set(&self, key: StorageKey, value: &str) -> Result<()> {
        self.update(|values| {
            values.insert(key.as_str().to_string(), value.to_string());
            true
        })
    }

    fn remove(&self, key: StorageKey) -> Result<()> {
        self.update(|values| values.remove(key.as_str()).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn missing_file_opens_empty_and_is_created_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get(StorageKey::Token).unwrap(), None);
        assert!(!path.exists());

        store.set(StorageKey::Token, "secret").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");

        let store = FileStore::open(&path).unwrap();
        store.set(StorageKey::Cart, r#"[{"id":1,"product_id":2,"quantity":3}]"#).unwrap();
        store.set(StorageKey::UserName, "Ann").unwrap();
        store.remove(StorageKey::UserName).unwrap();
        drop(store);

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(
            reopened.get(StorageKey::Cart).unwrap().as_deref(),
            Some(r#"[{"id":1,"product_id":2,"quantity":3}]"#)
        );
        assert_eq!(reopened.get(StorageKey::UserName).unwrap(), None);
    }

    #[test]
    fn corrupt_file_fails_to_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "{ not json").unwrap();

        let result = FileStore::open(&path);

        assert!(matches!(
            result,
            Err(Error::Storage(StorageError::Corrupt { .. }))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn storage_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        let store = FileStore::open(&path).unwrap();
        store.set(StorageKey::Token, "secret").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
