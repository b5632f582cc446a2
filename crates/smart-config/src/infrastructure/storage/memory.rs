//! In-memory storage for tests and embedding.
//!
//! Clones of a [`MemoryStorage`] share the same files, so a test can hand one
//! clone to the registry and keep another to seed and inspect content:
//!
//! ```rust,ignore
//! let storage = MemoryStorage::new();
//! let registry = ConfigRegistry::new(locator, Arc::new(storage.clone()), serializer);
//! storage.insert("cfg/app.json", "{}");
//! registry.load_named("app::AppConfig")?;
//! assert_eq!(storage.write_count("cfg/app.json"), 0);
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Cursor, Read, Write};
use std::sync::{Arc, Mutex, MutexGuard};

use smart_config_core::{StorageError, StorageHandle, StorageProvider};

#[derive(Debug, Default)]
struct Files {
    content: BTreeMap<String, Vec<u8>>,
    writes: BTreeMap<String, usize>,
    failing: BTreeSet<String>,
}

/// A shared map from logical path to file bytes.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    files: Arc<Mutex<Files>>,
}

impl MemoryStorage {
    /// Creates an empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds `path` with `content`.  Does not count as a write.
    pub fn insert(&self, path: &str, content: impl Into<Vec<u8>>) {
        self.lock().content.insert(path.to_string(), content.into());
    }

    /// Returns the file content as text, if the file exists.
    pub fn contents(&self, path: &str) -> Option<String> {
        self.lock()
            .content
            .get(path)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// Returns `true` when `path` exists.
    pub fn contains(&self, path: &str) -> bool {
        self.lock().content.contains_key(path)
    }

    /// Number of times `path` was opened for writing.
    pub fn write_count(&self, path: &str) -> usize {
        self.lock().writes.get(path).copied().unwrap_or(0)
    }

    /// Makes every later `open_write` on `path` fail with a permission error.
    pub fn fail_writes_to(&self, path: &str) {
        self.lock().failing.insert(path.to_string());
    }

    /// Logical paths of all existing files, in order.
    pub fn paths(&self) -> Vec<String> {
        self.lock().content.keys().cloned().collect()
    }

    fn lock(&self) -> MutexGuard<'_, Files> {
        self.files.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl StorageProvider for MemoryStorage {
    fn get(&self, path: &str) -> Result<Box<dyn StorageHandle>, StorageError> {
        if path.trim().is_empty() {
            return Err(StorageError::InvalidPath {
                path: path.to_string(),
                reason: "path is empty",
            });
        }
        Ok(Box::new(MemoryHandle {
            files: Arc::clone(&self.files),
            path: path.to_string(),
        }))
    }
}

struct MemoryHandle {
    files: Arc<Mutex<Files>>,
    path: String,
}

impl MemoryHandle {
    fn lock(&self) -> MutexGuard<'_, Files> {
        self.files.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl StorageHandle for MemoryHandle {
    fn exists(&self) -> bool {
        self.lock().content.contains_key(&self.path)
    }

    fn create(&self) -> Result<bool, StorageError> {
        let mut files = self.lock();
        if files.content.contains_key(&self.path) {
            return Ok(false);
        }
        files.content.insert(self.path.clone(), Vec::new());
        Ok(true)
    }

    fn open_read(&self) -> Result<Box<dyn Read>, StorageError> {
        match self.lock().content.get(&self.path) {
            Some(bytes) => Ok(Box::new(Cursor::new(bytes.clone()))),
            None => Err(StorageError::io(
                self.path.clone(),
                io::Error::new(io::ErrorKind::NotFound, "no such config file"),
            )),
        }
    }

    fn open_write(&self) -> Result<Box<dyn Write>, StorageError> {
        let mut files = self.lock();
        if files.failing.contains(&self.path) {
            return Err(StorageError::io(
                self.path.clone(),
                io::Error::new(io::ErrorKind::PermissionDenied, "writes disabled"),
            ));
        }
        files.content.insert(self.path.clone(), Vec::new());
        *files.writes.entry(self.path.clone()).or_insert(0) += 1;
        Ok(Box::new(MemoryWriter {
            files: Arc::clone(&self.files),
            path: self.path.clone(),
        }))
    }
}

/// Appends straight into the shared file, so content is visible before flush.
struct MemoryWriter {
    files: Arc<Mutex<Files>>,
    path: String,
}

impl Write for MemoryWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut files = self.files.lock().unwrap_or_else(|e| e.into_inner());
        files
            .content
            .entry(self.path.clone())
            .or_default()
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_files() {
        // Arrange
        let storage = MemoryStorage::new();
        let other = storage.clone();

        // Act
        storage.insert("cfg/a.json", "{}");

        // Assert
        assert!(other.contains("cfg/a.json"));
        assert_eq!(other.contents("cfg/a.json").as_deref(), Some("{}"));
    }

    #[test]
    fn test_create_is_idempotent_and_leaves_content() {
        let storage = MemoryStorage::new();
        storage.insert("cfg/a.json", "kept");
        let handle = storage.get("cfg/a.json").unwrap();

        assert!(!handle.create().unwrap());
        assert_eq!(storage.contents("cfg/a.json").as_deref(), Some("kept"));
    }

    #[test]
    fn test_open_write_truncates_and_counts() {
        // Arrange
        let storage = MemoryStorage::new();
        storage.insert("cfg/a.json", "old content");
        let handle = storage.get("cfg/a.json").unwrap();

        // Act
        handle.open_write().unwrap().write_all(b"new").unwrap();

        // Assert
        assert_eq!(storage.contents("cfg/a.json").as_deref(), Some("new"));
        assert_eq!(storage.write_count("cfg/a.json"), 1);
    }

    #[test]
    fn test_failing_path_rejects_writes_only() {
        let storage = MemoryStorage::new();
        storage.insert("cfg/a.json", "{}");
        storage.fail_writes_to("cfg/a.json");
        let handle = storage.get("cfg/a.json").unwrap();

        assert!(handle.open_write().is_err());
        assert!(handle.open_read().is_ok());
    }

    #[test]
    fn test_empty_path_is_invalid() {
        let storage = MemoryStorage::new();
        assert!(matches!(
            storage.get(""),
            Err(StorageError::InvalidPath { .. })
        ));
    }
}
