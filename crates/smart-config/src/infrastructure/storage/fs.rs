//! File-system storage: logical config paths resolved under a root directory.
//!
//! `"cfg/window.json"` with root `/etc/my-app` maps to
//! `/etc/my-app/cfg/window.json`.  Logical paths always use `/` as separator
//! and must stay inside the root: absolute paths and `..` segments are
//! rejected with [`StorageError::InvalidPath`].

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Component, Path, PathBuf};

use smart_config_core::{StorageError, StorageHandle, StorageProvider};
use tracing::trace;

/// Storage provider over a directory tree.
#[derive(Debug, Clone)]
pub struct FsStorageProvider {
    root: PathBuf,
}

impl FsStorageProvider {
    /// Creates a provider rooted at `root`.  The directory is not required to
    /// exist until the first file is created in it.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory all logical paths are resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a logical path to a file-system path under the root.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidPath`] for empty or absolute paths and
    /// paths that climb out of the root.
    pub fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        let invalid = |reason| StorageError::InvalidPath {
            path: path.to_string(),
            reason,
        };

        if path.trim().is_empty() {
            return Err(invalid("path is empty"));
        }
        let relative = Path::new(path);
        let mut resolved = self.root.clone();
        for component in relative.components() {
            match component {
                Component::Normal(segment) => resolved.push(segment),
                Component::CurDir => {}
                Component::ParentDir => return Err(invalid("path leaves the config root")),
                Component::RootDir | Component::Prefix(_) => {
                    return Err(invalid("path must be relative to the config root"))
                }
            }
        }
        if resolved == self.root {
            return Err(invalid("path does not name a file"));
        }
        Ok(resolved)
    }
}

impl StorageProvider for FsStorageProvider {
    fn get(&self, path: &str) -> Result<Box<dyn StorageHandle>, StorageError> {
        let file = self.resolve(path)?;
        trace!(path, file = %file.display(), "resolved config path");
        Ok(Box::new(FsHandle { file }))
    }
}

/// A single file under the provider's root.
#[derive(Debug)]
struct FsHandle {
    file: PathBuf,
}

impl FsHandle {
    fn io_error(&self, source: io::Error) -> StorageError {
        StorageError::io(self.file.display().to_string(), source)
    }

    fn ensure_parent(&self) -> Result<(), StorageError> {
        if let Some(dir) = self.file.parent() {
            fs::create_dir_all(dir)
                .map_err(|source| StorageError::io(dir.display().to_string(), source))?;
        }
        Ok(())
    }
}

impl StorageHandle for FsHandle {
    fn exists(&self) -> bool {
        self.file.is_file()
    }

    fn create(&self) -> Result<bool, StorageError> {
        self.ensure_parent()?;
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.file)
        {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(false),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn open_read(&self) -> Result<Box<dyn Read>, StorageError> {
        let file = File::open(&self.file).map_err(|e| self.io_error(e))?;
        Ok(Box::new(BufReader::new(file)))
    }

    fn open_write(&self) -> Result<Box<dyn Write>, StorageError> {
        self.ensure_parent()?;
        let file = File::create(&self.file).map_err(|e| self.io_error(e))?;
        Ok(Box::new(BufWriter::new(file)))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    /// A unique scratch directory under the system temp dir.
    struct ScratchDir(PathBuf);

    impl ScratchDir {
        fn new() -> Self {
            let dir = std::env::temp_dir().join(format!("smart-config-fs-{}", Uuid::new_v4()));
            Self(dir)
        }
    }

    impl Drop for ScratchDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    fn read_all(handle: &dyn StorageHandle) -> String {
        let mut text = String::new();
        handle
            .open_read()
            .expect("open_read")
            .read_to_string(&mut text)
            .expect("read");
        text
    }

    #[test]
    fn test_resolve_joins_segments_under_root() {
        let provider = FsStorageProvider::new("/srv/app");
        let resolved = provider.resolve("cfg/window.json").unwrap();
        assert_eq!(resolved, Path::new("/srv/app").join("cfg").join("window.json"));
    }

    #[test]
    fn test_resolve_rejects_empty_path() {
        let provider = FsStorageProvider::new("/srv/app");
        assert!(matches!(
            provider.resolve("  "),
            Err(StorageError::InvalidPath { .. })
        ));
    }

    #[test]
    fn test_resolve_rejects_parent_segments() {
        let provider = FsStorageProvider::new("/srv/app");
        assert!(matches!(
            provider.resolve("cfg/../../etc/passwd"),
            Err(StorageError::InvalidPath { .. })
        ));
    }

    #[test]
    fn test_resolve_rejects_absolute_path() {
        let provider = FsStorageProvider::new("/srv/app");
        assert!(matches!(
            provider.resolve("/etc/passwd"),
            Err(StorageError::InvalidPath { .. })
        ));
    }

    #[test]
    fn test_create_makes_parent_directories_and_reports_creation() {
        // Arrange
        let scratch = ScratchDir::new();
        let provider = FsStorageProvider::new(&scratch.0);
        let handle = provider.get("cfg/nested/app.json").unwrap();
        assert!(!handle.exists());

        // Act
        let first = handle.create().unwrap();
        let second = handle.create().unwrap();

        // Assert
        assert!(first, "first create must report a new file");
        assert!(!second, "second create must report an existing file");
        assert!(handle.exists());
        assert!(scratch.0.join("cfg").join("nested").join("app.json").is_file());
    }

    #[test]
    fn test_open_write_truncates_previous_content() {
        // Arrange
        let scratch = ScratchDir::new();
        let provider = FsStorageProvider::new(&scratch.0);
        let handle = provider.get("cfg/app.json").unwrap();

        // Act
        {
            let mut writer = handle.open_write().unwrap();
            writer.write_all(b"a much longer first version").unwrap();
            writer.flush().unwrap();
        }
        {
            let mut writer = handle.open_write().unwrap();
            writer.write_all(b"short").unwrap();
            writer.flush().unwrap();
        }

        // Assert
        assert_eq!(read_all(handle.as_ref()), "short");
    }

    #[test]
    fn test_open_read_on_missing_file_is_io_error() {
        let scratch = ScratchDir::new();
        let provider = FsStorageProvider::new(&scratch.0);
        let handle = provider.get("cfg/missing.json").unwrap();

        match handle.open_read() {
            Err(StorageError::Io { source, .. }) => {
                assert_eq!(source.kind(), io::ErrorKind::NotFound)
            }
            Err(other) => panic!("expected Io error, got {other:?}"),
            Ok(_) => panic!("missing file must not open"),
        }
    }
}
