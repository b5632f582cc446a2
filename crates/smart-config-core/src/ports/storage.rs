//! Storage port: where config files live.
//!
//! A [`StorageProvider`] turns a logical path such as `"cfg/window.json"`
//! into a [`StorageHandle`].  A handle is cheap and short-lived: the registry
//! resolves a fresh one for every operation and drops it as soon as the
//! operation ends, together with any reader or writer it opened.

use std::io::{self, Read, Write};

use thiserror::Error;

/// Error type for storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An I/O error occurred while accessing the file behind `path`.
    #[error("I/O error accessing config storage at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The logical path cannot be mapped onto this storage medium.
    #[error("invalid config path {path:?}: {reason}")]
    InvalidPath { path: String, reason: &'static str },
}

impl StorageError {
    /// Wraps an I/O error with the path it occurred on.
    pub fn io(path: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// One named config file.
pub trait StorageHandle {
    /// Returns `true` when the file exists.
    fn exists(&self) -> bool;

    /// Creates the file (empty) if it does not exist yet.
    ///
    /// Returns `true` if this call created it, `false` if it already existed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the file cannot be created.
    fn create(&self) -> Result<bool, StorageError>;

    /// Opens the file for reading.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the file is missing or unreadable.
    fn open_read(&self) -> Result<Box<dyn Read>, StorageError>;

    /// Opens the file for writing, truncating any previous content.
    ///
    /// Callers must `flush()` the writer before dropping it to observe write
    /// errors.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the file cannot be opened for writing.
    fn open_write(&self) -> Result<Box<dyn Write>, StorageError>;
}

/// Resolves logical paths to [`StorageHandle`]s.
pub trait StorageProvider: Send + Sync {
    /// Returns the handle for `path`.  The file does not need to exist.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidPath`] when `path` cannot be mapped onto
    /// this storage medium.
    fn get(&self, path: &str) -> Result<Box<dyn StorageHandle>, StorageError>;
}
