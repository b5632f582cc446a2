//! Error type for registry operations.
//!
//! Failures fall into two classes:
//!
//! - **Declaration errors** ([`ConfigError::Metadata`]): a config type broke
//!   the metadata contract.  Fix the declaration; retrying cannot help.
//! - **Environmental errors** (everything else): the file is missing,
//!   unreadable or unwritable, or its content does not decode.  A corrupt
//!   file is reported, never silently replaced with defaults.

use std::fmt;

use smart_config_core::{ConfigEntry, MetadataError, SerializerError, StorageError};
use thiserror::Error;

/// Error type for [`ConfigRegistry`](crate::ConfigRegistry) operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config type's declaration is broken.
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    /// The storage medium failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The serializer could not encode or decode the config's file.
    #[error("failed to serialize {config}: {source}")]
    Serialization {
        config: String,
        #[source]
        source: SerializerError,
    },

    /// The decoded document does not fit the config type, or the value could
    /// not be turned into a document.
    #[error("{config} does not match its document: {source}")]
    Binding {
        config: String,
        #[source]
        source: serde_json::Error,
    },

    /// One or more types of a batch operation failed.
    #[error(transparent)]
    Batch(BatchFailure),
}

impl ConfigError {
    /// Returns `true` for declaration errors.
    pub fn is_metadata(&self) -> bool {
        matches!(self, Self::Metadata(_))
    }

    pub(crate) fn serialization(entry: &dyn ConfigEntry, source: SerializerError) -> Self {
        Self::Serialization {
            config: entry.name().to_string(),
            source,
        }
    }

    pub(crate) fn binding(entry: &dyn ConfigEntry, source: serde_json::Error) -> Self {
        Self::Binding {
            config: entry.name().to_string(),
            source,
        }
    }
}

/// Outcome of creating default files for a set of config types.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefaultOutcome {
    /// Types whose file did not exist and was created.
    pub created: Vec<&'static str>,
    /// Types whose existing file was overwritten with defaults.
    pub overwritten: Vec<&'static str>,
}

impl DefaultOutcome {
    /// Total number of files written.
    pub fn len(&self) -> usize {
        self.created.len() + self.overwritten.len()
    }

    /// Returns `true` when no file was written.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A single type's failure inside a batch operation.
#[derive(Debug)]
pub struct BatchItemFailure {
    pub config: &'static str,
    pub error: ConfigError,
}

/// Every environmental failure collected while a batch operation ran to the
/// end.
#[derive(Debug)]
pub struct BatchFailure {
    /// Name of the batch operation, e.g. `"load_all"`.
    pub operation: &'static str,
    /// One entry per failing config type.
    pub failures: Vec<BatchItemFailure>,
    /// For `create_default_all`: what was written before and after the
    /// failures.
    pub outcome: Option<DefaultOutcome>,
}

impl fmt::Display for BatchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} failed for {} config type(s)",
            self.operation,
            self.failures.len()
        )?;
        for failure in &self.failures {
            write!(f, "; {}: {}", failure.config, failure.error)?;
        }
        Ok(())
    }
}

impl std::error::Error for BatchFailure {}
