//! ConfigRegistry: discovers config types and binds them to their files.
//!
//! The registry is the only stateful piece of the loader.  It remembers the
//! set of config types found by the most recent [`scan`], and drives each of
//! them through the file lifecycle:
//!
//! ```text
//! Unknown ──scan──► Discovered ──verify──► Present | Absent
//!                                             ▲        │
//!                                             └────────┘ create_default
//!
//! Present ──load──► Bound ──store──► Present (file rewritten)
//! ```
//!
//! Storage, encoding and discovery are injected as trait objects, so the
//! registry can be exercised entirely in memory (see the tests at the bottom
//! of this file).
//!
//! # Batch operations
//!
//! `load_all`, `store_all`, `verify_all` and `create_default_all` validate
//! every involved declaration before touching storage and abort on the first
//! [`MetadataError`].  Environmental failures do not abort: every type is
//! attempted, and the failures are returned together as
//! [`ConfigError::Batch`].
//!
//! [`scan`]: ConfigRegistry::scan

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::io::Write;
use std::sync::Arc;

use smart_config_core::{
    ConfigEntry, ConfigSerializer, ConfigType, Document, MetadataError, StorageError,
    StorageHandle, StorageProvider, TypeLocator,
};
use tracing::{debug, info, warn};

use crate::application::error::{BatchFailure, BatchItemFailure, ConfigError, DefaultOutcome};

/// The config loader.
///
/// `scan` takes `&mut self`; every other operation takes `&self`.  Share the
/// registry behind a lock if several threads need to rescan.
pub struct ConfigRegistry {
    locator: Arc<dyn TypeLocator>,
    storage: Arc<dyn StorageProvider>,
    serializer: Arc<dyn ConfigSerializer>,
    scope: String,
    /// Everything the last scan returned, including repeated names.
    located: Vec<&'static dyn ConfigEntry>,
    known: BTreeMap<&'static str, &'static dyn ConfigEntry>,
}

impl ConfigRegistry {
    /// Creates a registry with an empty scope (every located type) and an
    /// empty known set.  Call [`scan`](Self::scan) or [`init`](Self::init)
    /// next.
    pub fn new(
        locator: Arc<dyn TypeLocator>,
        storage: Arc<dyn StorageProvider>,
        serializer: Arc<dyn ConfigSerializer>,
    ) -> Self {
        Self {
            locator,
            storage,
            serializer,
            scope: String::new(),
            located: Vec::new(),
            known: BTreeMap::new(),
        }
    }

    /// Restricts discovery to types whose module path lies inside `scope`.
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    /// The discovery scope.
    pub fn scope(&self) -> &str {
        &self.scope
    }

    // ── Discovery ─────────────────────────────────────────────────────────────

    /// Scans for config types and creates a default file for every type that
    /// has none.  Existing files are not touched.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a declaration is broken or a default file
    /// cannot be written.
    pub fn init(&mut self) -> Result<DefaultOutcome, ConfigError> {
        self.scan();
        let missing = self.verify_all()?;
        let outcome = self.create_default_all(&missing)?;
        info!(
            created = outcome.created.len(),
            known = self.known.len(),
            "config registry initialised"
        );
        Ok(outcome)
    }

    /// Replaces the known set with the types the locator finds in the scope.
    ///
    /// A type located through more than one descriptor is kept once in the
    /// known set; [`validate_all`](Self::validate_all) reports it.
    pub fn scan(&mut self) {
        self.located = self.locator.locate(&self.scope);
        self.known = self
            .located
            .iter()
            .map(|entry| (entry.name(), *entry))
            .collect();
        if self.located.len() != self.known.len() {
            warn!(
                scope = %self.scope,
                located = self.located.len(),
                known = self.known.len(),
                "config types located more than once"
            );
        }
        debug!(scope = %self.scope, count = self.known.len(), "scanned config types");
    }

    /// Fully-qualified names of the known config types.
    pub fn scanned_names(&self) -> BTreeSet<&'static str> {
        self.known.keys().copied().collect()
    }

    /// The known config types, ordered by name.
    pub fn entries(&self) -> Vec<&'static dyn ConfigEntry> {
        self.known.values().copied().collect()
    }

    /// Looks up a known config type by its fully-qualified name.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::UnknownConfig`] when no scanned type has that
    /// name.
    pub fn find(&self, name: &str) -> Result<&'static dyn ConfigEntry, MetadataError> {
        self.known
            .get(name)
            .copied()
            .ok_or_else(|| MetadataError::UnknownConfig {
                name: name.to_string(),
            })
    }

    // ── Validation ────────────────────────────────────────────────────────────

    /// Checks every located declaration, that each type has a single slot, and
    /// that no two types share a slot or a path.
    ///
    /// # Errors
    ///
    /// Returns the first [`MetadataError`] found.
    pub fn validate_all(&self) -> Result<(), MetadataError> {
        validate_set(self.located.iter().copied())
    }

    // ── Existence & defaults ──────────────────────────────────────────────────

    /// Returns whether the file of `entry` exists.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the declaration is broken or the path is
    /// rejected by the storage provider.
    pub fn verify(&self, entry: &dyn ConfigEntry) -> Result<bool, ConfigError> {
        entry.validate()?;
        let handle = self.storage.get(entry.path())?;
        Ok(handle.exists())
    }

    /// Returns the known types whose file does not exist.
    ///
    /// # Errors
    ///
    /// See the module documentation on batch operations.
    pub fn verify_all(&self) -> Result<Vec<&'static dyn ConfigEntry>, ConfigError> {
        self.validate_all()?;
        let mut missing = Vec::new();
        self.run_batch("verify_all", self.entries(), |entry| {
            if !self.verify(entry)? {
                missing.push(entry);
            }
            Ok(())
        })?;
        Ok(missing)
    }

    /// Writes a fresh default instance of `entry` to its file.
    ///
    /// The file is created first if it is missing.  If it already exists its
    /// content is **overwritten** with the defaults, discarding any
    /// customisation.
    ///
    /// Returns `true` if the file was created, `false` if it was overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the declaration is broken, the file
    /// cannot be created or written, or the defaults cannot be encoded.
    pub fn create_default(&self, entry: &dyn ConfigEntry) -> Result<bool, ConfigError> {
        entry.validate()?;
        let document = entry
            .default_document()
            .map_err(|source| ConfigError::binding(entry, source))?;
        let bytes = self.encode(entry, &document)?;

        let handle = self.storage.get(entry.path())?;
        let created = handle.create()?;
        write_bytes(entry, handle.as_ref(), &bytes)?;

        if created {
            info!(config = entry.name(), path = entry.path(), "created default config file");
        } else {
            warn!(
                config = entry.name(),
                path = entry.path(),
                "overwrote existing config file with defaults"
            );
        }
        Ok(created)
    }

    /// Applies [`create_default`](Self::create_default) to each of
    /// `entries` and reports which files were created and which overwritten.
    ///
    /// # Errors
    ///
    /// See the module documentation on batch operations.  On environmental
    /// failures the partial outcome is attached to the [`BatchFailure`].
    pub fn create_default_all(
        &self,
        entries: &[&'static dyn ConfigEntry],
    ) -> Result<DefaultOutcome, ConfigError> {
        validate_set(entries.iter().copied())?;
        let mut outcome = DefaultOutcome::default();
        let result = self.run_batch("create_default_all", entries.to_vec(), |entry| {
            if self.create_default(entry)? {
                outcome.created.push(entry.name());
            } else {
                outcome.overwritten.push(entry.name());
            }
            Ok(())
        });
        match result {
            Ok(()) => Ok(outcome),
            Err(ConfigError::Batch(mut failure)) => {
                failure.outcome = Some(outcome);
                Err(ConfigError::Batch(failure))
            }
            Err(other) => Err(other),
        }
    }

    // ── Load & store ──────────────────────────────────────────────────────────

    /// Reads the file of `entry` and replaces the value in its singleton slot.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the declaration is broken, the file
    /// cannot be read, or its content does not decode into the config type.
    /// The slot keeps its previous value on error.
    pub fn load(&self, entry: &dyn ConfigEntry) -> Result<(), ConfigError> {
        entry.validate()?;
        let handle = self.storage.get(entry.path())?;
        let document = {
            let mut reader = handle.open_read()?;
            self.serializer
                .decode(reader.as_mut(), entry)
                .map_err(|source| ConfigError::serialization(entry, source))?
        };
        entry
            .bind_document(document)
            .map_err(|source| ConfigError::binding(entry, source))?;
        debug!(config = entry.name(), path = entry.path(), "loaded config");
        Ok(())
    }

    /// Loads every known config type.
    ///
    /// # Errors
    ///
    /// See the module documentation on batch operations.
    pub fn load_all(&self) -> Result<(), ConfigError> {
        self.validate_all()?;
        self.run_batch("load_all", self.entries(), |entry| self.load(entry))
    }

    /// Writes the value in the singleton slot of `entry` to its file,
    /// overwriting the previous content.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::SlotEmpty`] when the slot was never
    /// populated, and [`ConfigError`] when the file cannot be written.
    pub fn store(&self, entry: &dyn ConfigEntry) -> Result<(), ConfigError> {
        entry.validate()?;
        let document = entry
            .current_document()
            .map_err(|source| ConfigError::binding(entry, source))?
            .ok_or_else(|| MetadataError::SlotEmpty {
                config: entry.name().to_string(),
            })?;
        let bytes = self.encode(entry, &document)?;
        let handle = self.storage.get(entry.path())?;
        write_bytes(entry, handle.as_ref(), &bytes)?;
        debug!(config = entry.name(), path = entry.path(), "stored config");
        Ok(())
    }

    /// Stores every known config type.
    ///
    /// # Errors
    ///
    /// See the module documentation on batch operations.
    pub fn store_all(&self) -> Result<(), ConfigError> {
        self.validate_all()?;
        self.run_batch("store_all", self.entries(), |entry| self.store(entry))
    }

    // ── Typed and by-name shortcuts ───────────────────────────────────────────

    /// [`verify`](Self::verify) for a declared type.
    pub fn verify_type<T: ConfigType>(&self) -> Result<bool, ConfigError> {
        self.verify(T::descriptor())
    }

    /// [`create_default`](Self::create_default) for a declared type.
    pub fn create_default_type<T: ConfigType>(&self) -> Result<bool, ConfigError> {
        self.create_default(T::descriptor())
    }

    /// [`load`](Self::load) for a declared type.
    pub fn load_type<T: ConfigType>(&self) -> Result<(), ConfigError> {
        self.load(T::descriptor())
    }

    /// [`store`](Self::store) for a declared type.
    pub fn store_type<T: ConfigType>(&self) -> Result<(), ConfigError> {
        self.store(T::descriptor())
    }

    /// [`load`](Self::load) for a scanned type, looked up by name.
    pub fn load_named(&self, name: &str) -> Result<(), ConfigError> {
        self.load(self.find(name)?)
    }

    /// [`store`](Self::store) for a scanned type, looked up by name.
    pub fn store_named(&self, name: &str) -> Result<(), ConfigError> {
        self.store(self.find(name)?)
    }

    // ── Internals ─────────────────────────────────────────────────────────────

    /// Encodes into memory, so a document the format cannot represent never
    /// reaches the file.
    fn encode(
        &self,
        entry: &dyn ConfigEntry,
        document: &Document,
    ) -> Result<Vec<u8>, ConfigError> {
        let mut bytes = Vec::new();
        self.serializer
            .encode(&mut bytes, entry, document)
            .map_err(|source| ConfigError::serialization(entry, source))?;
        Ok(bytes)
    }

    /// Runs `op` for every entry.  Declaration errors abort at once;
    /// environmental errors are collected and reported together at the end.
    fn run_batch<F>(
        &self,
        operation: &'static str,
        entries: Vec<&'static dyn ConfigEntry>,
        mut op: F,
    ) -> Result<(), ConfigError>
    where
        F: FnMut(&'static dyn ConfigEntry) -> Result<(), ConfigError>,
    {
        let mut failures = Vec::new();
        for entry in entries {
            match op(entry) {
                Ok(()) => {}
                Err(error) if error.is_metadata() => return Err(error),
                Err(error) => {
                    warn!(operation, config = entry.name(), %error, "config operation failed");
                    failures.push(BatchItemFailure {
                        config: entry.name(),
                        error,
                    });
                }
            }
        }
        if failures.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Batch(BatchFailure {
                operation,
                failures,
                outcome: None,
            }))
        }
    }
}

/// Truncates the file behind `handle` and writes `bytes` to it.
fn write_bytes(
    entry: &dyn ConfigEntry,
    handle: &dyn StorageHandle,
    bytes: &[u8],
) -> Result<(), ConfigError> {
    let mut writer = handle.open_write()?;
    writer
        .write_all(bytes)
        .and_then(|()| writer.flush())
        .map_err(|source| StorageError::io(entry.path(), source))?;
    Ok(())
}

/// Validates each declaration and the cross-type rules: a type has exactly
/// one slot, and no two types share a slot or a path.
///
/// The same descriptor listed twice counts once.
fn validate_set<'a>(
    entries: impl IntoIterator<Item = &'a dyn ConfigEntry>,
) -> Result<(), MetadataError> {
    let mut names: HashMap<&'static str, usize> = HashMap::new();
    let mut slots: HashMap<usize, &'static str> = HashMap::new();
    let mut paths: HashMap<&'static str, &'static str> = HashMap::new();
    for entry in entries {
        entry.validate()?;
        match names.insert(entry.name(), entry.slot_id()) {
            Some(slot) if slot != entry.slot_id() => {
                return Err(MetadataError::MultipleSlots {
                    config: entry.name().to_string(),
                });
            }
            Some(_) if paths.get(entry.path()) == Some(&entry.name()) => continue,
            _ => {}
        }
        if let Some(first) = slots.insert(entry.slot_id(), entry.name()) {
            return Err(MetadataError::SharedSlot {
                first: first.to_string(),
                second: entry.name().to_string(),
            });
        }
        if let Some(first) = paths.insert(entry.path(), entry.name()) {
            return Err(MetadataError::DuplicatePath {
                path: entry.path().to_string(),
                first: first.to_string(),
                second: entry.name().to_string(),
            });
        }
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
