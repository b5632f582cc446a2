//! smart-config: declarative config loading.
//!
//! Declare a config type with `declare_config!`, then let a
//! [`ConfigRegistry`] find it, write its default file on first run, and load
//! the file into the type's singleton slot:
//!
//! ```rust,ignore
//! let registry = smart_config::filesystem_json(module_path!())?;
//! registry.load_all()?;
//! let window = WindowConfig::current().expect("loaded");
//! ```
//!
//! The declaration side (descriptors, slots, ports) lives in
//! `smart_config_core` and is re-exported here.

pub mod application;
pub mod infrastructure;

pub use application::error::{BatchFailure, BatchItemFailure, ConfigError, DefaultOutcome};
pub use application::registry::ConfigRegistry;
pub use infrastructure::locator::{FixedTypeLocator, LinkedTypeLocator};
pub use infrastructure::serializer::{ExtensionSerializer, Format, JsonSerializer, TomlSerializer};
pub use infrastructure::settings::{LoaderSettings, ROOT_ENV_VAR};
pub use infrastructure::storage::{FsStorageProvider, MemoryStorage};

pub use smart_config_core::{
    declare_config, in_scope, ConfigDescriptor, ConfigEntry, ConfigSerializer, ConfigType,
    Document, MetadataError, SerializerError, SingletonSlot, StorageError, StorageHandle,
    StorageProvider, TypeLocator, CONFIG_TYPES,
};

/// Builds a registry over JSON files under the default root, restricted to
/// `scope`, and runs [`ConfigRegistry::init`] so every discovered type has a
/// file.
///
/// # Errors
///
/// Returns [`ConfigError`] when a declaration is broken or a default file
/// cannot be written.
pub fn filesystem_json(scope: &str) -> Result<ConfigRegistry, ConfigError> {
    let settings = LoaderSettings {
        format: Format::Json,
        ..LoaderSettings::scoped(scope)
    };
    let mut registry = settings.build();
    registry.init()?;
    Ok(registry)
}
