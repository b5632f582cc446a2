//! Settings for the loader itself: where files live, which types to scan and
//! how files are encoded.
//!
//! The root directory is resolved in this order:
//!
//! 1. an explicit [`LoaderSettings::root`],
//! 2. the `SMART_CONFIG_ROOT` environment variable,
//! 3. the current working directory.

use std::path::PathBuf;
use std::sync::Arc;

use crate::application::registry::ConfigRegistry;
use crate::infrastructure::locator::LinkedTypeLocator;
use crate::infrastructure::serializer::Format;
use crate::infrastructure::storage::FsStorageProvider;

/// Environment variable that overrides the default root directory.
pub const ROOT_ENV_VAR: &str = "SMART_CONFIG_ROOT";

/// How to build a file-system backed [`ConfigRegistry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderSettings {
    /// Directory logical config paths are resolved against.
    pub root: PathBuf,
    /// Module-path prefix limiting discovery; empty means everything.
    pub scope: String,
    /// File encoding.
    pub format: Format,
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            root: default_root(),
            scope: String::new(),
            format: Format::default(),
        }
    }
}

impl LoaderSettings {
    /// Default settings restricted to `scope`.
    pub fn scoped(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            ..Self::default()
        }
    }

    /// Builds a registry over the file system and the link-time registry.
    ///
    /// The registry is returned unscanned; call `init()` or `scan()` next.
    pub fn build(&self) -> ConfigRegistry {
        ConfigRegistry::new(
            Arc::new(LinkedTypeLocator::new()),
            Arc::new(FsStorageProvider::new(&self.root)),
            self.format.serializer(),
        )
        .with_scope(self.scope.clone())
    }
}

/// `$SMART_CONFIG_ROOT` when set and non-empty, else `.`.
pub fn default_root() -> PathBuf {
    std::env::var_os(ROOT_ENV_VAR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoped_keeps_default_format() {
        let settings = LoaderSettings::scoped("app::cfg");
        assert_eq!(settings.scope, "app::cfg");
        assert_eq!(settings.format, Format::Json);
    }

    #[test]
    fn test_build_applies_scope() {
        let settings = LoaderSettings {
            root: PathBuf::from("/tmp/unused"),
            scope: "app::cfg".to_string(),
            format: Format::Toml,
        };
        let registry = settings.build();
        assert_eq!(registry.scope(), "app::cfg");
        assert!(registry.scanned_names().is_empty(), "build must not scan");
    }
}
