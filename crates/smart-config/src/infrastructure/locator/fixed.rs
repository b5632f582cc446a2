//! Locator over an explicit list of config types.
//!
//! Useful where link-time registration is unavailable or unwanted, and in
//! tests that need full control over what a scan finds.

use std::sync::RwLock;

use smart_config_core::{in_scope, ConfigEntry, TypeLocator};

/// A locator returning a fixed set of entries, filtered by scope.
#[derive(Debug, Default)]
pub struct FixedTypeLocator {
    entries: RwLock<Vec<&'static dyn ConfigEntry>>,
}

impl FixedTypeLocator {
    /// An empty locator.
    pub fn new() -> Self {
        Self::default()
    }

    /// A locator over `entries`.
    pub fn from_entries(entries: impl IntoIterator<Item = &'static dyn ConfigEntry>) -> Self {
        Self {
            entries: RwLock::new(entries.into_iter().collect()),
        }
    }

    /// Adds one entry.
    pub fn with(self, entry: &'static dyn ConfigEntry) -> Self {
        self.write().push(entry);
        self
    }

    /// Replaces the whole list.  Takes effect on the next scan.
    pub fn replace(&self, entries: impl IntoIterator<Item = &'static dyn ConfigEntry>) {
        *self.write() = entries.into_iter().collect();
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Vec<&'static dyn ConfigEntry>> {
        self.entries.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl FromIterator<&'static dyn ConfigEntry> for FixedTypeLocator {
    fn from_iter<I: IntoIterator<Item = &'static dyn ConfigEntry>>(iter: I) -> Self {
        Self::from_entries(iter)
    }
}

impl TypeLocator for FixedTypeLocator {
    fn locate(&self, scope: &str) -> Vec<&'static dyn ConfigEntry> {
        self.entries
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .copied()
            .filter(|entry| in_scope(entry.name(), scope))
            .collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use smart_config_core::{ConfigDescriptor, SingletonSlot};

    mod audio {
        use super::*;

        #[derive(Debug, Default, Serialize, Deserialize)]
        pub struct AudioConfig {
            pub volume: u8,
        }

        static SLOT: SingletonSlot<AudioConfig> = SingletonSlot::new();
        pub static AUDIO: ConfigDescriptor<AudioConfig> =
            ConfigDescriptor::new("cfg/audio.json", &SLOT, AudioConfig::default);
    }

    mod video {
        use super::*;

        #[derive(Debug, Default, Serialize, Deserialize)]
        pub struct VideoConfig {
            pub vsync: bool,
        }

        static SLOT: SingletonSlot<VideoConfig> = SingletonSlot::new();
        pub static VIDEO: ConfigDescriptor<VideoConfig> =
            ConfigDescriptor::new("cfg/video.json", &SLOT, VideoConfig::default);
    }

    fn locator() -> FixedTypeLocator {
        FixedTypeLocator::new().with(&audio::AUDIO).with(&video::VIDEO)
    }

    #[test]
    fn test_empty_scope_returns_all_entries() {
        assert_eq!(locator().locate("").len(), 2);
    }

    #[test]
    fn test_scope_filters_by_module_path() {
        // Arrange
        let scope = format!("{}::audio", module_path!());

        // Act
        let found = locator().locate(&scope);

        // Assert
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].path(), "cfg/audio.json");
    }

    #[test]
    fn test_replace_swaps_the_list() {
        let locator = locator();
        locator.replace([&video::VIDEO as &dyn ConfigEntry]);
        let found = locator.locate("");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].path(), "cfg/video.json");
    }

    #[test]
    fn test_collects_from_iterator() {
        let locator: FixedTypeLocator = [&audio::AUDIO as &dyn ConfigEntry].into_iter().collect();
        assert_eq!(locator.locate("").len(), 1);
    }
}
