//! Locator over the link-time registry.

use smart_config_core::{in_scope, ConfigEntry, TypeLocator, CONFIG_TYPES};

/// Finds every type registered with `declare_config!` in the final binary.
///
/// Only types from crates that are actually linked show up.  A declaration in
/// a library crate nobody references may be dropped by the linker.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkedTypeLocator;

impl LinkedTypeLocator {
    pub fn new() -> Self {
        Self
    }
}

impl TypeLocator for LinkedTypeLocator {
    fn locate(&self, scope: &str) -> Vec<&'static dyn ConfigEntry> {
        CONFIG_TYPES
            .iter()
            .copied()
            .filter(|entry| in_scope(entry.name(), scope))
            .collect()
    }
}
