//! Type locator port: which config types exist.
//!
//! Config types declared with `declare_config!` are collected at link time
//! into the [`CONFIG_TYPES`] distributed slice, so discovering them needs no
//! runtime scanning.  Locators filter by a *scope*: a module-path prefix such
//! as `"my_app::settings"`.

use linkme::distributed_slice;

use crate::domain::descriptor::ConfigEntry;

/// Every config type declared with `declare_config!` in the final binary.
#[distributed_slice]
pub static CONFIG_TYPES: [&'static dyn ConfigEntry];

/// Enumerates the config types within a scope.
pub trait TypeLocator: Send + Sync {
    /// Returns every config type whose name lies inside `scope`.
    ///
    /// The result must be finite; order does not matter.
    fn locate(&self, scope: &str) -> Vec<&'static dyn ConfigEntry>;
}

/// Returns `true` when the fully-qualified type `name` lies inside `scope`.
///
/// The empty scope contains everything.  Otherwise the scope must match whole
/// path segments: `"app::cfg"` contains `app::cfg::Window` but not
/// `app::cfgx::Window`.
pub fn in_scope(name: &str, scope: &str) -> bool {
    let scope = scope.trim_end_matches("::");
    if scope.is_empty() {
        return true;
    }
    match name.strip_prefix(scope) {
        Some(rest) => rest.is_empty() || rest.starts_with("::"),
        None => false,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_scope_contains_everything() {
        assert!(in_scope("app::cfg::Window", ""));
    }

    #[test]
    fn test_scope_matches_module_prefix() {
        assert!(in_scope("app::cfg::Window", "app::cfg"));
        assert!(in_scope("app::cfg::Window", "app"));
    }

    #[test]
    fn test_scope_with_trailing_separator() {
        assert!(in_scope("app::cfg::Window", "app::cfg::"));
    }

    #[test]
    fn test_scope_must_match_whole_segments() {
        assert!(!in_scope("app::cfgx::Window", "app::cfg"));
    }

    #[test]
    fn test_scope_outside_name() {
        assert!(!in_scope("other::Window", "app"));
    }

    #[test]
    fn test_scope_equal_to_name() {
        assert!(in_scope("app::cfg::Window", "app::cfg::Window"));
    }
}
