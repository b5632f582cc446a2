//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use smart_config::infrastructure::settings::default_root;
use smart_config::{Format, LoaderSettings, ROOT_ENV_VAR};

/// Inspect and manage declared config files.
#[derive(Debug, Parser)]
#[command(name = "smartcfg", about = "Inspect and manage declared config files", version)]
pub struct Cli {
    /// Directory that config paths are resolved against.
    ///
    /// Falls back to the current directory.
    #[arg(long, global = true, env = ROOT_ENV_VAR)]
    pub root: Option<PathBuf>,

    /// Module-path prefix limiting which config types are discovered.
    ///
    /// Empty means every declared type.
    #[arg(long, global = true, default_value = "", env = "SMART_CONFIG_SCOPE")]
    pub scope: String,

    /// File encoding: `json`, `toml`, or `auto` to choose by file extension.
    #[arg(long, global = true, default_value_t = Format::Auto, env = "SMART_CONFIG_FORMAT")]
    pub format: Format,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List scanned config types with their path and file status.
    List,
    /// Create a default file for every config type that has none.
    Init,
    /// Load one config and print its value as JSON.
    Show {
        /// Type name, or an unambiguous suffix of it.
        name: String,
    },
    /// Overwrite one config file with the type's defaults.
    Reset {
        /// Type name, or an unambiguous suffix of it.
        name: String,
    },
    /// Validate every declaration without touching any file.
    Check,
}

impl Cli {
    /// Converts the parsed arguments into loader settings.
    pub fn settings(&self) -> LoaderSettings {
        LoaderSettings {
            root: self.root.clone().unwrap_or_else(default_root),
            scope: self.scope.clone(),
            format: self.format,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
