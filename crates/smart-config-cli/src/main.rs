//! smartcfg: inspect and manage the config files of an application.
//!
//! # Usage
//!
//! ```text
//! smartcfg [OPTIONS] <COMMAND>
//!
//! Commands:
//!   list          Scanned config types, their paths and whether the file exists
//!   init          Create a default file for every type that has none
//!   show <NAME>   Load one config and print it as JSON
//!   reset <NAME>  Overwrite one config file with its defaults
//!   check         Validate every declaration
//!
//! Options:
//!   --root   <DIR>    Directory config paths are resolved against [default: .]
//!   --scope  <PATH>   Module-path prefix limiting discovery [default: everything]
//!   --format <FMT>    json, toml or auto [default: auto]
//! ```
//!
//! `<NAME>` is a fully-qualified type name, or any unambiguous `::`-suffix of
//! one (e.g. `WindowConfig`).
//!
//! # Environment variable overrides
//!
//! | Variable             | Description                 |
//! |----------------------|-----------------------------|
//! | `SMART_CONFIG_ROOT`  | Default for `--root`        |
//! | `SMART_CONFIG_SCOPE` | Default for `--scope`       |
//! | `SMART_CONFIG_FORMAT`| Default for `--format`      |
//! | `RUST_LOG`           | Log filter (default `info`) |
//!
//! Logs go to stderr; command output goes to stdout.

mod cli;
mod commands;
mod demo;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = cli.settings();
    tracing::debug!(
        root = %settings.root.display(),
        scope = %settings.scope,
        format = %settings.format,
        "smartcfg starting"
    );

    let mut registry = settings.build();
    let stdout = std::io::stdout();
    commands::run(&cli.command, &mut registry, &mut stdout.lock())
}
