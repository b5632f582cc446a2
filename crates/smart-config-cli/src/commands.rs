//! Subcommand implementations.
//!
//! Every command writes its report to `out` so tests can capture it.

use std::io::Write;

use anyhow::{bail, Context};
use smart_config::{ConfigEntry, ConfigRegistry, MetadataError};

use crate::cli::Command;

/// Scans the registry and runs `command`.
pub fn run(command: &Command, registry: &mut ConfigRegistry, out: &mut dyn Write) -> anyhow::Result<()> {
    if *command != Command::Init {
        registry.scan();
    }
    match command {
        Command::List => list(registry, out),
        Command::Init => init(registry, out),
        Command::Show { name } => show(registry, name, out),
        Command::Reset { name } => reset(registry, name, out),
        Command::Check => check(registry, out),
    }
}

fn list(registry: &ConfigRegistry, out: &mut dyn Write) -> anyhow::Result<()> {
    let entries = registry.entries();
    if entries.is_empty() {
        writeln!(out, "no config types found in scope {:?}", registry.scope())?;
        return Ok(());
    }
    for entry in entries {
        let status = match registry.verify(entry) {
            Ok(true) => "present".to_string(),
            Ok(false) => "missing".to_string(),
            Err(e) => format!("error: {e}"),
        };
        writeln!(out, "{}\t{}\t{}", entry.name(), entry.path(), status)?;
    }
    Ok(())
}

fn init(registry: &mut ConfigRegistry, out: &mut dyn Write) -> anyhow::Result<()> {
    let outcome = registry.init().context("failed to initialise config files")?;
    if outcome.created.is_empty() {
        writeln!(out, "all {} config file(s) already exist", registry.entries().len())?;
    }
    for name in &outcome.created {
        let path = registry.find(name)?.path();
        writeln!(out, "created {path} ({name})")?;
    }
    Ok(())
}

fn show(registry: &ConfigRegistry, query: &str, out: &mut dyn Write) -> anyhow::Result<()> {
    let entry = resolve(registry, query)?;
    registry
        .load(entry)
        .with_context(|| format!("failed to load {}", entry.name()))?;
    let document = entry
        .current_document()
        .with_context(|| format!("failed to convert {}", entry.name()))?
        .with_context(|| format!("{} has no value after loading", entry.name()))?;
    writeln!(out, "{}", serde_json::to_string_pretty(&document)?)?;
    Ok(())
}

fn reset(registry: &ConfigRegistry, query: &str, out: &mut dyn Write) -> anyhow::Result<()> {
    let entry = resolve(registry, query)?;
    let created = registry
        .create_default(entry)
        .with_context(|| format!("failed to reset {}", entry.name()))?;
    let verb = if created { "created" } else { "overwrote" };
    writeln!(out, "{verb} {} with defaults", entry.path())?;
    Ok(())
}

fn check(registry: &ConfigRegistry, out: &mut dyn Write) -> anyhow::Result<()> {
    registry.validate_all()?;
    writeln!(out, "{} config type(s) OK", registry.entries().len())?;
    Ok(())
}

/// Finds a scanned type by full name, or by a unique `::`-suffix of it.
fn resolve(registry: &ConfigRegistry, query: &str) -> anyhow::Result<&'static dyn ConfigEntry> {
    if let Ok(entry) = registry.find(query) {
        return Ok(entry);
    }
    let suffix = format!("::{query}");
    let matches: Vec<_> = registry
        .entries()
        .into_iter()
        .filter(|entry| entry.name().ends_with(&suffix))
        .collect();
    match matches.as_slice() {
        [entry] => Ok(*entry),
        [] => Err(MetadataError::UnknownConfig {
            name: query.to_string(),
        }
        .into()),
        several => {
            let names: Vec<_> = several.iter().map(|entry| entry.name()).collect();
            bail!("{query:?} is ambiguous: {}", names.join(", "))
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
