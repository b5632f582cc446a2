//! Application layer: the config registry and its error type.
//!
//! - **`registry`** – [`ConfigRegistry`](registry::ConfigRegistry): scan,
//!   verify, create defaults, load and store.  Depends only on the port
//!   traits from `smart_config_core`, so it contains no file-system or format
//!   specific code.
//! - **`error`** – [`ConfigError`](error::ConfigError) and the batch outcome
//!   types.

pub mod error;
pub mod registry;
