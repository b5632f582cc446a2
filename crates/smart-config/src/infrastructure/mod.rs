//! Infrastructure layer: concrete implementations of the core ports.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `smart_config_core`, but the registry in `application` only ever sees the
//! port traits.

pub mod locator;
pub mod serializer;
pub mod settings;
pub mod storage;
