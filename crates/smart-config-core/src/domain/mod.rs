//! Domain types: what a config type is, and where its active value lives.
//!
//! Nothing in this module performs I/O.  The storage medium, the encoding and
//! the discovery mechanism are all reached through the traits in
//! [`crate::ports`].

/// Config descriptors and the type-erased [`descriptor::ConfigEntry`] view.
pub mod descriptor;

/// Declaration (metadata contract) errors.
pub mod error;

/// The process-wide singleton slot.
pub mod slot;
