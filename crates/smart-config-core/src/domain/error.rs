//! Declaration errors: a config type broke the metadata contract.

use thiserror::Error;

/// A config type's declaration is broken.
///
/// These are programmer errors in the code that declares config types, not
/// environmental failures.  They are never retried and never skipped: the
/// declaration has to be fixed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataError {
    /// The type has no config path, so it is not a usable config type.
    #[error("{config} has no config path")]
    MissingPath { config: String },

    /// A by-name lookup did not match any scanned config type.
    #[error("no scanned config type is named {name}")]
    UnknownConfig { name: String },

    /// One config type is declared through more than one descriptor, each
    /// with its own singleton slot.
    #[error("{config} is declared more than once, with different singleton slots")]
    MultipleSlots { config: String },

    /// Two config types are bound to the same singleton slot.
    #[error("{first} and {second} are bound to the same singleton slot")]
    SharedSlot { first: String, second: String },

    /// Two config types declare the same backing file.
    #[error("{first} and {second} both declare the config path {path}")]
    DuplicatePath {
        path: String,
        first: String,
        second: String,
    },

    /// `store()` was called before the singleton slot was ever populated.
    #[error("{config} cannot be stored: its singleton slot was never populated")]
    SlotEmpty { config: String },
}
