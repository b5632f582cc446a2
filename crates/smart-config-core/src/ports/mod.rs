//! Ports: the three narrow abstractions the registry depends on.
//!
//! - **`storage`** – existence checks, creation and read/write channels for
//!   config files.
//! - **`serializer`** – encoding a document tree as text and back.
//! - **`locator`** – enumerating the declared config types.
//!
//! Implementations live in the `smart-config` crate's infrastructure layer.

pub mod locator;
pub mod serializer;
pub mod storage;
