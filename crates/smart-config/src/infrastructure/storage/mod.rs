//! Storage adapters: where config files live.
//!
//! - **`fs`** – [`FsStorageProvider`], files under a root directory.
//! - **`memory`** – [`MemoryStorage`], a shared in-memory map used by tests
//!   and by embedders that keep config outside the file system.

pub mod fs;
pub mod memory;

pub use fs::FsStorageProvider;
pub use memory::MemoryStorage;
