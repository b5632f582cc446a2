//! Serializer adapters.
//!
//! - **`json`** – [`JsonSerializer`], the default format.
//! - **`toml`** – [`TomlSerializer`].
//! - **`by_extension`** – [`ExtensionSerializer`], which picks one of the two
//!   per file, and the [`Format`] switch used by [`LoaderSettings`].
//!
//! [`LoaderSettings`]: crate::LoaderSettings

pub mod by_extension;
pub mod json;
pub mod toml;

pub use self::by_extension::{ExtensionSerializer, Format};
pub use self::json::JsonSerializer;
pub use self::toml::TomlSerializer;
