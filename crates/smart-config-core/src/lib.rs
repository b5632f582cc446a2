//! # smart-config-core
//!
//! Declaration side of smart-config: what a config type is, where its active
//! value lives, and the three ports through which the loader reaches storage,
//! encoding and type discovery.
//!
//! This crate performs no I/O.  The loader itself (`ConfigRegistry`) and the
//! shipped port implementations live in the `smart-config` crate.
//!
//! # Declaring a config type
//!
//! A config type is an ordinary serde type whose `Default` impl provides the
//! values written to disk the first time:
//!
//! ```rust,ignore
//! use serde::{Deserialize, Serialize};
//! use smart_config_core::{declare_config, ConfigType};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! #[serde(default)]
//! pub struct MyCfg {
//!     pub author: String,
//!     pub month: u8,
//!     pub year: u16,
//! }
//!
//! impl Default for MyCfg {
//!     fn default() -> Self {
//!         Self { author: "someone".into(), month: 10, year: 2019 }
//!     }
//! }
//!
//! declare_config!(MyCfg => "cfg/my-cfg.json");
//!
//! // After the loader ran `load()`:
//! let cfg = MyCfg::current().expect("config loaded");
//! ```
//!
//! Fields marked `#[serde(skip)]` are neither loaded nor stored.
//!
//! # Architecture overview
//!
//! - **`domain`** – [`SingletonSlot`], [`ConfigDescriptor`], the type-erased
//!   [`ConfigEntry`] view the loader works with, and [`MetadataError`].
//! - **`ports`** – [`StorageProvider`]/[`StorageHandle`],
//!   [`ConfigSerializer`] and [`TypeLocator`], plus the link-time
//!   [`CONFIG_TYPES`] registry filled by [`declare_config!`].

pub mod domain;
pub mod ports;

pub use domain::descriptor::{ConfigDescriptor, ConfigEntry, ConfigType, Document};
pub use domain::error::MetadataError;
pub use domain::slot::SingletonSlot;
pub use ports::locator::{in_scope, TypeLocator, CONFIG_TYPES};
pub use ports::serializer::{ConfigSerializer, SerializerError};
pub use ports::storage::{StorageError, StorageHandle, StorageProvider};

/// Declares a config type: its backing file, its singleton slot and its
/// link-time registration.
///
/// ```rust,ignore
/// declare_config!(WindowConfig => "cfg/window.json");
/// declare_config!(NetworkConfig => "cfg/network.toml", defaults = NetworkConfig::lan);
/// ```
///
/// The first form uses `Default::default` for the default values; the second
/// takes any `fn() -> T`.  The declaring crate must depend on `linkme`.
#[macro_export]
macro_rules! declare_config {
    ($ty:ty => $path:expr) => {
        $crate::declare_config!($ty => $path, defaults = <$ty as ::core::default::Default>::default);
    };
    ($ty:ty => $path:expr, defaults = $defaults:expr) => {
        const _: () = {
            static SLOT: $crate::SingletonSlot<$ty> = $crate::SingletonSlot::new();

            static DESCRIPTOR: $crate::ConfigDescriptor<$ty> =
                $crate::ConfigDescriptor::new($path, &SLOT, $defaults);

            #[::linkme::distributed_slice($crate::CONFIG_TYPES)]
            static ENTRY: &'static dyn $crate::ConfigEntry = &DESCRIPTOR;

            impl $crate::ConfigType for $ty {
                fn descriptor() -> &'static $crate::ConfigDescriptor<Self> {
                    &DESCRIPTOR
                }
            }
        };
    };
}
