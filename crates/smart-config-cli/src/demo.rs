//! Config types shipped with the binary.
//!
//! They give `smartcfg` something to manage out of the box and double as a
//! reference for declaring config types: one JSON file and one TOML file.

use serde::{Deserialize, Serialize};
use smart_config::declare_config;

/// Main window geometry and appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
    /// Colour theme name; `null` means follow the system.
    pub theme: Option<String>,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "smart-config demo".to_string(),
            width: 1280,
            height: 720,
            fullscreen: false,
            theme: None,
        }
    }
}

declare_config!(WindowConfig => "cfg/window.json");

/// Network ports and bind address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// IP address to bind to.  `"0.0.0.0"` binds all interfaces.
    pub bind_address: String,
    pub control_port: u16,
    pub discovery_port: u16,
    /// Optional static peer; omitted from the file when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peer: Option<String>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            control_port: 24800,
            discovery_port: 24802,
            peer: None,
        }
    }
}

declare_config!(NetworkConfig => "cfg/network.toml");
