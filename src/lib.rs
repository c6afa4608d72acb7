// omwmod - Mod installation and plugin load-order management for OpenMW
//
// This is a library crate: it owns the ordered configuration model around
// openmw.cfg and the filesystem collaborators needed to install and remove
// mods. Front ends (CLI or GUI) live elsewhere and drive this API.

pub mod error;
pub mod logging;
pub mod models;
pub mod paths;
pub mod services;
pub mod settings;
pub mod sources;

// Re-export commonly used types for convenience
pub use error::{Error, Result};
pub use models::{ConfigEntry, ConfigFile, Mod, Plugin, PluginState};
pub use settings::{Settings, SettingsManager};
pub use sources::{ModSource, ScanPolicy};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const LIB_NAME: &str = env!("CARGO_PKG_NAME");
