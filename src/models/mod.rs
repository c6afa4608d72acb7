//! Data model for the ordered OpenMW configuration.
//!
//! - [`ConfigEntry`]: one `key=value` line with a stable position
//! - [`ConfigFile`]: the ordered collection of entries, with lookup,
//!   insertion-at-index, and atomic load/save
//! - [`Mod`] / [`Plugin`]: installable content resolved from `data`
//!   entries and the load-order-bearing files inside it
//!
//! Line order is the single source of truth for load order; positions are
//! an explicit model of it, recomputed on every structural mutation rather
//! than inferred from container iteration.

pub mod config_file;
pub mod entry;
pub mod mod_info;

pub use config_file::ConfigFile;
pub use entry::{ConfigEntry, KEY_CONTENT, KEY_DATA};
pub use mod_info::{Mod, Plugin, PluginState};
