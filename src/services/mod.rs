//! Services over the config model.
//!
//! - [`query`]: pure aggregation functions deriving enabled, disabled, and
//!   orphaned plugin sets from a config file
//! - [`install`]: the filesystem collaborators (copy, delete, extract) and
//!   the install/uninstall flows built on them
//!
//! Queries never mutate and never touch the config file on disk; the
//! install flows mutate the in-memory config and leave saving to the
//! caller, so a failed filesystem step never leaves a half-written file.

pub mod install;
pub mod query;

pub use install::{copy_dir, extract_archive, install_mod, rm_mod_dir, uninstall_mod};
pub use query::{
    find_plugin, get_disabled_plugins, get_enabled_plugins, get_orphaned_plugins, get_plugins,
    insert_data_entry, plugin_state,
};
