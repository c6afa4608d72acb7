//! Aggregation queries over a config file.
//!
//! Pure functions deriving "what is installed, enabled, orphaned" from a
//! [`ConfigFile`] plus a [`ScanPolicy`]. Mods whose directory has gone
//! missing are skipped silently; at this layer absence is a normal
//! outcome, not an error.

use crate::error::Result;
use crate::models::entry::{ConfigEntry, KEY_CONTENT, KEY_DATA};
use crate::models::{ConfigFile, Plugin, PluginState};
use crate::sources::ScanPolicy;
use indexmap::IndexSet;

/// All plugins of all installed mods, mods in `data`-entry order and
/// plugins in discovery order within each mod.
///
/// Orphaned plugins cannot appear here: with no installed mod there is no
/// plugin object to report.
pub fn get_plugins(cfg: &ConfigFile, policy: &ScanPolicy) -> Result<Vec<Plugin>> {
    let mut plugins = Vec::new();
    for m in cfg.get_mods() {
        if !m.is_installed() {
            continue;
        }
        plugins.extend(m.plugins(cfg, policy)?);
    }
    Ok(plugins)
}

/// Enabled plugins sorted ascending by load order.
///
/// Orders are entry positions and therefore unique; ties cannot occur.
pub fn get_enabled_plugins(cfg: &ConfigFile, policy: &ScanPolicy) -> Result<Vec<Plugin>> {
    let mut enabled: Vec<Plugin> = get_plugins(cfg, policy)?
        .into_iter()
        .filter(Plugin::is_enabled)
        .collect();
    enabled.sort_by_key(Plugin::order);
    Ok(enabled)
}

/// Installed plugins with no `content` entry, in discovery order.
pub fn get_disabled_plugins(cfg: &ConfigFile, policy: &ScanPolicy) -> Result<Vec<Plugin>> {
    Ok(get_plugins(cfg, policy)?
        .into_iter()
        .filter(|plugin| !plugin.is_enabled())
        .collect())
}

/// Names listed as `content` entries that no installed mod provides.
///
/// Such an entry is a dangling load-order reference, typically left behind
/// by an uninstalled mod. Names keep `content` order and are deduplicated.
pub fn get_orphaned_plugins(cfg: &ConfigFile, policy: &ScanPolicy) -> Result<Vec<String>> {
    let installed: IndexSet<String> = get_plugins(cfg, policy)?
        .into_iter()
        .map(|plugin| plugin.name().to_string())
        .collect();

    let orphaned: IndexSet<String> = cfg
        .find_key(KEY_CONTENT)
        .map(|entry| entry.value().to_string())
        .filter(|name| !installed.contains(name))
        .collect();

    Ok(orphaned.into_iter().collect())
}

/// First installed plugin named `name`, scanning mods in `data`-entry
/// order. Absence is a common case, so this returns `Ok(None)` rather than
/// an error.
pub fn find_plugin(cfg: &ConfigFile, policy: &ScanPolicy, name: &str) -> Result<Option<Plugin>> {
    for m in cfg.get_mods() {
        if !m.is_installed() {
            continue;
        }
        for plugin in m.plugins(cfg, policy)? {
            if plugin.name() == name {
                return Ok(Some(plugin));
            }
        }
    }
    Ok(None)
}

/// Classify `name` into its logical plugin state.
pub fn plugin_state(cfg: &ConfigFile, policy: &ScanPolicy, name: &str) -> Result<PluginState> {
    match find_plugin(cfg, policy, name)? {
        Some(plugin) if plugin.is_enabled() => Ok(PluginState::Enabled),
        Some(_) => Ok(PluginState::Disabled),
        None => {
            let referenced = cfg.find_key(KEY_CONTENT).any(|entry| entry.value() == name);
            if referenced {
                Ok(PluginState::Orphaned)
            } else {
                Ok(PluginState::Untracked)
            }
        }
    }
}

/// Insert a new `data` entry immediately after the last existing one, or
/// at index 0 when none exist, and return the index used.
///
/// This is the only sanctioned write path for new `data` entries: it keeps
/// the `data` block contiguous, which the queries above may rely on.
/// Inserting a `data` entry anywhere else breaks that invariant.
pub fn insert_data_entry(cfg: &mut ConfigFile, entry: ConfigEntry) -> Result<usize> {
    let index = cfg
        .find_key(KEY_DATA)
        .last()
        .map(|last| last.position() + 1)
        .unwrap_or(0);
    cfg.insert(index, entry)?;
    Ok(index)
}
