use crate::error::Result;
use crate::models::config_file::ConfigFile;
use crate::models::entry::{ConfigEntry, KEY_CONTENT};
use crate::paths;
use crate::sources::{ModSource, ScanPolicy};
use camino::{Utf8Path, Utf8PathBuf};

/// A unit of installable content: a data directory (or archive) and the
/// plugin files inside it.
///
/// Mods are constructed on demand from a config file's `data` entries and
/// never persisted as objects; the persisted identity of a mod is the
/// `data` entry's value.
#[derive(Debug, Clone)]
pub struct Mod {
    path: Utf8PathBuf,
    source: ModSource,
    entry: Option<ConfigEntry>,
}

impl Mod {
    /// Build a mod from its `data` entry, expanding and normalizing the
    /// entry's value.
    pub fn from_entry(entry: &ConfigEntry) -> Self {
        let path = paths::full_path(entry.value());
        Self {
            source: ModSource::resolve(&path),
            path,
            entry: Some(entry.clone()),
        }
    }

    /// Build a mod from a bare path, e.g. content that is not tracked in
    /// any config file yet.
    pub fn from_path(path: impl AsRef<Utf8Path>) -> Self {
        let path = paths::full_path(path.as_ref().as_str());
        Self {
            source: ModSource::resolve(&path),
            path,
            entry: None,
        }
    }

    /// Absolute, normalized path of the mod's data directory or archive.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    pub fn source(&self) -> &ModSource {
        &self.source
    }

    /// The `data` entry this mod was built from, when tracked.
    pub fn entry(&self) -> Option<&ConfigEntry> {
        self.entry.as_ref()
    }

    /// True iff the mod's path currently exists on disk and is reachable
    /// by its source.
    pub fn is_installed(&self) -> bool {
        self.source.exists()
    }

    /// One [`Plugin`] per recognized plugin file in the source.
    ///
    /// Returns an empty Vec when the mod is not installed or contains no
    /// plugin files; a missing directory is not an error at this layer.
    pub fn plugins(&self, cfg: &ConfigFile, policy: &ScanPolicy) -> Result<Vec<Plugin>> {
        if !self.is_installed() {
            return Ok(Vec::new());
        }

        let plugins = self
            .source
            .plugin_files(policy)?
            .into_iter()
            .map(|name| {
                let order = cfg
                    .find_key(KEY_CONTENT)
                    .find(|entry| entry.value() == name)
                    .map(|entry| entry.position());
                Plugin {
                    name,
                    order,
                    mod_path: self.path.clone(),
                }
            })
            .collect();

        Ok(plugins)
    }
}

/// A load-order-bearing plugin file found inside an installed mod.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plugin {
    name: String,
    order: Option<usize>,
    mod_path: Utf8PathBuf,
}

impl Plugin {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position of the plugin's `content` entry in the config file, i.e.
    /// its load order. `None` when the plugin has no `content` entry.
    pub fn order(&self) -> Option<usize> {
        self.order
    }

    /// Enabled means listed as a `content` entry; there is no separate
    /// enable flag.
    pub fn is_enabled(&self) -> bool {
        self.order.is_some()
    }

    /// Path of the mod that provides this plugin. Lookup only, the plugin
    /// does not own the mod.
    pub fn mod_path(&self) -> &Utf8Path {
        &self.mod_path
    }
}

/// The logical states a plugin can be in. There is no direct "enable"
/// operation; transitions happen only through config mutation or
/// filesystem changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginState {
    /// No `content` entry and no installed mod provides the file.
    Untracked,
    /// An installed mod provides the file but no `content` entry exists.
    Disabled,
    /// An installed mod provides the file and a `content` entry orders it.
    Enabled,
    /// A `content` entry exists but no installed mod provides the file.
    Orphaned,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::entry::ConfigEntry;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_mod_from_entry_expands_value() {
        let entry = ConfigEntry::data("/mods/stuff/../Example");
        let m = Mod::from_entry(&entry);
        assert_eq!(m.path(), "/mods/Example");
        assert!(m.entry().is_some());
    }

    #[test]
    fn test_missing_mod_is_not_installed() {
        let m = Mod::from_path("/definitely/not/here");
        assert!(!m.is_installed());
    }

    #[test]
    fn test_uninstalled_mod_has_no_plugins() {
        let cfg = ConfigFile::new("unused.cfg");
        let m = Mod::from_path("/definitely/not/here");
        assert!(m.plugins(&cfg, &ScanPolicy::default()).unwrap().is_empty());
    }

    #[test]
    fn test_plugins_pick_up_content_order() {
        let dir = TempDir::new().unwrap();
        let mod_dir = dir.path().join("Example");
        fs::create_dir(&mod_dir).unwrap();
        fs::write(mod_dir.join("armor.esp"), b"").unwrap();

        let mut cfg = ConfigFile::new("unused.cfg");
        cfg.insert(0, ConfigEntry::data(mod_dir.to_str().unwrap())).unwrap();
        cfg.insert(1, ConfigEntry::content("armor.esp")).unwrap();

        let m = Mod::from_entry(cfg.get(0).unwrap());
        let plugins = m.plugins(&cfg, &ScanPolicy::default()).unwrap();
        assert_eq!(plugins.len(), 1);
        assert_eq!(plugins[0].name(), "armor.esp");
        assert_eq!(plugins[0].order(), Some(1));
        assert!(plugins[0].is_enabled());
        assert_eq!(plugins[0].mod_path(), m.path());
    }

    #[test]
    fn test_plugin_without_content_entry_is_disabled() {
        let dir = TempDir::new().unwrap();
        let mod_dir = dir.path().join("Example");
        fs::create_dir(&mod_dir).unwrap();
        fs::write(mod_dir.join("armor.esp"), b"").unwrap();

        let cfg = ConfigFile::new("unused.cfg");
        let m = Mod::from_path(mod_dir.to_str().unwrap());
        let plugins = m.plugins(&cfg, &ScanPolicy::default()).unwrap();
        assert_eq!(plugins[0].order(), None);
        assert!(!plugins[0].is_enabled());
    }
}
