use crate::paths;
use crate::sources::ScanPolicy;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::fs;

/// Manager settings persisted as `omwmod.yaml`.
///
/// These are settings of the manager itself, not of OpenMW: where the
/// engine's config lives, where managed mods are installed to, and the
/// scan policy used to classify content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Path of the `openmw.cfg` this manager edits.
    #[serde(default = "default_openmw_config")]
    pub openmw_config: Utf8PathBuf,

    /// Directory that installed mods are copied/extracted into.
    #[serde(default = "default_mods_dir")]
    pub mods_dir: Utf8PathBuf,

    /// Filename heuristics for plugin and resource detection.
    #[serde(default)]
    pub scan: ScanPolicy,
}

fn default_openmw_config() -> Utf8PathBuf {
    paths::full_path("~/.config/openmw/openmw.cfg")
}

fn default_mods_dir() -> Utf8PathBuf {
    paths::full_path("~/.local/share/omwmod/mods")
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            openmw_config: default_openmw_config(),
            mods_dir: default_mods_dir(),
            scan: ScanPolicy::default(),
        }
    }
}

/// Loads and saves [`Settings`] in a settings directory.
#[derive(Debug, Clone)]
pub struct SettingsManager {
    settings_dir: Utf8PathBuf,
    settings_path: Utf8PathBuf,
}

impl SettingsManager {
    /// Create a manager rooted at `settings_dir`, creating the directory
    /// if needed.
    pub fn new<P: AsRef<Utf8Path>>(settings_dir: P) -> Result<Self> {
        let settings_dir = settings_dir.as_ref().to_path_buf();

        if !settings_dir.exists() {
            fs::create_dir_all(&settings_dir)
                .with_context(|| format!("Failed to create settings directory: {}", settings_dir))?;
        }

        Ok(Self {
            settings_path: settings_dir.join("omwmod.yaml"),
            settings_dir,
        })
    }

    /// Load the settings file, falling back to defaults when it does not
    /// exist yet.
    pub fn load(&self) -> Result<Settings> {
        if !self.settings_path.exists() {
            tracing::warn!(
                "Settings file not found at {}, using defaults",
                self.settings_path
            );
            return Ok(Settings::default());
        }

        let file_contents = fs::read_to_string(&self.settings_path)
            .with_context(|| format!("Failed to read settings: {}", self.settings_path))?;

        let settings: Settings = serde_yaml_ng::from_str(&file_contents)
            .with_context(|| format!("Failed to parse settings: {}", self.settings_path))?;

        tracing::info!("Loaded settings from {}", self.settings_path);
        Ok(settings)
    }

    /// Save the settings file.
    pub fn save(&self, settings: &Settings) -> Result<()> {
        let yaml_string =
            serde_yaml_ng::to_string(settings).context("Failed to serialize settings to YAML")?;

        fs::write(&self.settings_path, yaml_string)
            .with_context(|| format!("Failed to write settings: {}", self.settings_path))?;

        tracing::info!("Saved settings to {}", self.settings_path);
        Ok(())
    }

    /// The settings directory path.
    pub fn settings_dir(&self) -> &Utf8Path {
        &self.settings_dir
    }
}
