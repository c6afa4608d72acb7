//! Physical origins of mod content.
//!
//! A mod lives either in an extracted directory or inside a compressed
//! archive. [`ModSource`] is a closed two-variant dispatch over those
//! cases exposing the one capability the config model needs: enumerate
//! the plugin files the source contains. [`ScanPolicy`] carries the
//! filename heuristics and is plain replaceable data, not hard-wired
//! logic.

use crate::error::Result;
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::BufReader;

/// Filename heuristics used when scanning mod content.
///
/// The resource-folder list is a pragmatic approximation for "looks like a
/// mod data directory" and is intentionally data, so callers can swap in
/// their own policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanPolicy {
    /// Extensions of load-order-bearing plugin files, matched
    /// case-sensitively on the filename suffix.
    #[serde(default = "default_plugin_extensions")]
    pub plugin_extensions: Vec<String>,

    /// Well-known resource folder names, matched case-insensitively.
    #[serde(default = "default_resource_dirs")]
    pub resource_dirs: Vec<String>,
}

fn default_plugin_extensions() -> Vec<String> {
    [".esp", ".esm", ".omwaddon"].map(String::from).to_vec()
}

fn default_resource_dirs() -> Vec<String> {
    [
        "Textures", "Meshes", "Icons", "Fonts", "Sound", "BookArt", "Splash", "Video",
    ]
    .map(String::from)
    .to_vec()
}

impl Default for ScanPolicy {
    fn default() -> Self {
        Self {
            plugin_extensions: default_plugin_extensions(),
            resource_dirs: default_resource_dirs(),
        }
    }
}

impl ScanPolicy {
    /// True when `name` carries a recognized plugin extension.
    pub fn is_plugin_file(&self, name: &str) -> bool {
        self.plugin_extensions.iter().any(|ext| name.ends_with(ext.as_str()))
    }

    /// True when `name` is a recognized resource folder name.
    pub fn is_resource_dir(&self, name: &str) -> bool {
        self.resource_dirs.iter().any(|dir| dir.eq_ignore_ascii_case(name))
    }
}

/// The physical origin of a mod's files: a directory on disk or a
/// compressed archive. Exactly these two variants exist, so this is a
/// closed enum rather than a trait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModSource {
    Dir(Utf8PathBuf),
    Archive(Utf8PathBuf),
}

impl ModSource {
    /// Dispatch on what `path` currently is: a directory yields
    /// [`ModSource::Dir`], anything else (including a missing path that a
    /// later install may create) yields [`ModSource::Archive`].
    pub fn resolve(path: impl AsRef<Utf8Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        if path.is_dir() {
            Self::Dir(path)
        } else {
            Self::Archive(path)
        }
    }

    pub fn path(&self) -> &Utf8Path {
        match self {
            Self::Dir(path) | Self::Archive(path) => path,
        }
    }

    /// Whether the source is reachable on disk.
    pub fn exists(&self) -> bool {
        match self {
            Self::Dir(path) => path.is_dir(),
            Self::Archive(path) => path.is_file(),
        }
    }

    /// Enumerate plugin filenames contained in the source.
    ///
    /// Directories are scanned one level deep; archives are scanned by
    /// entry name at any depth, reporting basenames. No match is an empty
    /// Vec, not an error.
    pub fn plugin_files(&self, policy: &ScanPolicy) -> Result<Vec<String>> {
        match self {
            Self::Dir(path) => {
                let mut names = Vec::new();
                for dir_entry in fs::read_dir(path)? {
                    let dir_entry = dir_entry?;
                    if !dir_entry.file_type()?.is_file() {
                        continue;
                    }
                    let name = dir_entry.file_name().to_string_lossy().into_owned();
                    if policy.is_plugin_file(&name) {
                        names.push(name);
                    }
                }
                names.sort();
                Ok(names)
            }
            Self::Archive(path) => {
                let file = File::open(path)?;
                let archive = zip::ZipArchive::new(BufReader::new(file))?;

                let mut names = Vec::new();
                for entry_name in archive.file_names() {
                    let base = entry_name
                        .rsplit(['/', '\\'])
                        .next()
                        .unwrap_or(entry_name);
                    if policy.is_plugin_file(base) {
                        names.push(base.to_string());
                    }
                }
                names.sort();
                Ok(names)
            }
        }
    }
}

/// Shallow classification of a directory as mod content.
///
/// A directory qualifies when it directly contains either a plugin file or
/// a recognized resource folder. Single-level scan, never recursive; a
/// missing or unreadable path does not qualify.
pub fn is_mod_dir(path: impl AsRef<Utf8Path>, policy: &ScanPolicy) -> bool {
    let Ok(read_dir) = fs::read_dir(path.as_ref()) else {
        return false;
    };

    for dir_entry in read_dir.flatten() {
        let Ok(file_type) = dir_entry.file_type() else {
            continue;
        };
        let name = dir_entry.file_name().to_string_lossy().into_owned();
        if file_type.is_file() && policy.is_plugin_file(&name) {
            return true;
        }
        if file_type.is_dir() && policy.is_resource_dir(&name) {
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn utf8(path: &std::path::Path) -> Utf8PathBuf {
        Utf8PathBuf::try_from(path.to_path_buf()).unwrap()
    }

    fn write_zip(path: &std::path::Path, entries: &[&str]) {
        let file = File::create(path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default();
        for entry in entries {
            zip.start_file(*entry, options).unwrap();
            zip.write_all(b"").unwrap();
        }
        zip.finish().unwrap();
    }

    #[test]
    fn test_resolve_dispatches_on_is_dir() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("mod.zip");
        write_zip(&archive, &[]);

        assert!(matches!(ModSource::resolve(utf8(dir.path())), ModSource::Dir(_)));
        assert!(matches!(ModSource::resolve(utf8(&archive)), ModSource::Archive(_)));
    }

    #[test]
    fn test_dir_plugin_files_shallow_and_filtered() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("armor.esp"), b"").unwrap();
        std::fs::write(dir.path().join("base.esm"), b"").unwrap();
        std::fs::write(dir.path().join("readme.txt"), b"").unwrap();
        // Plugin file in a subdirectory must not be reported.
        std::fs::create_dir(dir.path().join("extras")).unwrap();
        std::fs::write(dir.path().join("extras/deep.esp"), b"").unwrap();

        let source = ModSource::resolve(utf8(dir.path()));
        let names = source.plugin_files(&ScanPolicy::default()).unwrap();
        assert_eq!(names, vec!["armor.esp", "base.esm"]);
    }

    #[test]
    fn test_extension_match_is_case_sensitive() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("armor.ESP"), b"").unwrap();

        let source = ModSource::resolve(utf8(dir.path()));
        assert!(source.plugin_files(&ScanPolicy::default()).unwrap().is_empty());
    }

    #[test]
    fn test_archive_plugin_files_report_basenames() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("mod.zip");
        write_zip(&archive, &["Data Files/armor.esp", "readme.txt", "extra.omwaddon"]);

        let source = ModSource::resolve(utf8(&archive));
        let names = source.plugin_files(&ScanPolicy::default()).unwrap();
        assert_eq!(names, vec!["armor.esp", "extra.omwaddon"]);
    }

    #[test]
    fn test_empty_source_yields_empty_vec() {
        let dir = TempDir::new().unwrap();
        let source = ModSource::resolve(utf8(dir.path()));
        assert!(source.plugin_files(&ScanPolicy::default()).unwrap().is_empty());
    }

    #[test]
    fn test_is_mod_dir_by_plugin_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("armor.esp"), b"").unwrap();
        assert!(is_mod_dir(utf8(dir.path()), &ScanPolicy::default()));
    }

    #[test]
    fn test_is_mod_dir_by_resource_folder_case_insensitive() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("tExTuReS")).unwrap();
        assert!(is_mod_dir(utf8(dir.path()), &ScanPolicy::default()));
    }

    #[test]
    fn test_is_mod_dir_rejects_plain_dir() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("readme.txt"), b"").unwrap();
        std::fs::create_dir(dir.path().join("unrelated")).unwrap();
        assert!(!is_mod_dir(utf8(dir.path()), &ScanPolicy::default()));
    }

    #[test]
    fn test_is_mod_dir_is_shallow() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("nested/Textures")).unwrap();
        assert!(!is_mod_dir(utf8(dir.path()), &ScanPolicy::default()));
    }

    #[test]
    fn test_is_mod_dir_missing_path() {
        assert!(!is_mod_dir("/definitely/not/here", &ScanPolicy::default()));
    }
}
