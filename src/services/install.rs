//! Filesystem collaborators: copying, deleting, and extracting mod
//! content, plus the install/uninstall flows that tie them to the config
//! model.
//!
//! Directory removal is irreversible, so everything here validates its
//! target before acting and fails fast rather than attempting partial
//! cleanup. Nothing in this module retries.

use crate::error::{Error, Result};
use crate::models::entry::ConfigEntry;
use crate::models::{ConfigFile, Mod};
use crate::paths;
use crate::services::query::insert_data_entry;
use crate::sources::{ModSource, ScanPolicy, is_mod_dir};
use camino::Utf8Path;
use std::fs::{self, File};
use std::io::BufReader;
use walkdir::WalkDir;

/// Recursively copy the directory tree at `src` into `dst`.
pub fn copy_dir(src: impl AsRef<Utf8Path>, dst: impl AsRef<Utf8Path>) -> Result<()> {
    let src = src.as_ref();
    let dst = dst.as_ref();

    if !src.exists() {
        return Err(Error::NotFound(src.to_path_buf()));
    }
    if !src.is_dir() {
        return Err(Error::NotADirectory(src.to_path_buf()));
    }

    for walk_entry in WalkDir::new(src.as_std_path()) {
        let walk_entry = walk_entry.map_err(std::io::Error::from)?;
        let relative = walk_entry
            .path()
            .strip_prefix(src.as_std_path())
            .expect("walkdir yields paths under its root");
        let target = dst.as_std_path().join(relative);

        if walk_entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(walk_entry.path(), &target)?;
        }
    }

    Ok(())
}

/// Delete a mod directory.
///
/// The most dangerous operation in the crate: deletion is irreversible and
/// there is no staging or undo. The target must exist and be a directory;
/// anything else fails before a single file is touched.
pub fn rm_mod_dir(mod_dir: impl AsRef<Utf8Path>) -> Result<()> {
    let mod_dir = mod_dir.as_ref();

    if !mod_dir.exists() {
        return Err(Error::NotFound(mod_dir.to_path_buf()));
    }
    if !mod_dir.is_dir() {
        return Err(Error::NotADirectory(mod_dir.to_path_buf()));
    }

    tracing::info!("Removing mod directory {}", mod_dir);
    fs::remove_dir_all(mod_dir)?;
    Ok(())
}

/// Extract a zip archive into `dst`, creating it as needed.
pub fn extract_archive(archive: impl AsRef<Utf8Path>, dst: impl AsRef<Utf8Path>) -> Result<()> {
    let archive = archive.as_ref();
    let dst = dst.as_ref();

    if !archive.exists() {
        return Err(Error::NotFound(archive.to_path_buf()));
    }

    let file = File::open(archive)?;
    let mut zip = zip::ZipArchive::new(BufReader::new(file))?;
    fs::create_dir_all(dst)?;
    zip.extract(dst.as_std_path())?;

    tracing::info!("Extracted {} into {}", archive, dst);
    Ok(())
}

/// Install the mod at `src` under `mods_dir` and track it in `cfg`.
///
/// A directory source is copied, an archive source extracted; either way
/// the destination is `mods_dir/<source name>`. The new `data` entry goes
/// through [`insert_data_entry`] so the `data` block stays contiguous. The
/// caller decides when to save `cfg`.
pub fn install_mod(
    cfg: &mut ConfigFile,
    src: impl AsRef<Utf8Path>,
    mods_dir: impl AsRef<Utf8Path>,
    policy: &ScanPolicy,
) -> Result<Mod> {
    let src = paths::full_path(src.as_ref().as_str());
    let mods_dir = mods_dir.as_ref();

    if !src.exists() {
        return Err(Error::NotFound(src.clone()));
    }

    let (dest, source) = match ModSource::resolve(&src) {
        ModSource::Dir(path) => {
            if !is_mod_dir(&path, policy) {
                tracing::warn!("{} does not look like a mod data directory", path);
            }
            let name = path.file_name().unwrap_or("mod");
            let dest = mods_dir.join(name);
            copy_dir(&path, &dest)?;
            (dest, "directory")
        }
        ModSource::Archive(path) => {
            let name = path.file_stem().unwrap_or("mod");
            let dest = mods_dir.join(name);
            extract_archive(&path, &dest)?;
            (dest, "archive")
        }
    };

    let index = insert_data_entry(cfg, ConfigEntry::data(dest.as_str()))?;
    tracing::info!("Installed {} from {} source at entry {}", dest, source, index);

    let entry = cfg.get(index).expect("entry was just inserted");
    Ok(Mod::from_entry(entry))
}

/// Untrack and delete the mod at `path`.
///
/// The directory is validated first, so a missing or non-directory target
/// errors out with the config untouched. The mod's `data` entry (last
/// match when duplicated) is removed before the directory goes away;
/// `content` entries are left behind deliberately, surfacing as orphans
/// the caller can inspect.
pub fn uninstall_mod(cfg: &mut ConfigFile, path: impl AsRef<Utf8Path>) -> Result<()> {
    let path = paths::full_path(path.as_ref().as_str());

    if !path.exists() {
        return Err(Error::NotFound(path.clone()));
    }
    if !path.is_dir() {
        return Err(Error::NotADirectory(path.clone()));
    }

    let index = cfg.get_mod_entry(&path).map(|entry| entry.position());
    if let Some(index) = index {
        cfg.remove(index)?;
    }

    rm_mod_dir(&path)
}
