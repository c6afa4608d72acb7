//! Property-based tests for the ordered configuration model
//!
//! Covers the file-level invariants: byte-exact round-trips, data-block
//! contiguity under the sanctioned insertion path, and the
//! enabled/disabled partition of installed plugins.

use camino::Utf8PathBuf;
use omwmod::models::KEY_DATA;
use omwmod::services::{
    get_disabled_plugins, get_enabled_plugins, get_plugins, insert_data_entry,
};
use omwmod::{ConfigEntry, ConfigFile, ScanPolicy};
use proptest::collection::{hash_map, vec};
use proptest::prelude::*;
use std::fs;
use tempfile::TempDir;

/// A line of config text that the loader accepts.
#[derive(Debug, Clone)]
enum GenLine {
    Pair(String, String),
    Comment(String),
    Blank,
}

fn gen_line() -> impl Strategy<Value = GenLine> {
    prop_oneof![
        4 => ("[a-z][a-z0-9-]{0,8}", "[ -~]{0,20}")
            .prop_map(|(k, v)| GenLine::Pair(k, v)),
        1 => "[ -~]{0,20}".prop_map(|c| GenLine::Comment(format!("# {}", c))),
        1 => Just(GenLine::Blank),
    ]
}

fn render(lines: &[GenLine], trailing_newline: bool) -> String {
    let mut text = String::new();
    for line in lines {
        match line {
            GenLine::Pair(key, value) => {
                text.push_str(key);
                text.push('=');
                text.push_str(value);
            }
            GenLine::Comment(comment) => text.push_str(comment),
            GenLine::Blank => {}
        }
        text.push('\n');
    }
    if !trailing_newline {
        text.pop();
    }
    text
}

proptest! {
    /// save(load(file)) reproduces the file byte for byte when nothing was
    /// mutated, comments, unrecognized keys, and a missing final newline
    /// included.
    #[test]
    fn round_trip_is_byte_exact(
        lines in vec(gen_line(), 0..20),
        trailing_newline in any::<bool>(),
    ) {
        let dir = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(dir.path().join("openmw.cfg")).unwrap();
        let original = render(&lines, trailing_newline);
        fs::write(&path, &original).unwrap();

        let cfg = ConfigFile::load(&path).unwrap();
        cfg.save().unwrap();

        prop_assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    /// Positions always match enumeration order, whatever the file shape.
    #[test]
    fn positions_match_entry_order(lines in vec(gen_line(), 0..20)) {
        let dir = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(dir.path().join("openmw.cfg")).unwrap();
        fs::write(&path, render(&lines, true)).unwrap();

        let cfg = ConfigFile::load(&path).unwrap();
        for (expected, entry) in cfg.entries().enumerate() {
            prop_assert_eq!(entry.position(), expected);
        }
    }

    /// Any sequence of insert_data_entry calls leaves the data entries
    /// index-contiguous, regardless of what other entries already exist.
    #[test]
    fn insert_data_entry_keeps_data_block_contiguous(
        others in vec(("[a-z][a-z0-9-]{0,6}", "[ -~]{0,12}"), 0..6),
        new_mods in vec("[a-z]{1,8}", 1..6),
    ) {
        let mut cfg = ConfigFile::new("unused.cfg");
        let mut index = 0;
        for (key, value) in &others {
            // Seed with non-data entries only; data entries must go
            // through insert_data_entry.
            if key.as_str() != KEY_DATA {
                cfg.insert(index, ConfigEntry::new(key.clone(), value.clone())).unwrap();
                index += 1;
            }
        }

        for name in &new_mods {
            insert_data_entry(&mut cfg, ConfigEntry::data(format!("/mods/{}", name))).unwrap();
        }

        let positions: Vec<usize> = cfg.find_key(KEY_DATA).map(|e| e.position()).collect();
        let first = positions[0];
        for (offset, position) in positions.iter().enumerate() {
            prop_assert_eq!(*position, first + offset);
        }
    }

    /// Enabled and disabled partition the installed plugins: their union
    /// is get_plugins and they are disjoint. Enabled orders strictly
    /// increase.
    #[test]
    fn enabled_disabled_partition_installed(
        plugins in hash_map("[a-z]{3,10}\\.esp", (any::<bool>(), any::<bool>()), 0..8),
    ) {
        let dir = TempDir::new().unwrap();
        let root = Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap();
        let mod_a = root.join("A");
        let mod_b = root.join("B");
        fs::create_dir(&mod_a).unwrap();
        fs::create_dir(&mod_b).unwrap();

        let mut cfg = ConfigFile::new(root.join("openmw.cfg"));
        insert_data_entry(&mut cfg, ConfigEntry::data(mod_a.as_str())).unwrap();
        insert_data_entry(&mut cfg, ConfigEntry::data(mod_b.as_str())).unwrap();

        let mut index = cfg.len();
        for (name, (in_second_mod, enabled)) in &plugins {
            let mod_dir = if *in_second_mod { &mod_b } else { &mod_a };
            fs::write(mod_dir.join(name), b"").unwrap();
            if *enabled {
                cfg.insert(index, ConfigEntry::content(name.clone())).unwrap();
                index += 1;
            }
        }

        let policy = ScanPolicy::default();
        let all = get_plugins(&cfg, &policy).unwrap();
        let enabled = get_enabled_plugins(&cfg, &policy).unwrap();
        let disabled = get_disabled_plugins(&cfg, &policy).unwrap();

        prop_assert_eq!(enabled.len() + disabled.len(), all.len());
        for plugin in &enabled {
            prop_assert!(all.contains(plugin));
            prop_assert!(!disabled.contains(plugin));
        }
        for plugin in &disabled {
            prop_assert!(all.contains(plugin));
        }

        let orders: Vec<usize> = enabled.iter().map(|p| p.order().unwrap()).collect();
        for pair in orders.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }

        // Every content entry has a provider here, so nothing is orphaned.
        let orphaned = omwmod::services::get_orphaned_plugins(&cfg, &policy).unwrap();
        prop_assert!(orphaned.is_empty());
    }
}
