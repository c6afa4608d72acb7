use crate::error::{Error, Result};
use crate::models::entry::ConfigEntry;
use crate::models::mod_info::Mod;
use crate::paths;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use std::io::Write;
use tempfile::NamedTempFile;

/// One physical line of the config file.
///
/// Comments and blank lines are carried verbatim so that saving an
/// unmodified file reproduces it byte-for-byte. They hold no position;
/// only entries are indexable.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    Entry(ConfigEntry),
    Raw(String),
}

/// An ordered OpenMW config file: a sequence of `key=value` entries
/// interleaved with verbatim comment/blank lines.
///
/// Entry order is load-bearing: the position of each `content` entry is
/// that plugin's load order, and the position of a `data` entry decides
/// which mod provides a plugin. Positions are recomputed after every
/// structural mutation, so they always reflect the current line order.
///
/// Unrecognized keys pass through untouched and keep their relative
/// position on save.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    path: Utf8PathBuf,
    lines: Vec<Line>,
    /// Whether the source file ended with a newline; save reproduces it.
    trailing_newline: bool,
}

impl ConfigFile {
    /// Create an empty config file bound to `path`. Nothing is written
    /// until [`save`](Self::save) is called.
    pub fn new(path: impl AsRef<Utf8Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lines: Vec::new(),
            trailing_newline: true,
        }
    }

    /// Parse the file at `path`.
    ///
    /// Lines that are blank or whose first non-space character is `#` are
    /// preserved verbatim. Every other line must contain a `=`; a line
    /// that does not aborts the load with [`Error::Parse`]. The abort is
    /// deliberate: a half-read config would silently drop entries on the
    /// next save.
    pub fn load(path: impl AsRef<Utf8Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;

        let mut lines = Vec::new();
        let mut position = 0;
        for (line_no, raw) in text.lines().enumerate() {
            let trimmed = raw.trim_start();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                lines.push(Line::Raw(raw.to_string()));
                continue;
            }

            match raw.split_once('=') {
                Some((key, value)) => {
                    let mut entry = ConfigEntry::new(key, value);
                    entry.set_position(position);
                    position += 1;
                    lines.push(Line::Entry(entry));
                }
                None => {
                    return Err(Error::Parse {
                        line: line_no + 1,
                        content: raw.to_string(),
                    });
                }
            }
        }

        tracing::debug!("Loaded {} with {} entries", path, position);
        Ok(Self {
            path: path.to_path_buf(),
            lines,
            trailing_newline: text.is_empty() || text.ends_with('\n'),
        })
    }

    /// Serialize all lines back in order, atomically.
    ///
    /// The content is written to a temp file in the destination directory
    /// and then renamed over the target, so a crash mid-write never leaves
    /// a truncated config behind.
    pub fn save(&self) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_str().is_empty() => parent.as_std_path(),
            _ => Utf8Path::new(".").as_std_path(),
        };

        let mut tmp = NamedTempFile::new_in(dir)?;
        let last = self.lines.len().checked_sub(1);
        for (line_index, line) in self.lines.iter().enumerate() {
            match line {
                Line::Entry(entry) => write!(tmp, "{}", entry)?,
                Line::Raw(raw) => write!(tmp, "{}", raw)?,
            }
            if Some(line_index) != last || self.trailing_newline {
                writeln!(tmp)?;
            }
        }
        tmp.persist(self.path.as_std_path()).map_err(|e| e.error)?;

        tracing::debug!("Saved {} with {} entries", self.path, self.len());
        Ok(())
    }

    /// The path this file was loaded from or bound to.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Number of entries (comments and blank lines not counted).
    pub fn len(&self) -> usize {
        self.entries().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All entries in position order.
    pub fn entries(&self) -> impl Iterator<Item = &ConfigEntry> {
        self.lines.iter().filter_map(|line| match line {
            Line::Entry(entry) => Some(entry),
            Line::Raw(_) => None,
        })
    }

    /// The entry at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&ConfigEntry> {
        self.entries().nth(index)
    }

    /// Lazy, restartable sequence of entries whose key equals `key`, in
    /// file order. An empty file yields an empty sequence.
    pub fn find_key<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a ConfigEntry> {
        self.entries().filter(move |entry| entry.key() == key)
    }

    /// Insert `entry` at entry index `index`, shifting later entries by
    /// one. `index` may equal `len()` to append. Comment and blank lines
    /// keep their place; the new entry lands immediately before the line
    /// of entry `index`.
    pub fn insert(&mut self, index: usize, entry: ConfigEntry) -> Result<()> {
        let len = self.len();
        if index > len {
            return Err(Error::Index { index, len });
        }
        let line_index = self.line_index_of(index);
        self.lines.insert(line_index, Line::Entry(entry));
        self.reindex();
        Ok(())
    }

    /// Remove and return the entry at `index`.
    pub fn remove(&mut self, index: usize) -> Result<ConfigEntry> {
        let len = self.len();
        if index >= len {
            return Err(Error::Index { index, len });
        }
        let line_index = self.line_index_of(index);
        let removed = match self.lines.remove(line_index) {
            Line::Entry(entry) => entry,
            Line::Raw(_) => unreachable!("line_index_of returned a raw line"),
        };
        self.reindex();
        Ok(removed)
    }

    /// One [`Mod`] per `data` entry, in position order.
    pub fn get_mods(&self) -> Vec<Mod> {
        self.find_key(super::entry::KEY_DATA).map(Mod::from_entry).collect()
    }

    /// The `data` entry whose expanded value names `path`.
    ///
    /// When duplicate `data` entries reference the same path the LAST one
    /// wins.
    // TODO: revisit last-match; first-match may be the better contract for
    // duplicate data entries, but last-match is the historical behavior.
    pub fn get_mod_entry(&self, path: impl AsRef<Utf8Path>) -> Option<&ConfigEntry> {
        let wanted = paths::full_path(path.as_ref().as_str());
        self.find_key(super::entry::KEY_DATA)
            .filter(|entry| paths::full_path(entry.value()) == wanted)
            .last()
    }

    /// Map an entry index to its line index. `index == len()` maps to one
    /// past the last line.
    fn line_index_of(&self, index: usize) -> usize {
        let mut seen = 0;
        for (line_index, line) in self.lines.iter().enumerate() {
            if let Line::Entry(_) = line {
                if seen == index {
                    return line_index;
                }
                seen += 1;
            }
        }
        self.lines.len()
    }

    /// Rewrite all positions to match current line order. Called after
    /// every structural mutation.
    fn reindex(&mut self) {
        let mut position = 0;
        for line in &mut self.lines {
            if let Line::Entry(entry) = line {
                entry.set_position(position);
                position += 1;
            }
        }
    }
}
