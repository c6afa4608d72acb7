use std::fmt;

/// Key for entries naming a mod's data directory.
pub const KEY_DATA: &str = "data";

/// Key for entries naming an enabled plugin file. The entry's position in
/// the config file is the plugin's load order.
pub const KEY_CONTENT: &str = "content";

/// One logical `key=value` line of an OpenMW config file.
///
/// The key and value are stored exactly as split on the first `=`, with no
/// trimming, so an unmodified file serializes back byte-for-byte. The
/// position indexes entries only (comments and blank lines do not count)
/// and is assigned by the owning [`ConfigFile`](super::ConfigFile), which
/// recomputes all positions on every structural mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    key: String,
    value: String,
    position: usize,
}

impl ConfigEntry {
    /// Create a detached entry. Its position is meaningless until it is
    /// inserted into a [`ConfigFile`](super::ConfigFile).
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            position: 0,
        }
    }

    /// Convenience constructor for a `data` entry.
    pub fn data(value: impl Into<String>) -> Self {
        Self::new(KEY_DATA, value)
    }

    /// Convenience constructor for a `content` entry.
    pub fn content(value: impl Into<String>) -> Self {
        Self::new(KEY_CONTENT, value)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Index of this entry among all entries of its file, in line order.
    pub fn position(&self) -> usize {
        self.position
    }

    pub(crate) fn set_position(&mut self, position: usize) {
        self.position = position;
    }

    pub fn is_data(&self) -> bool {
        self.key == KEY_DATA
    }

    pub fn is_content(&self) -> bool {
        self.key == KEY_CONTENT
    }
}

impl fmt::Display for ConfigEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}
