use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors surfaced by the config model and the filesystem collaborators.
///
/// Lookups that find nothing are not errors in this domain; they return
/// `Option`/empty collections instead. Everything here is propagated to the
/// caller unmodified, with no internal retry.
#[derive(Debug, Error)]
pub enum Error {
    /// The target path does not exist.
    #[error("'{0}' does not exist")]
    NotFound(Utf8PathBuf),

    /// The operation expects a directory but the target is a file.
    #[error("'{0}' is not a directory")]
    NotADirectory(Utf8PathBuf),

    /// A config line does not match the `key=value` shape.
    #[error("malformed config line {line}: '{content}'")]
    Parse { line: usize, content: String },

    /// An insertion or removal index outside the valid bounds.
    #[error("index {index} out of bounds for {len} entries")]
    Index { index: usize, len: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Archive(#[from] zip::result::ZipError),
}

pub type Result<T> = std::result::Result<T, Error>;
