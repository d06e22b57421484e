use std::io;
use std::path::{Path, PathBuf};

use fstore_codec::CodecError;
use fstore_types::ValidationError;

/// Errors from store operations.
///
/// A missing key is never an error: reads report it as `None`/`false` and
/// deletes treat it as already done.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The key or value was rejected before any I/O.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The codec cannot represent the value.
    #[error("encoding error for key {key:?}: {source}")]
    Encoding { key: String, source: CodecError },

    /// The stored bytes do not decode into the requested type.
    #[error("decoding error for key {key:?}: {source}")]
    Decoding { key: String, source: CodecError },

    /// Filesystem failure other than not-found.
    #[error("I/O error at {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    /// The configuration could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// A background task panicked or was cancelled.
    #[error("task failed: {0}")]
    Task(String),
}

impl StoreError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Returns `true` for rejected keys or values (caller bugs, never worth retrying).
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns `true` for filesystem failures, which may succeed after remediation.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
