use thiserror::Error;

use super::key_path::KeyPath;

/// Why a key-path could not be followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PathErrorKind {
    /// The key does not exist in the dictionary.
    #[error("key not found")]
    NotFound,

    /// An intermediate node is not a dictionary.
    #[error("expected dictionary, found {found}")]
    TypeMismatch { found: &'static str },

    /// A path segment is empty.
    #[error("empty key path element")]
    InvalidPath,

    /// The path is longer than any decodable tree could be deep.
    #[error("key path too deep")]
    DepthExceeded,
}

/// A key-path failure along with the prefix of the path that failed.
///
/// `path` ends with the segment that could not be followed, so a caller can
/// report exactly where the lookup stopped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at key path '{path}'")]
pub struct PathError {
    pub kind: PathErrorKind,
    pub path: KeyPath,
}

impl PathError {
    pub fn new(kind: PathErrorKind, path: KeyPath) -> Self {
        Self { kind, path }
    }
}
