use thiserror::Error;

use crate::bencode::BencodeError;
use crate::context::StateError;
use crate::metainfo::MetainfoError;
use crate::output::EncodeError;
use crate::path::{PathError, PathErrorKind};

/// Any failure of a decode, lookup, action or output stage.
#[derive(Debug, Error)]
pub enum Error {
    #[error("bencode error: {0}")]
    Bencode(#[from] BencodeError),

    #[error(transparent)]
    Path(#[from] PathError),

    #[error("not a valid torrent: {0}")]
    Validation(#[from] MetainfoError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error("cannot encode value: {0}")]
    Encoding(#[from] EncodeError),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of an [`Error`], for callers that map failures to
/// exit codes or messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Parse,
    Path,
    Validation,
    State,
    Encoding,
    Configuration,
    DepthExceeded,
    Io,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Bencode(BencodeError::DepthExceeded) => ErrorKind::DepthExceeded,
            Error::Bencode(BencodeError::Io(_)) => ErrorKind::Io,
            Error::Bencode(_) => ErrorKind::Parse,
            Error::Path(e) if e.kind == PathErrorKind::DepthExceeded => ErrorKind::DepthExceeded,
            Error::Path(_) => ErrorKind::Path,
            Error::Validation(_) => ErrorKind::Validation,
            Error::State(_) => ErrorKind::State,
            Error::Encoding(EncodeError::DepthExceeded) => ErrorKind::DepthExceeded,
            Error::Encoding(_) => ErrorKind::Encoding,
            Error::Configuration(_) => ErrorKind::Configuration,
            Error::Io(_) => ErrorKind::Io,
        }
    }

    /// The key-path a lookup failed at, for path errors.
    pub fn key_path(&self) -> Option<&crate::path::KeyPath> {
        match self {
            Error::Path(e) => Some(&e.path),
            _ => None,
        }
    }
}
