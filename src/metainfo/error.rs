use thiserror::Error;

/// Errors raised when a value does not have the shape of a torrent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetainfoError {
    /// A required field is missing from the torrent.
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// A field has an invalid value or type.
    #[error("invalid field: {0}")]
    InvalidField(&'static str),

    /// A hex string or byte slice is not a 20-byte digest.
    #[error("invalid info hash length")]
    InvalidInfoHashLength,
}
