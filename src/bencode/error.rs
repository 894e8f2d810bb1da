use thiserror::Error;

#[derive(Debug, Error)]
pub enum BencodeError {
    #[error("malformed bencode at offset {offset}: {reason}")]
    Malformed { offset: usize, reason: &'static str },

    #[error("integer out of range at offset {offset}")]
    Overflow { offset: usize },

    #[error("nesting too deep")]
    DepthExceeded,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl BencodeError {
    pub(super) fn malformed(offset: usize, reason: &'static str) -> Self {
        BencodeError::Malformed { offset, reason }
    }
}
