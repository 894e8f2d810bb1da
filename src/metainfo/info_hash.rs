use super::error::MetainfoError;
use crate::bencode::{encode_to, BencodeError, Value};
use crate::constants::SHA1_LEN;
use sha1::{Digest, Sha1};
use std::fmt;

/// A 20-byte SHA1 digest of a canonically encoded value.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct InfoHash([u8; SHA1_LEN]);

/// Hashes the canonical encoding of `value`.
///
/// The canonical encoding is streamed straight into the digest, never the
/// bytes the value was decoded from, so the hash depends only on logical
/// content.
pub fn compute_hash(value: &Value) -> Result<InfoHash, BencodeError> {
    let mut hasher = Sha1::new();
    encode_to(value, &mut hasher)?;
    let hash = InfoHash(hasher.finalize().into());

    tracing::debug!(info_hash = %hash, "computed sha1");
    Ok(hash)
}

impl InfoHash {
    pub fn new(bytes: [u8; SHA1_LEN]) -> Self {
        Self(bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MetainfoError> {
        let arr: [u8; SHA1_LEN] = bytes
            .try_into()
            .map_err(|_| MetainfoError::InvalidInfoHashLength)?;
        Ok(Self(arr))
    }

    pub fn from_hex(s: &str) -> Result<Self, MetainfoError> {
        let bytes = hex_decode(s).ok_or(MetainfoError::InvalidInfoHashLength)?;
        Self::from_bytes(&bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SHA1_LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex_encode(&self.0)
    }
}

impl fmt::Debug for InfoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InfoHash({})", self.to_hex())
    }
}

impl fmt::Display for InfoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

pub(crate) fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut s, b| {
        use std::fmt::Write;
        let _ = write!(s, "{:02x}", b);
        s
    })
}

fn hex_decode(s: &str) -> Option<Vec<u8>> {
    if s.len() % 2 != 0 || !s.is_ascii() {
        return None;
    }
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).ok())
        .collect()
}
