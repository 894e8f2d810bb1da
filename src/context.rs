//! Per-run state threaded through the action pipeline.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::error::Error;
use crate::metainfo::{InfoHash, TorrentSummary};

/// Reading state that no earlier stage produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("info hash not calculated")]
    NotComputed,
}

/// Side channel owned by one pipeline run and moved from stage to stage.
///
/// The cached info hash is not invalidated automatically: a caller that
/// replaces the hashed subtree must hash again before reading the cache.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationContext {
    info_hash: Option<InfoHash>,
    torrent_summary: Option<TorrentSummary>,
}

impl InvocationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// The hash stored by a hash action targeting [`ResultTarget::Metadata`].
    pub fn cached_info_hash(&self) -> Result<InfoHash, StateError> {
        self.info_hash.ok_or(StateError::NotComputed)
    }

    pub fn info_hash(&self) -> Option<&InfoHash> {
        self.info_hash.as_ref()
    }

    pub fn set_info_hash(&mut self, hash: InfoHash) {
        self.info_hash = Some(hash);
    }

    /// Summary attached by the torrent encoder, if it ran.
    pub fn torrent_summary(&self) -> Option<&TorrentSummary> {
        self.torrent_summary.as_ref()
    }

    pub(crate) fn set_torrent_summary(&mut self, summary: TorrentSummary) {
        self.torrent_summary = Some(summary);
    }
}

/// Where an action delivers its product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ResultTarget {
    /// Hand the product downstream in place of the value.
    #[default]
    Object,
    /// Store the product in the [`InvocationContext`] and pass the value on
    /// unchanged.
    Metadata,
}

impl FromStr for ResultTarget {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "object" => Ok(ResultTarget::Object),
            "metadata" => Ok(ResultTarget::Metadata),
            other => Err(Error::Configuration(format!(
                "unknown result target '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for ResultTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultTarget::Object => f.write_str("object"),
            ResultTarget::Metadata => f.write_str("metadata"),
        }
    }
}
