//! Torrent metainfo helpers ([BEP-3]).
//!
//! Two things live here:
//!
//! - [`compute_hash`] / [`InfoHash`] - the SHA1 digest of a value's canonical
//!   encoding. Applied to a torrent's `info` dictionary this is the info hash.
//! - [`TorrentSummary`] - structural facts checked and extracted from a
//!   torrent's root dictionary before it is written out as a `.torrent`.
//!
//! # Working with info hashes
//!
//! ```
//! use rbedit::bencode::Value;
//! use rbedit::metainfo::{compute_hash, InfoHash};
//!
//! let info = Value::dict([("length", Value::Integer(1)), ("name", Value::string("a"))]);
//! let hash = compute_hash(&info).unwrap();
//! assert_eq!(hash.as_bytes().len(), 20);
//! assert_eq!(InfoHash::from_hex(&hash.to_hex()).unwrap(), hash);
//! ```
//!
//! # Torrent Structure
//!
//! - **info** - Core torrent metadata (hashed to create the info hash)
//!   - `name` - Suggested file/directory name
//!   - `piece length` - Size of each piece in bytes
//!   - `pieces` - Concatenated SHA1 hashes of each piece
//!   - `length` - Total size (single-file) OR `files` list (multi-file)
//! - **announce** - Primary tracker URL
//! - **announce-list** - Additional tracker tiers (BEP-12)
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html

mod error;
mod info_hash;
mod torrent;

pub use error::MetainfoError;
pub use info_hash::{compute_hash, InfoHash};
pub(crate) use info_hash::hex_encode;
pub use torrent::{FileSummary, TorrentSummary};

#[cfg(test)]
mod tests;
