//! rbedit - inspect and edit BitTorrent metainfo files
//!
//! The crate reads bencoded documents, addresses nested dictionary entries by
//! key-path, replaces values, hashes subtrees and renders results. Work is
//! expressed as a pipeline of [`Action`]s ending in an [`Output`] sink; each
//! run threads one [`InvocationContext`] from stage to stage.
//!
//! # Modules
//!
//! - [`bencode`] - BEP-3 value model and canonical codec
//! - [`path`] - Key-path lookup, replace and insert
//! - [`metainfo`] - Info hash computation and torrent shape checks
//! - [`context`] - Per-run pipeline state and result targets
//! - [`action`] - Composable pipeline stages
//! - [`output`] - Encoders and output sinks
//!
//! # Example
//!
//! ```
//! use rbedit::{decode, Action, CollectOutput, InvocationContext, KeyPath, Output, Value};
//!
//! let torrent = decode(b"d4:infod6:lengthi1e4:name1:aee").unwrap();
//!
//! let mut get = Action::get(KeyPath::parse("info/name"), CollectOutput::new());
//! get.execute(InvocationContext::new(), torrent).unwrap();
//! assert_eq!(get.output().results()[0].1, Value::string("a"));
//! ```

pub mod action;
pub mod bencode;
pub mod constants;
pub mod context;
pub mod error;
pub mod metainfo;
pub mod output;
pub mod path;

pub use action::Action;
pub use bencode::{decode, encode, BencodeError, Value};
pub use context::{InvocationContext, ResultTarget, StateError};
pub use error::{Error, ErrorKind};
pub use metainfo::{compute_hash, InfoHash, MetainfoError, TorrentSummary};
pub use output::{CollectOutput, EncodeError, EncodeOutput, Encoder, Output};
pub use path::{KeyPath, PathError, PathErrorKind};
