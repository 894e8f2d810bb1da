//! Bencode encoding and decoding ([BEP-3]).
//!
//! Bencode is the serialization format of `.torrent` files.
//!
//! # Data Types
//!
//! | Type | Format | Example |
//! |------|--------|---------|
//! | Integer | `i<number>e` | `i42e` → 42 |
//! | Byte String | `<length>:<data>` | `4:spam` → "spam" |
//! | List | `l<items>e` | `l4:spami42ee` → ["spam", 42] |
//! | Dictionary | `d<key><value>...e` | `d3:foo3:bare` → {"foo": "bar"} |
//!
//! # Canonical form
//!
//! [`decode`] accepts dictionaries whose keys are out of order, as produced by
//! some third-party tools. [`encode`] always writes keys in ascending byte
//! order, so `encode` is a pure function of the logical value and
//! `decode(encode(v)) == v` holds for every [`Value`]. Re-encoding a
//! non-canonical file therefore changes its bytes but never its content.
//!
//! ```
//! use rbedit::bencode::{decode, encode};
//!
//! let unsorted = b"d4:name1:a6:lengthi1ee";
//! let value = decode(unsorted).unwrap();
//! assert_eq!(encode(&value).unwrap(), b"d6:lengthi1e4:name1:ae");
//! ```
//!
//! # Error Handling
//!
//! - [`BencodeError::Malformed`] - Bad syntax, with the byte offset
//! - [`BencodeError::Overflow`] - Integer outside the `i64` range
//! - [`BencodeError::DepthExceeded`] - Recursion limit exceeded (max 64 levels)
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html

mod decode;
mod encode;
mod error;
mod value;

pub use decode::decode;
pub use encode::{encode, encode_to};
pub use error::BencodeError;
pub use value::Value;
