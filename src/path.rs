//! Key-path addressing inside nested bencode dictionaries.
//!
//! A [`KeyPath`] is an ordered list of dictionary keys. [`resolve`] follows it
//! read-only; [`replace`] and [`insert`] consume a tree and return a new root
//! with one node swapped, moving every untouched subtree into the result.
//!
//! ```
//! use rbedit::bencode::Value;
//! use rbedit::path::{resolve, replace, KeyPath};
//!
//! let root = Value::dict([("info", Value::dict([("name", Value::string("a"))]))]);
//! let path = KeyPath::parse("info/name");
//!
//! assert_eq!(resolve(&root, &path).unwrap(), &Value::string("a"));
//!
//! let root = replace(root, &path, Value::string("b")).unwrap();
//! assert_eq!(resolve(&root, &path).unwrap(), &Value::string("b"));
//! ```

mod error;
mod key_path;
mod resolve;

pub use error::{PathError, PathErrorKind};
pub use key_path::KeyPath;
pub use resolve::{insert, replace, resolve};
