use std::fmt;

use crate::constants::KEY_PATH_SEPARATOR;

/// An ordered sequence of dictionary keys, outermost first.
///
/// The empty path addresses the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct KeyPath(Vec<String>);

impl KeyPath {
    /// The empty path.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn new(segments: Vec<String>) -> Self {
        Self(segments)
    }

    /// Splits `s` on `/`. The empty string parses to the root path; any other
    /// empty segment is kept and will be rejected when the path is followed.
    ///
    /// ```
    /// use rbedit::path::KeyPath;
    ///
    /// assert_eq!(KeyPath::parse("info/name").segments(), ["info", "name"]);
    /// assert!(KeyPath::parse("").is_root());
    /// ```
    pub fn parse(s: &str) -> Self {
        if s.is_empty() {
            return Self::root();
        }
        s.split(KEY_PATH_SEPARATOR).collect()
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    /// The first `len` segments of this path.
    pub fn prefix(&self, len: usize) -> KeyPath {
        Self(self.0[..len.min(self.0.len())].to_vec())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "{}", KEY_PATH_SEPARATOR);
        }
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", KEY_PATH_SEPARATOR)?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

impl From<Vec<String>> for KeyPath {
    fn from(segments: Vec<String>) -> Self {
        Self(segments)
    }
}

impl<S: Into<String>> FromIterator<S> for KeyPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
