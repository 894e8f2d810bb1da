use super::error::{PathError, PathErrorKind};
use super::key_path::KeyPath;
use crate::bencode::Value;
use crate::constants::MAX_DEPTH;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    Replace,
    Insert,
}

/// Follows `path` from `root` and returns the addressed node.
///
/// # Errors
///
/// - [`PathErrorKind::InvalidPath`] if a segment is empty
/// - [`PathErrorKind::TypeMismatch`] if a non-dictionary is reached before the
///   path is exhausted
/// - [`PathErrorKind::NotFound`] if a key is missing
pub fn resolve<'a>(root: &'a Value, path: &KeyPath) -> Result<&'a Value, PathError> {
    check_depth(path)?;

    let mut current = root;
    for (idx, segment) in path.iter().enumerate() {
        current = step(current, segment).map_err(|kind| PathError::new(kind, path.prefix(idx + 1)))?;
    }

    Ok(current)
}

/// Returns a new root with the node at `path` swapped for `value`.
///
/// Every ancestor dictionary on the path is rebuilt; siblings are moved over
/// unchanged. An empty path replaces the whole tree. The addressed key must
/// already exist.
pub fn replace(root: Value, path: &KeyPath, value: Value) -> Result<Value, PathError> {
    check_depth(path)?;
    swap_at(root, path, 0, value, Mode::Replace)
}

/// Like [`replace`], but the final key is created if it is missing.
///
/// All intermediate keys must exist. The empty path has no final key and is
/// rejected with [`PathErrorKind::InvalidPath`].
pub fn insert(root: Value, path: &KeyPath, value: Value) -> Result<Value, PathError> {
    if path.is_root() {
        return Err(PathError::new(PathErrorKind::InvalidPath, KeyPath::root()));
    }
    check_depth(path)?;
    swap_at(root, path, 0, value, Mode::Insert)
}

fn check_depth(path: &KeyPath) -> Result<(), PathError> {
    if path.len() > MAX_DEPTH {
        return Err(PathError::new(PathErrorKind::DepthExceeded, path.clone()));
    }
    Ok(())
}

fn step<'a>(node: &'a Value, segment: &str) -> Result<&'a Value, PathErrorKind> {
    if segment.is_empty() {
        return Err(PathErrorKind::InvalidPath);
    }

    let dict = node.as_dict().ok_or(PathErrorKind::TypeMismatch {
        found: node.type_name(),
    })?;

    dict.get(segment.as_bytes()).ok_or(PathErrorKind::NotFound)
}

fn swap_at(
    node: Value,
    path: &KeyPath,
    idx: usize,
    value: Value,
    mode: Mode,
) -> Result<Value, PathError> {
    let Some(segment) = path.get(idx) else {
        return Ok(value);
    };
    let fail = |kind: PathErrorKind| PathError::new(kind, path.prefix(idx + 1));

    if segment.is_empty() {
        return Err(fail(PathErrorKind::InvalidPath));
    }

    let found = node.type_name();
    let mut dict = node
        .into_dict()
        .ok_or_else(|| fail(PathErrorKind::TypeMismatch { found }))?;

    let is_last = idx + 1 == path.len();
    match dict.remove_entry(segment.as_bytes()) {
        Some((key, child)) => {
            let child = swap_at(child, path, idx + 1, value, mode)?;
            dict.insert(key, child);
        }
        None if is_last && mode == Mode::Insert => {
            dict.insert(bytes::Bytes::copy_from_slice(segment.as_bytes()), value);
        }
        None => return Err(fail(PathErrorKind::NotFound)),
    }

    Ok(Value::Dict(dict))
}
