use std::fmt::Write;

use super::encode::EncodeError;
use crate::bencode::Value;
use crate::constants::MAX_DEPTH;

const INDENT: &str = "  ";

/// Renders a value as indented text.
///
/// Dictionaries print as `{ "key": value }` blocks, lists as `[ ... ]`.
/// Byte strings that are printable UTF-8 are quoted; anything else (piece
/// hashes, binary node ids) prints as `<N bytes>`.
pub(super) fn sprint_value(value: &Value) -> Result<String, EncodeError> {
    let mut out = String::new();
    write_value(&mut out, value, 0)?;
    Ok(out)
}

/// Interprets `value` as a list of byte strings. Items are returned as raw
/// bytes; they are not required to be UTF-8.
pub(super) fn sprint_list_of_strings(value: &Value) -> Result<Vec<&[u8]>, EncodeError> {
    let list = value.as_list().ok_or(EncodeError::TypeMismatch {
        expected: "list of strings",
        found: value.type_name(),
    })?;

    list.iter()
        .map(|item| {
            item.as_bytes()
                .map(|b| &b[..])
                .ok_or(EncodeError::TypeMismatch {
                    expected: "string",
                    found: item.type_name(),
                })
        })
        .collect()
}

fn write_value(out: &mut String, value: &Value, depth: usize) -> Result<(), EncodeError> {
    if depth > MAX_DEPTH {
        return Err(EncodeError::DepthExceeded);
    }

    match value {
        Value::Integer(i) => {
            let _ = write!(out, "{}", i);
        }
        Value::Bytes(b) => write_bytes(out, b),
        Value::List(items) if items.is_empty() => out.push_str("[]"),
        Value::List(items) => {
            out.push_str("[\n");
            for (i, item) in items.iter().enumerate() {
                push_indent(out, depth + 1);
                write_value(out, item, depth + 1)?;
                if i + 1 < items.len() {
                    out.push(',');
                }
                out.push('\n');
            }
            push_indent(out, depth);
            out.push(']');
        }
        Value::Dict(entries) if entries.is_empty() => out.push_str("{}"),
        Value::Dict(entries) => {
            out.push_str("{\n");
            for (i, (key, item)) in entries.iter().enumerate() {
                push_indent(out, depth + 1);
                write_bytes(out, key);
                out.push_str(": ");
                write_value(out, item, depth + 1)?;
                if i + 1 < entries.len() {
                    out.push(',');
                }
                out.push('\n');
            }
            push_indent(out, depth);
            out.push('}');
        }
    }

    Ok(())
}

fn write_bytes(out: &mut String, bytes: &[u8]) {
    match std::str::from_utf8(bytes) {
        Ok(s) if !s.chars().any(|c| c.is_control() && c != '\n' && c != '\t') => {
            let _ = write!(out, "{:?}", s);
        }
        _ => {
            let _ = write!(out, "<{} bytes>", bytes.len());
        }
    }
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}
