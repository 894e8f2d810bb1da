use super::error::BencodeError;
use super::value::Value;
use crate::constants::MAX_DEPTH;
use bytes::Bytes;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// Decodes a single bencode value spanning all of `data`.
///
/// Dictionary keys are accepted in any order; they are re-sorted on encode.
///
/// # Errors
///
/// - [`BencodeError::Malformed`] for truncated input, bad tags, leading zeros,
///   duplicate keys or trailing data
/// - [`BencodeError::Overflow`] for integers outside the `i64` range
/// - [`BencodeError::DepthExceeded`] when nesting goes past the depth limit
///
/// # Examples
///
/// ```
/// use rbedit::bencode::{decode, Value};
///
/// let value = decode(b"d4:name1:ae").unwrap();
/// assert_eq!(value.get(b"name"), Some(&Value::string("a")));
/// assert!(decode(b"i42eextra").is_err());
/// ```
pub fn decode(data: &[u8]) -> Result<Value, BencodeError> {
    let mut pos = 0;
    let value = decode_value(data, &mut pos, 0)?;

    if pos != data.len() {
        return Err(BencodeError::malformed(pos, "trailing data after value"));
    }

    tracing::trace!(len = data.len(), "decoded bencode value");
    Ok(value)
}

fn decode_value(data: &[u8], pos: &mut usize, depth: usize) -> Result<Value, BencodeError> {
    if depth > MAX_DEPTH {
        return Err(BencodeError::DepthExceeded);
    }

    if *pos >= data.len() {
        return Err(BencodeError::malformed(*pos, "unexpected end of input"));
    }

    match data[*pos] {
        b'i' => decode_integer(data, pos),
        b'l' => decode_list(data, pos, depth),
        b'd' => decode_dict(data, pos, depth),
        b'0'..=b'9' => decode_bytes(data, pos).map(Value::Bytes),
        _ => Err(BencodeError::malformed(*pos, "invalid type tag")),
    }
}

fn decode_integer(data: &[u8], pos: &mut usize) -> Result<Value, BencodeError> {
    *pos += 1;

    let start = *pos;
    while *pos < data.len() && data[*pos] != b'e' {
        *pos += 1;
    }

    if *pos >= data.len() {
        return Err(BencodeError::malformed(start, "unterminated integer"));
    }

    let digits = &data[start..*pos];
    let unsigned = digits.strip_prefix(b"-").unwrap_or(digits);

    if unsigned.is_empty() || !unsigned.iter().all(u8::is_ascii_digit) {
        return Err(BencodeError::malformed(start, "invalid integer"));
    }

    if digits.starts_with(b"-0") || (unsigned.len() > 1 && unsigned[0] == b'0') {
        return Err(BencodeError::malformed(start, "integer has leading zeros"));
    }

    // Only ASCII digits and an optional sign remain, so the parse can only
    // fail on range.
    let value: i64 = std::str::from_utf8(digits)
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or(BencodeError::Overflow { offset: start })?;

    *pos += 1;
    Ok(Value::Integer(value))
}

fn decode_bytes(data: &[u8], pos: &mut usize) -> Result<Bytes, BencodeError> {
    let start = *pos;
    while *pos < data.len() && data[*pos].is_ascii_digit() {
        *pos += 1;
    }

    if *pos >= data.len() || data[*pos] != b':' {
        return Err(BencodeError::malformed(*pos, "invalid string length prefix"));
    }

    let len_digits = &data[start..*pos];
    if len_digits.len() > 1 && len_digits[0] == b'0' {
        return Err(BencodeError::malformed(start, "string length has leading zeros"));
    }

    let len: usize = std::str::from_utf8(len_digits)
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or(BencodeError::Overflow { offset: start })?;

    *pos += 1;

    let end = pos
        .checked_add(len)
        .filter(|end| *end <= data.len())
        .ok_or(BencodeError::malformed(*pos, "string runs past end of input"))?;

    let bytes = Bytes::copy_from_slice(&data[*pos..end]);
    *pos = end;

    Ok(bytes)
}

fn decode_list(data: &[u8], pos: &mut usize, depth: usize) -> Result<Value, BencodeError> {
    let start = *pos;
    *pos += 1;
    let mut list = Vec::new();

    while *pos < data.len() && data[*pos] != b'e' {
        list.push(decode_value(data, pos, depth + 1)?);
    }

    if *pos >= data.len() {
        return Err(BencodeError::malformed(start, "unterminated list"));
    }

    *pos += 1;
    Ok(Value::List(list))
}

fn decode_dict(data: &[u8], pos: &mut usize, depth: usize) -> Result<Value, BencodeError> {
    let start = *pos;
    *pos += 1;
    let mut dict = BTreeMap::new();

    while *pos < data.len() && data[*pos] != b'e' {
        let key_offset = *pos;
        if !data[*pos].is_ascii_digit() {
            return Err(BencodeError::malformed(key_offset, "dictionary key is not a string"));
        }
        let key = decode_bytes(data, pos)?;
        let value = decode_value(data, pos, depth + 1)?;

        match dict.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(value);
            }
            Entry::Occupied(_) => {
                return Err(BencodeError::malformed(key_offset, "duplicate dictionary key"));
            }
        }
    }

    if *pos >= data.len() {
        return Err(BencodeError::malformed(start, "unterminated dictionary"));
    }

    *pos += 1;
    Ok(Value::Dict(dict))
}
