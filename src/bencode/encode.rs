use super::error::BencodeError;
use super::value::Value;
use crate::constants::MAX_DEPTH;
use std::io::Write;

/// Encodes a bencode value to its canonical byte form.
///
/// The output is a pure function of the value:
/// - Integers: `i<number>e`
/// - Byte strings: `<length>:<data>`
/// - Lists: `l<items>e`
/// - Dictionaries: `d<key><value>...e` (keys in ascending byte order)
///
/// # Errors
///
/// Returns [`BencodeError::DepthExceeded`] if the value nests deeper than the
/// decoder would accept.
///
/// # Examples
///
/// ```
/// use rbedit::bencode::{encode, Value};
///
/// let value = Value::dict([("name", Value::string("a")), ("length", Value::Integer(1))]);
/// assert_eq!(encode(&value).unwrap(), b"d6:lengthi1e4:name1:ae");
///
/// let list = Value::List(vec![Value::Integer(1), Value::string("two")]);
/// assert_eq!(encode(&list).unwrap(), b"li1e3:twoe");
/// ```
pub fn encode(value: &Value) -> Result<Vec<u8>, BencodeError> {
    let mut buf = Vec::new();
    encode_to(value, &mut buf)?;
    Ok(buf)
}

/// Streams the canonical encoding of `value` into `writer`.
///
/// Used by the hash engine to feed a digest without an intermediate buffer.
pub fn encode_to<W: Write>(value: &Value, writer: &mut W) -> Result<(), BencodeError> {
    encode_value(value, writer, 0)
}

fn encode_value<W: Write>(value: &Value, writer: &mut W, depth: usize) -> Result<(), BencodeError> {
    if depth > MAX_DEPTH {
        return Err(BencodeError::DepthExceeded);
    }

    match value {
        Value::Integer(i) => {
            write!(writer, "i{}e", i)?;
        }
        Value::Bytes(b) => {
            write!(writer, "{}:", b.len())?;
            writer.write_all(b)?;
        }
        Value::List(l) => {
            writer.write_all(b"l")?;
            for item in l {
                encode_value(item, writer, depth + 1)?;
            }
            writer.write_all(b"e")?;
        }
        Value::Dict(d) => {
            // BTreeMap iterates in ascending key order, which is the
            // canonical order.
            writer.write_all(b"d")?;
            for (key, val) in d {
                write!(writer, "{}:", key.len())?;
                writer.write_all(key)?;
                encode_value(val, writer, depth + 1)?;
            }
            writer.write_all(b"e")?;
        }
    }
    Ok(())
}
