use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::print::{sprint_list_of_strings, sprint_value};
use crate::bencode::{encode, Value};
use crate::context::InvocationContext;
use crate::error::Error;
use crate::metainfo::TorrentSummary;

/// The value does not have the shape a render variant needs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("nesting too deep")]
    DepthExceeded,
}

/// How a final value is turned into bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoder {
    /// Canonical bencode.
    Bencode,
    /// Canonical bencode of a value that passed the torrent shape check.
    Torrent,
    /// Indented human-readable text. Not meant to be parsed back.
    Print,
    /// A list of strings, one per line.
    PrintList,
    /// A list of string lists, as `<index>: <string>` lines.
    PrintListOfLists,
    /// A single byte string as lowercase hex.
    HexString,
}

impl Encoder {
    /// Encodes `value`, returning the context with anything this stage added.
    ///
    /// [`Encoder::Torrent`] derives a [`TorrentSummary`] first and stores it in
    /// the context; if the value is not a torrent nothing is encoded.
    pub fn encode(
        &self,
        mut ctx: InvocationContext,
        value: &Value,
    ) -> Result<(InvocationContext, Vec<u8>), Error> {
        let bytes = match self {
            Encoder::Bencode => encode(value)?,
            Encoder::Torrent => {
                let summary = TorrentSummary::from_value(value)?;
                tracing::debug!(
                    name = %summary.name,
                    multi_file = summary.multi_file,
                    pieces = summary.piece_count,
                    "validated torrent"
                );
                ctx.set_torrent_summary(summary);
                encode(value)?
            }
            Encoder::Print => sprint_value(value)?.into_bytes(),
            Encoder::PrintList => sprint_list_of_strings(value)?.join(&b'\n'),
            Encoder::PrintListOfLists => {
                let outer = value.as_list().ok_or(EncodeError::TypeMismatch {
                    expected: "list of lists",
                    found: value.type_name(),
                })?;

                let mut lines: Vec<Vec<u8>> = Vec::new();
                for (idx, inner) in outer.iter().enumerate() {
                    for s in sprint_list_of_strings(inner)? {
                        let mut line = format!("{}: ", idx).into_bytes();
                        line.extend_from_slice(s);
                        lines.push(line);
                    }
                }
                lines.join(&b'\n')
            }
            Encoder::HexString => {
                let bytes = value.as_bytes().ok_or(EncodeError::TypeMismatch {
                    expected: "string",
                    found: value.type_name(),
                })?;
                crate::metainfo::hex_encode(bytes).into_bytes()
            }
        };

        Ok((ctx, bytes))
    }

    /// True for the encoders that produce text rather than bencode.
    pub fn is_text(&self) -> bool {
        !matches!(self, Encoder::Bencode | Encoder::Torrent)
    }
}

impl FromStr for Encoder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bencode" => Ok(Encoder::Bencode),
            "torrent" => Ok(Encoder::Torrent),
            "print" => Ok(Encoder::Print),
            "list" => Ok(Encoder::PrintList),
            "list-of-lists" => Ok(Encoder::PrintListOfLists),
            "hex" => Ok(Encoder::HexString),
            other => Err(Error::Configuration(format!("unknown encoder '{}'", other))),
        }
    }
}

impl fmt::Display for Encoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Encoder::Bencode => "bencode",
            Encoder::Torrent => "torrent",
            Encoder::Print => "print",
            Encoder::PrintList => "list",
            Encoder::PrintListOfLists => "list-of-lists",
            Encoder::HexString => "hex",
        };
        f.write_str(name)
    }
}
