use super::error::MetainfoError;
use crate::bencode::Value;
use crate::constants::{ANNOUNCE_LIST_KEY, INFO_KEY, SHA1_LEN};
use bytes::Bytes;
use std::collections::BTreeMap;

/// Structural facts about a torrent, derived from its root dictionary.
///
/// Deriving a summary is also the torrent shape check: a value that yields a
/// summary has an `info` dictionary with a name, a positive piece length, a
/// well-formed `pieces` string and either a single `length` or a `files` list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TorrentSummary {
    /// Suggested name for the file or directory.
    pub name: String,
    /// Number of bytes per piece.
    pub piece_length: u64,
    /// Number of 20-byte piece hashes in `pieces`.
    pub piece_count: usize,
    /// Total size of all files combined.
    pub total_length: u64,
    /// True when the info dictionary uses the `files` layout.
    pub multi_file: bool,
    /// Files in the torrent. Single-file torrents have one entry named after
    /// the torrent.
    pub files: Vec<FileSummary>,
    /// If true, clients should only use trackers in the metainfo (no DHT/PEX).
    pub private: bool,
    /// Primary tracker URL.
    pub announce: Option<String>,
    /// Multi-tier tracker list ([BEP-12](http://bittorrent.org/beps/bep_0012.html)).
    pub announce_list: Vec<Vec<String>>,
}

/// A file entry of a torrent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSummary {
    /// Path components relative to the torrent root.
    pub path: Vec<String>,
    /// Size of the file in bytes.
    pub length: u64,
}

impl TorrentSummary {
    /// Checks the torrent shape of `root` and extracts its summary.
    ///
    /// # Errors
    ///
    /// Returns [`MetainfoError::MissingField`] or [`MetainfoError::InvalidField`]
    /// naming the first field that does not fit.
    pub fn from_value(root: &Value) -> Result<Self, MetainfoError> {
        let dict = root.as_dict().ok_or(MetainfoError::InvalidField("root"))?;

        let info = dict
            .get(INFO_KEY.as_bytes())
            .ok_or(MetainfoError::MissingField("info"))?
            .as_dict()
            .ok_or(MetainfoError::InvalidField("info"))?;

        let name = info
            .get(b"name".as_slice())
            .ok_or(MetainfoError::MissingField("name"))?
            .as_bytes()
            .map(lossy_string)
            .ok_or(MetainfoError::InvalidField("name"))?;

        let piece_length = info
            .get(b"piece length".as_slice())
            .ok_or(MetainfoError::MissingField("piece length"))?
            .as_integer()
            .filter(|len| *len > 0)
            .ok_or(MetainfoError::InvalidField("piece length"))? as u64;

        let pieces = info
            .get(b"pieces".as_slice())
            .ok_or(MetainfoError::MissingField("pieces"))?
            .as_bytes()
            .ok_or(MetainfoError::InvalidField("pieces"))?;

        if pieces.len() % SHA1_LEN != 0 {
            return Err(MetainfoError::InvalidField("pieces"));
        }

        let private = info
            .get(b"private".as_slice())
            .and_then(|v| v.as_integer())
            .map(|v| v == 1)
            .unwrap_or(false);

        let (files, multi_file) = parse_files(info, &name)?;
        let total_length = files
            .iter()
            .try_fold(0u64, |total, f| total.checked_add(f.length))
            .ok_or(MetainfoError::InvalidField("length"))?;

        let announce = dict
            .get(b"announce".as_slice())
            .and_then(|v| v.as_bytes())
            .map(lossy_string);

        let announce_list = dict
            .get(ANNOUNCE_LIST_KEY.as_bytes())
            .and_then(|v| v.as_list())
            .map(|tiers| {
                tiers
                    .iter()
                    .filter_map(|tier| {
                        tier.as_list().map(|urls| {
                            urls.iter()
                                .filter_map(|u| u.as_bytes().map(lossy_string))
                                .collect()
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            name,
            piece_length,
            piece_count: pieces.len() / SHA1_LEN,
            total_length,
            multi_file,
            files,
            private,
            announce,
            announce_list,
        })
    }
}

fn parse_files(
    info: &BTreeMap<Bytes, Value>,
    name: &str,
) -> Result<(Vec<FileSummary>, bool), MetainfoError> {
    let length = info.get(b"length".as_slice());
    let files = info.get(b"files".as_slice());

    match (length, files) {
        (Some(length), None) => {
            let length = non_negative(length, "length")?;
            let file = FileSummary {
                path: vec![name.to_string()],
                length,
            };
            Ok((vec![file], false))
        }
        (None, Some(files)) => {
            let files = files
                .as_list()
                .ok_or(MetainfoError::InvalidField("files"))?
                .iter()
                .map(parse_file_entry)
                .collect::<Result<Vec<_>, _>>()?;
            Ok((files, true))
        }
        (Some(_), Some(_)) => Err(MetainfoError::InvalidField("length and files")),
        (None, None) => Err(MetainfoError::MissingField("length or files")),
    }
}

fn parse_file_entry(value: &Value) -> Result<FileSummary, MetainfoError> {
    let entry = value
        .as_dict()
        .ok_or(MetainfoError::InvalidField("files"))?;

    let length = non_negative(
        entry
            .get(b"length".as_slice())
            .ok_or(MetainfoError::MissingField("file length"))?,
        "file length",
    )?;

    let path = entry
        .get(b"path".as_slice())
        .ok_or(MetainfoError::MissingField("file path"))?
        .as_list()
        .filter(|segments| !segments.is_empty())
        .ok_or(MetainfoError::InvalidField("file path"))?
        .iter()
        .map(|segment| {
            segment
                .as_bytes()
                .map(lossy_string)
                .ok_or(MetainfoError::InvalidField("file path"))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FileSummary { path, length })
}

fn non_negative(value: &Value, field: &'static str) -> Result<u64, MetainfoError> {
    value
        .as_integer()
        .and_then(|v| u64::try_from(v).ok())
        .ok_or(MetainfoError::InvalidField(field))
}

fn lossy_string(bytes: &Bytes) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
