use super::*;
use crate::bencode::{decode, encode, Value};
use bytes::Bytes;
use sha1::{Digest, Sha1};

fn single_file_torrent() -> Value {
    Value::dict([(
        "info",
        Value::dict([
            ("name", Value::string("x")),
            ("piece length", Value::Integer(16384)),
            ("pieces", Value::string("")),
            ("length", Value::Integer(0)),
        ]),
    )])
}

fn multi_file_torrent() -> Value {
    let file = |length: i64, path: &[&str]| {
        Value::dict([
            ("length", Value::Integer(length)),
            (
                "path",
                Value::List(path.iter().map(|p| Value::string(p)).collect()),
            ),
        ])
    };

    Value::dict([
        ("announce", Value::string("http://a.example/announce")),
        (
            "announce-list",
            Value::List(vec![
                Value::List(vec![Value::string("http://a.example/announce")]),
                Value::List(vec![
                    Value::string("udp://b.example:80"),
                    Value::string("udp://c.example:80"),
                ]),
            ]),
        ),
        (
            "info",
            Value::dict([
                ("name", Value::string("dir")),
                ("piece length", Value::Integer(32768)),
                ("pieces", Value::Bytes(Bytes::from(vec![7u8; 40]))),
                ("private", Value::Integer(1)),
                (
                    "files",
                    Value::List(vec![file(100, &["a.txt"]), file(50, &["sub", "b.bin"])]),
                ),
            ]),
        ),
    ])
}

#[test]
fn test_hash_of_known_info_dict() {
    let info = Value::dict([("length", Value::Integer(1)), ("name", Value::string("a"))]);

    let expected: [u8; 20] = Sha1::digest(b"d6:lengthi1e4:name1:ae").into();
    assert_eq!(compute_hash(&info).unwrap().as_bytes(), &expected);
}

#[test]
fn test_hash_ignores_source_key_order() {
    let canonical = decode(b"d6:lengthi1e4:name1:ae").unwrap();
    let unsorted = decode(b"d4:name1:a6:lengthi1ee").unwrap();

    assert_eq!(
        compute_hash(&canonical).unwrap(),
        compute_hash(&unsorted).unwrap()
    );
}

#[test]
fn test_hash_stable_across_reencoding() {
    let value = multi_file_torrent();
    let reencoded = decode(&encode(&value).unwrap()).unwrap();
    assert_eq!(compute_hash(&value).unwrap(), compute_hash(&reencoded).unwrap());
}

#[test]
fn test_hash_matches_digest_of_encoding() {
    let info = decode(b"d5:filesld6:lengthi3e4:pathl1:a1:beee4:name1:xe").unwrap();
    let expected: [u8; 20] = Sha1::digest(encode(&info).unwrap()).into();
    assert_eq!(compute_hash(&info).unwrap().as_bytes(), &expected);
}

#[test]
fn test_info_hash_hex() {
    let hex = "0123456789abcdef0123456789abcdef01234567";
    let hash = InfoHash::from_hex(hex).unwrap();
    assert_eq!(hash.to_hex(), hex);
    assert_eq!(hash.to_string(), hex);
    assert_eq!(format!("{:?}", hash), format!("InfoHash({})", hex));
}

#[test]
fn test_info_hash_invalid_length() {
    assert_eq!(
        InfoHash::from_hex("abcd"),
        Err(MetainfoError::InvalidInfoHashLength)
    );
    assert_eq!(
        InfoHash::from_hex("zz23456789abcdef0123456789abcdef01234567"),
        Err(MetainfoError::InvalidInfoHashLength)
    );
    assert!(InfoHash::from_bytes(&[0u8; 32]).is_err());
}

#[test]
fn test_summary_single_file() {
    let summary = TorrentSummary::from_value(&single_file_torrent()).unwrap();

    assert_eq!(summary.name, "x");
    assert_eq!(summary.piece_length, 16384);
    assert_eq!(summary.piece_count, 0);
    assert_eq!(summary.total_length, 0);
    assert!(!summary.multi_file);
    assert_eq!(
        summary.files,
        vec![FileSummary {
            path: vec!["x".to_string()],
            length: 0
        }]
    );
    assert!(!summary.private);
    assert!(summary.announce.is_none());
}

#[test]
fn test_summary_multi_file() {
    let summary = TorrentSummary::from_value(&multi_file_torrent()).unwrap();

    assert!(summary.multi_file);
    assert!(summary.private);
    assert_eq!(summary.piece_count, 2);
    assert_eq!(summary.total_length, 150);
    assert_eq!(summary.files[1].path, vec!["sub", "b.bin"]);
    assert_eq!(summary.announce.as_deref(), Some("http://a.example/announce"));
    assert_eq!(summary.announce_list.len(), 2);
    assert_eq!(summary.announce_list[1][1], "udp://c.example:80");
}

#[test]
fn test_summary_requires_info() {
    let value = Value::dict([("name", Value::string("x"))]);
    assert_eq!(
        TorrentSummary::from_value(&value),
        Err(MetainfoError::MissingField("info"))
    );
    assert_eq!(
        TorrentSummary::from_value(&Value::Integer(1)),
        Err(MetainfoError::InvalidField("root"))
    );
}

#[test]
fn test_summary_rejects_bad_fields() {
    let with = |key: &str, value: Value| {
        crate::path::replace(
            single_file_torrent(),
            &["info", key].into_iter().collect(),
            value,
        )
        .unwrap()
    };

    assert_eq!(
        TorrentSummary::from_value(&with("pieces", Value::string("short"))),
        Err(MetainfoError::InvalidField("pieces"))
    );
    assert_eq!(
        TorrentSummary::from_value(&with("piece length", Value::Integer(0))),
        Err(MetainfoError::InvalidField("piece length"))
    );
    assert_eq!(
        TorrentSummary::from_value(&with("length", Value::Integer(-1))),
        Err(MetainfoError::InvalidField("length"))
    );
    assert_eq!(
        TorrentSummary::from_value(&with("name", Value::Integer(3))),
        Err(MetainfoError::InvalidField("name"))
    );
}

#[test]
fn test_summary_requires_exactly_one_layout() {
    let both = crate::path::insert(
        single_file_torrent(),
        &["info", "files"].into_iter().collect(),
        Value::List(vec![]),
    )
    .unwrap();
    assert_eq!(
        TorrentSummary::from_value(&both),
        Err(MetainfoError::InvalidField("length and files"))
    );

    let info = Value::dict([
        ("name", Value::string("x")),
        ("piece length", Value::Integer(1)),
        ("pieces", Value::string("")),
    ]);
    assert_eq!(
        TorrentSummary::from_value(&Value::dict([("info", info)])),
        Err(MetainfoError::MissingField("length or files"))
    );
}
