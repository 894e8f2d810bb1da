use super::*;
use crate::bencode::decode;
use crate::error::ErrorKind;
use crate::output::{CollectOutput, EncodeOutput, Encoder};
use crate::path::PathErrorKind;
use sha1::{Digest, Sha1};

fn torrent() -> Value {
    decode(b"d8:announce8:http://a4:infod6:lengthi1e4:name1:aee").unwrap()
}

fn key_path(segments: &[&str]) -> KeyPath {
    segments.iter().copied().collect()
}

fn expected_info_hash() -> [u8; 20] {
    Sha1::digest(b"d6:lengthi1e4:name1:ae").into()
}

struct FailingOutput;

impl Output for FailingOutput {
    fn execute(&mut self, _ctx: InvocationContext, _value: Value) -> Result<(), Error> {
        Err(Error::Configuration("sink failed".into()))
    }
}

#[test]
fn test_get_passes_subtree() {
    let mut action = Action::get(key_path(&["info", "name"]), CollectOutput::new());
    action.execute(InvocationContext::new(), torrent()).unwrap();

    assert_eq!(action.output().len(), 1);
    assert_eq!(action.output().results()[0].1, Value::string("a"));
}

#[test]
fn test_get_root_with_empty_path() {
    let mut action = Action::get(KeyPath::root(), CollectOutput::new());
    action.execute(InvocationContext::new(), torrent()).unwrap();
    assert_eq!(action.output().results()[0].1, torrent());
}

#[test]
fn test_resolution_failure_skips_output() {
    let mut action = Action::sha1(
        key_path(&["missing"]),
        ResultTarget::Object,
        CollectOutput::new(),
    );
    let err = action
        .execute(InvocationContext::new(), torrent())
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Path);
    assert_eq!(err.key_path(), Some(&key_path(&["missing"])));
    assert!(action.output().is_empty());
}

#[test]
fn test_type_mismatch_skips_output() {
    let mut action = Action::get(key_path(&["announce", "x"]), CollectOutput::new());
    let err = action
        .execute(InvocationContext::new(), torrent())
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Path(ref e) if e.kind == PathErrorKind::TypeMismatch { found: "string" }
    ));
    assert!(action.output().is_empty());
}

#[test]
fn test_sha1_into_object() {
    let mut action = Action::sha1(key_path(&["info"]), ResultTarget::Object, CollectOutput::new());
    action.execute(InvocationContext::new(), torrent()).unwrap();

    let (ctx, value) = &action.output().results()[0];
    assert_eq!(
        value.as_bytes().map(|b| b.as_ref()),
        Some(expected_info_hash().as_slice())
    );
    assert!(ctx.info_hash().is_none());
}

#[test]
fn test_sha1_of_root() {
    let mut action = Action::sha1(KeyPath::root(), ResultTarget::Object, CollectOutput::new());
    action.execute(InvocationContext::new(), torrent()).unwrap();

    let digest = compute_hash(&torrent()).unwrap();
    assert_eq!(action.output().results()[0].1, digest_value(&digest));
}

#[test]
fn test_sha1_into_metadata_passes_root() {
    let mut action = Action::calculate_info_hash(CollectOutput::new());
    action.execute(InvocationContext::new(), torrent()).unwrap();

    let (ctx, value) = &action.output().results()[0];
    assert_eq!(value, &torrent());
    assert_eq!(
        ctx.cached_info_hash().unwrap().as_bytes(),
        &expected_info_hash()
    );
}

#[test]
fn test_cached_hash_before_compute_fails() {
    let mut action = Action::cached_info_hash(CollectOutput::new());
    let err = action
        .execute(InvocationContext::new(), torrent())
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::State);
    assert!(action.output().is_empty());
}

#[test]
fn test_cached_hash_replays_same_digest() {
    let mut pipeline = Action::calculate_info_hash(Action::cached_info_hash(
        Action::cached_info_hash(CollectOutput::new()),
    ));
    pipeline.execute(InvocationContext::new(), torrent()).unwrap();

    let results = pipeline.output().output().output().results();
    assert_eq!(results.len(), 1);
    assert_eq!(
        results[0].1.as_bytes().map(|b| b.as_ref()),
        Some(expected_info_hash().as_slice())
    );
}

#[test]
fn test_cached_hash_into_metadata_is_configuration_error() {
    let mut ctx = InvocationContext::new();
    ctx.set_info_hash(InfoHash::new(expected_info_hash()));

    let mut action =
        Action::cached_info_hash(CollectOutput::new()).with_target(ResultTarget::Metadata);
    let err = action.execute(ctx, torrent()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(action.output().is_empty());
}

#[test]
fn test_get_into_metadata_is_configuration_error() {
    let mut action = Action::get(KeyPath::root(), CollectOutput::new())
        .with_target(ResultTarget::Metadata);
    let err = action
        .execute(InvocationContext::new(), torrent())
        .unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
}

#[test]
fn test_output_error_is_forwarded() {
    let mut action = Action::get(KeyPath::root(), FailingOutput);
    let err = action
        .execute(InvocationContext::new(), torrent())
        .unwrap_err();
    assert_eq!(err.to_string(), "configuration error: sink failed");
}

#[test]
fn test_replace_emits_new_root() {
    let mut action = Action::replace(
        key_path(&["info", "name"]),
        Value::string("b"),
        CollectOutput::new(),
    );
    action.execute(InvocationContext::new(), torrent()).unwrap();

    let value = &action.output().results()[0].1;
    assert_eq!(value.get(b"info").and_then(|i| i.get(b"name")), Some(&Value::string("b")));
    assert_eq!(value.get(b"announce"), torrent().get(b"announce"));
}

#[test]
fn test_replace_missing_key_fails_insert_succeeds() {
    let mut replace = Action::replace(
        key_path(&["comment"]),
        Value::string("hi"),
        CollectOutput::new(),
    );
    assert_eq!(
        replace
            .execute(InvocationContext::new(), torrent())
            .unwrap_err()
            .kind(),
        ErrorKind::Path
    );
    assert!(replace.output().is_empty());

    let mut insert = Action::insert(
        key_path(&["comment"]),
        Value::string("hi"),
        CollectOutput::new(),
    );
    insert.execute(InvocationContext::new(), torrent()).unwrap();
    assert_eq!(
        insert.output().results()[0].1.get(b"comment"),
        Some(&Value::string("hi"))
    );
}

#[test]
fn test_cache_is_stale_until_recomputed() {
    fn rename<O: Output>(output: O) -> Action<O> {
        Action::replace(key_path(&["info", "name"]), Value::string("b"), output)
    }

    let mut stale = Action::calculate_info_hash(rename(Action::cached_info_hash(
        CollectOutput::new(),
    )));
    stale.execute(InvocationContext::new(), torrent()).unwrap();
    let stale_digest = &stale.output().output().output().results()[0].1;
    assert_eq!(
        stale_digest.as_bytes().map(|b| b.as_ref()),
        Some(expected_info_hash().as_slice())
    );

    let mut fresh = Action::calculate_info_hash(rename(Action::calculate_info_hash(
        Action::cached_info_hash(CollectOutput::new()),
    )));
    fresh.execute(InvocationContext::new(), torrent()).unwrap();
    let fresh_digest = &fresh.output().output().output().output().results()[0].1;

    let renamed_info = Value::dict([("length", Value::Integer(1)), ("name", Value::string("b"))]);
    assert_eq!(
        fresh_digest,
        &digest_value(&compute_hash(&renamed_info).unwrap())
    );
    assert_ne!(fresh_digest, stale_digest);
}

#[test]
fn test_info_hash_pipeline_writes_hex() {
    let sink = EncodeOutput::new(Encoder::HexString, Vec::new());
    let mut pipeline = Action::calculate_info_hash(Action::cached_info_hash(sink));
    pipeline.execute(InvocationContext::new(), torrent()).unwrap();

    let written = pipeline.into_output().into_output().into_inner();
    let expected = format!("{}\n", InfoHash::new(expected_info_hash()).to_hex());
    assert_eq!(String::from_utf8(written).unwrap(), expected);
}
