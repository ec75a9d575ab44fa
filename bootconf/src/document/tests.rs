//! Decoder coverage for both notations.
#![expect(
    clippy::expect_used,
    reason = "tests panic to surface configuration mistakes"
)]

use rstest::rstest;

use super::parse::locate;
use super::{Document, Notation, Number, Value};
use crate::BootError;

fn parse_err(text: &str, notation: Notation) -> BootError {
    let err = Document::parse(text, notation).expect_err("expected parse failure");
    std::sync::Arc::try_unwrap(err).expect("error should be uniquely owned")
}

#[test]
fn keys_keep_document_order() {
    let doc = Document::parse("zeta = 1\nalpha = 2\nmid = 3\n", Notation::Toml)
        .expect("valid toml");
    assert_eq!(doc.keys().collect::<Vec<_>>(), ["zeta", "alpha", "mid"]);

    let doc = Document::parse(r#"{"zeta": 1, "alpha": 2, "mid": 3}"#, Notation::Json)
        .expect("valid json");
    assert_eq!(doc.keys().collect::<Vec<_>>(), ["zeta", "alpha", "mid"]);
}

#[test]
fn nested_tables_decode_identically() {
    let toml = concat!(
        "name = \"demo\"\n",
        "ratio = 0.5\n",
        "debug = false\n",
        "tags = [\"a\", \"b\"]\n",
        "[files]\n",
        "\"https://x/a.py\" = \"\"\n",
    );
    let json = r#"{
        "name": "demo",
        "ratio": 0.5,
        "debug": false,
        "tags": ["a", "b"],
        "files": {"https://x/a.py": ""}
    }"#;
    let from_toml = Document::parse(toml, Notation::Toml).expect("valid toml");
    let from_json = Document::parse(json, Notation::Json).expect("valid json");
    assert_eq!(from_toml, from_json);
    assert_eq!(
        from_toml.get("ratio"),
        Some(&Value::Number(Number::Float(0.5)))
    );
}

#[test]
fn toml_datetime_becomes_string() {
    let doc = Document::parse("built = 1979-05-27T07:32:00Z", Notation::Toml)
        .expect("valid toml");
    assert_eq!(
        doc.get("built").and_then(Value::as_str),
        Some("1979-05-27T07:32:00Z")
    );
}

#[rstest]
#[case(r#"{"a": 1, "a": 2}"#, "duplicate key 'a'")]
#[case(r#"{"a": null}"#, "null values are not supported")]
#[case("[1, 2]", "mapping at the document root")]
fn json_rejections(#[case] text: &str, #[case] expected: &str) {
    match parse_err(text, Notation::Json) {
        BootError::Parse {
            notation, message, ..
        } => {
            assert_eq!(notation, Notation::Json);
            assert!(message.contains(expected), "unexpected message: {message}");
        }
        other => panic!("expected Parse, got {other:?}"),
    }
}

#[test]
fn json_errors_carry_location() {
    match parse_err("{\n  \"a\": tru\n}", Notation::Json) {
        BootError::Parse { location, .. } => {
            let loc = location.expect("json errors report a position");
            assert_eq!(loc.line, 2);
        }
        other => panic!("expected Parse, got {other:?}"),
    }
}

#[test]
fn toml_errors_carry_location() {
    match parse_err("a = 1\nb = \n", Notation::Toml) {
        BootError::Parse {
            notation, location, ..
        } => {
            assert_eq!(notation, Notation::Toml);
            let loc = location.expect("toml errors report a span");
            assert_eq!(loc.line, 2);
        }
        other => panic!("expected Parse, got {other:?}"),
    }
}

#[test]
fn toml_duplicate_keys_are_rejected() {
    assert!(matches!(
        parse_err("a = 1\na = 2\n", Notation::Toml),
        BootError::Parse { .. }
    ));
}

#[rstest]
#[case("abc", 0, 1, 1)]
#[case("abc", 2, 1, 3)]
#[case("ab\ncd", 3, 2, 1)]
#[case("ab\ncd\nef", 7, 3, 2)]
fn locate_maps_offsets(
    #[case] text: &str,
    #[case] offset: usize,
    #[case] line: usize,
    #[case] column: usize,
) {
    let loc = locate(text, offset);
    assert_eq!((loc.line, loc.column), (line, column));
}

#[test]
fn insert_replaces_in_place() {
    let mut doc: Document = [("a", 1_i64), ("b", 2)].into_iter().collect();
    let previous = doc.insert("a", 3_i64);
    assert_eq!(previous, Some(Value::from(1_i64)));
    assert_eq!(doc.keys().collect::<Vec<_>>(), ["a", "b"]);
    assert_eq!(doc.get("a"), Some(&Value::from(3_i64)));
}

#[test]
fn serializes_in_document_order() {
    let doc = Document::parse("b = 1\na = [true, \"x\"]\n", Notation::Toml).expect("valid toml");
    let json = serde_json::to_string(&doc).expect("serializable");
    assert_eq!(json, r#"{"b":1,"a":[true,"x"]}"#);
}

#[rstest]
#[case("x = nan")]
#[case("x = -inf")]
#[case("[t]\nx = [1.0, +inf]")]
fn non_finite_floats_are_rejected(#[case] text: &str) {
    match parse_err(text, Notation::Toml) {
        BootError::Parse {
            notation, message, ..
        } => {
            assert_eq!(notation, Notation::Toml);
            assert!(message.contains("non-finite"), "unexpected message: {message}");
        }
        other => panic!("expected Parse, got {other:?}"),
    }
}

#[test]
fn floats_compare_equal_to_themselves() {
    let doc = Document::parse("ratio = 0.1\nzero = -0.0", Notation::Toml).expect("valid toml");
    assert_eq!(doc, doc.clone());
    assert_ne!(Number::Float(0.0), Number::Float(-0.0));
    assert_ne!(Number::Float(1.0), Number::Integer(1));
}

#[test]
fn json_keeps_keys_that_look_like_toml_datetimes() {
    let doc = Document::parse(
        r#"{"meta": {"$__toml_private_datetime": "hello"}}"#,
        Notation::Json,
    )
    .expect("valid json");
    let meta = doc.get("meta").and_then(Value::as_table).expect("meta stays a mapping");
    assert_eq!(
        meta.get("$__toml_private_datetime").and_then(Value::as_str),
        Some("hello")
    );

    let nested = Document::parse(r#"{"$__toml_private_datetime": 3}"#, Notation::Json)
        .expect("non-string values are ordinary entries");
    assert_eq!(
        nested.get("$__toml_private_datetime"),
        Some(&Value::from(3_i64))
    );
}
