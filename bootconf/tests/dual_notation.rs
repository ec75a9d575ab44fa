//! Equivalent TOML and JSON sources must resolve identically.
#![expect(
    clippy::expect_used,
    reason = "tests panic to surface configuration mistakes"
)]

use bootconf::{Document, Notation, Resolver};
use rstest::rstest;
use test_helpers::fixtures::{self, NotationPair};

#[rstest]
#[case(fixtures::EMPTY)]
#[case(fixtures::PACKAGES)]
#[case(fixtures::FILES)]
#[case(fixtures::EXTRA)]
fn both_notations_decode_to_the_same_tree(#[case] pair: NotationPair) {
    let from_toml = Document::parse(pair.toml, Notation::Toml).expect("toml decodes");
    let from_json = Document::parse(pair.json, Notation::Json).expect("json decodes");
    assert_eq!(from_toml, from_json, "fixture {}", pair.name);
}

#[rstest]
#[case(fixtures::EMPTY)]
#[case(fixtures::PACKAGES)]
#[case(fixtures::FILES)]
#[case(fixtures::EXTRA)]
fn both_notations_resolve_to_the_same_configuration(#[case] pair: NotationPair) {
    let resolver = Resolver::default();
    let from_toml = resolver
        .resolve_text(pair.toml, Notation::Toml)
        .expect("toml resolves");
    let from_json = resolver
        .resolve_text(pair.json, Notation::Json)
        .expect("json resolves");
    assert_eq!(from_toml, from_json, "fixture {}", pair.name);
    assert_eq!(
        serde_json::to_string(&from_toml).expect("serialize toml result"),
        serde_json::to_string(&from_json).expect("serialize json result"),
        "fixture {}",
        pair.name
    );
}

#[test]
fn fixture_table_covers_every_pair() {
    let names: Vec<_> = fixtures::ALL.iter().map(|pair| pair.name).collect();
    assert_eq!(names, ["empty", "packages", "files", "extra"]);
}

#[test]
fn files_fixture_resolves_expected_entries() {
    let config = Resolver::default()
        .resolve_text(fixtures::FILES.toml, Notation::Toml)
        .expect("resolves");
    let pairs: Vec<_> = config
        .files()
        .iter()
        .map(|entry| (entry.source(), entry.destination()))
        .collect();
    assert_eq!(
        pairs,
        [
            ("https://example.com/a/b/c.py", "c.py"),
            ("https://example.com/a/b/d.txt", "./data/d.txt"),
            ("https://example.com/raw/notes.md", "docs/readme.md"),
        ]
    );
}

#[test]
fn serialized_configuration_keeps_extra_keys_in_source_order() {
    let config = Resolver::default()
        .resolve_text(fixtures::EXTRA.json, Notation::Json)
        .expect("resolves");
    let json = serde_json::to_value(&config).expect("serialize");
    let extra = json
        .get("extra")
        .and_then(serde_json::Value::as_object)
        .expect("extra object");
    assert_eq!(extra.get("ratio"), Some(&serde_json::json!(1.5)));
    assert_eq!(extra.get("retries"), Some(&serde_json::json!(3)));
    let keys: Vec<_> = config.extra().keys().collect();
    assert_eq!(keys, ["name", "debug", "ratio", "retries", "tags", "terminal"]);
}
