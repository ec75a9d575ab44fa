//! Source selection coverage.
#![expect(
    clippy::expect_used,
    reason = "tests panic to surface configuration mistakes"
)]

use rstest::rstest;

use super::{ConfigSource, ExecutionContext, InlineBody, SourceCandidates, select_source};
use crate::{BootError, Notation, SourceConflict};

fn select(candidates: &SourceCandidates) -> Option<ConfigSource> {
    select_source(&ExecutionContext::Main, candidates, Notation::Toml).expect("selection succeeds")
}

#[test]
fn nothing_declared_selects_nothing() {
    assert_eq!(select(&SourceCandidates::new()), None);
}

#[test]
fn duplicate_inline_bodies_fail_before_parsing() {
    // Neither body is valid in any notation; the conflict must win.
    let candidates = SourceCandidates::new()
        .with_inline(InlineBody::new("[[[ not toml"))
        .with_inline(InlineBody::new("{ not json").with_notation(Notation::Json));
    let context = ExecutionContext::Worker("sim".into());
    let err = select_source(&context, &candidates, Notation::Toml).expect_err("conflict");
    match err.as_ref() {
        BootError::DuplicateConfigSource {
            context: ctx,
            conflict,
        } => {
            assert_eq!(ctx, &context);
            assert_eq!(conflict, &SourceConflict::InlineBodies { count: 2 });
        }
        other => panic!("expected DuplicateConfigSource, got {other:?}"),
    }
}

#[test]
fn attribute_and_inline_body_conflict() {
    let candidates = SourceCandidates::new()
        .with_attribute("conf.toml")
        .with_inline(InlineBody::new("plugins = []"));
    let err = select_source(&ExecutionContext::Main, &candidates, Notation::Toml)
        .expect_err("conflict");
    assert!(matches!(
        err.as_ref(),
        BootError::DuplicateConfigSource {
            conflict: SourceConflict::AttributeAndInline,
            ..
        }
    ));
}

#[rstest]
#[case("", None)]
#[case("   ", None)]
fn blank_attribute_is_absent(#[case] text: &str, #[case] expected: Option<ConfigSource>) {
    let candidates = SourceCandidates::new().with_attribute(text);
    assert_eq!(select(&candidates), expected);
}

#[test]
fn blank_attribute_defers_to_inline_body() {
    let candidates = SourceCandidates::new()
        .with_attribute(" ")
        .with_inline(InlineBody::new("plugins = []"));
    assert_eq!(
        select(&candidates),
        Some(ConfigSource::InlineLiteral {
            text: "plugins = []".into(),
            notation: Notation::Toml,
        })
    );
}

#[rstest]
#[case("conf/pyscript.toml", Notation::Toml)]
#[case("https://cdn.example/app.json", Notation::Json)]
#[case("https://cdn.example/app.JSON?rev=3#top", Notation::Json)]
#[case("https://cdn.example/config", Notation::Toml)]
fn references_infer_notation_from_suffix(#[case] url: &str, #[case] notation: Notation) {
    let candidates = SourceCandidates::new().with_attribute(url);
    assert_eq!(
        select(&candidates),
        Some(ConfigSource::ExternalReference {
            url: url.into(),
            notation,
        })
    );
}

#[test]
fn unknown_suffix_uses_default_notation() {
    let candidates = SourceCandidates::new().with_attribute("settings.cfg");
    let source = select_source(&ExecutionContext::Main, &candidates, Notation::Json)
        .expect("selection succeeds");
    assert_eq!(source.map(|s| s.notation()), Some(Notation::Json));
}

#[rstest]
#[case(r#" {"packages": ["numpy"]} "#, Notation::Json)]
#[case("packages = [\"numpy\"]", Notation::Toml)]
fn literal_attributes_are_not_fetched(#[case] text: &str, #[case] notation: Notation) {
    let candidates = SourceCandidates::new().with_attribute(text);
    assert_eq!(
        select(&candidates),
        Some(ConfigSource::AttributeLiteral {
            text: text.trim().into(),
            notation,
        })
    );
}

#[test]
fn inline_body_uses_declared_notation() {
    let candidates = SourceCandidates::new()
        .with_inline(InlineBody::new(r#"{"plugins": []}"#).with_notation(Notation::Json));
    assert_eq!(
        select(&candidates).map(|s| s.notation()),
        Some(Notation::Json)
    );
}

#[test]
fn literals_load_without_fetching() {
    let source = ConfigSource::AttributeLiteral {
        text: "plugins = [\"!error\"]".into(),
        notation: Notation::Toml,
    };
    let doc = source
        .load_with(|url| Err::<String, _>(std::io::Error::other(format!("fetched {url}"))))
        .expect("literal sources never fetch");
    assert!(doc.contains_key("plugins"));
}

#[test]
fn fetch_failures_name_the_reference() {
    let source = ConfigSource::ExternalReference {
        url: "missing.toml".into(),
        notation: Notation::Toml,
    };
    let err = source
        .load_with(|_| Err::<String, _>(std::io::Error::other("offline")))
        .expect_err("fetch fails");
    match err.as_ref() {
        BootError::Fetch { url, .. } => assert_eq!(url, "missing.toml"),
        other => panic!("expected Fetch, got {other:?}"),
    }
}
