//! Source selection and per-context isolation through the public pipeline.
#![expect(
    clippy::expect_used,
    reason = "tests panic to surface configuration mistakes"
)]

use std::cell::RefCell;
use std::io;

use bootconf::{
    BootError, Bootstrap, ExecutionContext, InlineBody, Notation, Resolver, SourceCandidates,
    SourceConflict,
};
use rstest::rstest;

fn offline(url: &str) -> Result<String, io::Error> {
    Err(io::Error::other(format!("no network for {url}")))
}

#[test]
fn external_reference_is_fetched_once_and_decoded_by_suffix() {
    let calls = RefCell::new(Vec::new());
    let config = Resolver::default()
        .resolve_context(
            &ExecutionContext::Main,
            &SourceCandidates::new().with_attribute("./conf/app.json"),
            |url| {
                calls.borrow_mut().push(url.to_owned());
                Ok::<_, io::Error>(r#"{"packages": ["numpy"]}"#.to_owned())
            },
        )
        .expect("resolves");
    assert_eq!(calls.into_inner(), ["./conf/app.json"]);
    assert_eq!(
        config.packages().first().map(|p| p.as_str()),
        Some("numpy")
    );
}

#[test]
fn fetch_failures_carry_the_url() {
    let err = Resolver::default()
        .resolve_context(
            &ExecutionContext::Main,
            &SourceCandidates::new().with_attribute("https://h/conf.toml"),
            offline,
        )
        .expect_err("offline");
    assert!(matches!(
        err.as_ref(),
        BootError::Fetch { url, .. } if url == "https://h/conf.toml"
    ));
}

#[rstest]
#[case("packages = [\"numpy\"]")]
#[case(r#"{"packages": ["numpy"]}"#)]
fn attribute_literals_need_no_fetch(#[case] attribute: &str) {
    let config = Resolver::default()
        .resolve_context(
            &ExecutionContext::Main,
            &SourceCandidates::new().with_attribute(attribute),
            offline,
        )
        .expect("literal resolves");
    assert_eq!(config.packages().len(), 1);
}

#[test]
fn inline_body_honours_declared_notation() {
    let body = InlineBody::new(r#"{"plugins": ["!error"]}"#).with_notation(Notation::Json);
    let config = Resolver::default()
        .resolve_context(
            &ExecutionContext::Worker("w".into()),
            &SourceCandidates::new().with_inline(body),
            offline,
        )
        .expect("resolves");
    assert!(config.plugins().iter().all(|p| !p.enabled()));
}

#[test]
fn no_declaration_yields_empty_configuration() {
    let config = Resolver::default()
        .resolve_context(&ExecutionContext::Main, &SourceCandidates::new(), offline)
        .expect("resolves");
    assert!(config.is_empty());
}

#[test]
fn conflicting_sources_are_rejected_before_parsing() {
    let candidates = SourceCandidates::new()
        .with_attribute("./conf.toml")
        .with_inline(InlineBody::new("not = [valid"));
    let err = Resolver::default()
        .resolve_context(&ExecutionContext::Main, &candidates, offline)
        .expect_err("conflict");
    assert!(matches!(
        err.as_ref(),
        BootError::DuplicateConfigSource {
            conflict: SourceConflict::AttributeAndInline,
            ..
        }
    ));
}

#[test]
fn one_failing_context_does_not_affect_others() {
    let broken = ExecutionContext::Worker("broken".into());
    let healthy = ExecutionContext::Worker("healthy".into());
    let outcome = Bootstrap::new()
        .with_context(
            ExecutionContext::Main,
            SourceCandidates::new().with_inline(InlineBody::new("interpreter = \"0.26.2\"")),
        )
        .with_context(
            broken.clone(),
            SourceCandidates::new().with_inline(InlineBody::new("packages = 3")),
        )
        .with_context(
            healthy.clone(),
            SourceCandidates::new().with_inline(InlineBody::new("packages = [\"numpy\"]")),
        )
        .resolve(&Resolver::default(), offline);

    let failures: Vec<_> = outcome.failures().cloned().collect();
    assert_eq!(failures, [broken]);

    let main = outcome
        .get(&ExecutionContext::Main)
        .expect("registered")
        .as_ref()
        .expect("main resolves");
    assert_eq!(main.interpreter().map(|i| i.as_str()), Some("0.26.2"));
    assert!(main.packages().is_empty());

    let worker = outcome
        .get(&healthy)
        .expect("registered")
        .as_ref()
        .expect("worker resolves");
    assert!(worker.interpreter().is_none());
    assert_eq!(worker.packages().len(), 1);
    assert_eq!(outcome.iter().count(), 3);
}
