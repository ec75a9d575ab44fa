//! Unit tests for error rendering and construction.
#![expect(
    clippy::expect_used,
    reason = "tests panic to surface configuration mistakes"
)]

use rstest::rstest;

use super::{BootError, Collision, Location, ShapeProblem, SourceConflict};
use crate::{ExecutionContext, Notation};

#[rstest]
#[case(
    BootError::Parse {
        notation: Notation::Json,
        location: Some(Location { line: 2, column: 7 }),
        message: "expected value".into(),
    },
    "invalid json configuration at line 2, column 7: expected value"
)]
#[case(
    BootError::Parse {
        notation: Notation::Toml,
        location: None,
        message: "bad".into(),
    },
    "invalid toml configuration: bad"
)]
#[case(
    BootError::DuplicateConfigSource {
        context: ExecutionContext::Worker("sim".into()),
        conflict: SourceConflict::InlineBodies { count: 2 },
    },
    "conflicting configuration sources for worker 'sim': 2 inline configuration bodies"
)]
#[case(
    BootError::wrong_type("packages[1]", "a string", "a number"),
    "invalid option 'packages[1]': expected a string, found a number"
)]
#[case(
    BootError::Shape {
        key: "Files".into(),
        problem: ShapeProblem::Collides { recognized: "files" },
    },
    "invalid option 'Files': key collides with the recognized option 'files'"
)]
#[case(
    BootError::unresolved("UNDEFINED", "{UNDEFINED}/a.py"),
    "placeholder '{UNDEFINED}' used in '{UNDEFINED}/a.py' is not defined before use"
)]
#[case(
    BootError::DuplicateDestination {
        collisions: vec![
            Collision {
                destination: "data.csv".into(),
                sources: vec!["https://a/data.csv".into(), "https://b/data.csv".into()],
            },
            Collision {
                destination: "x".into(),
                sources: vec!["p".into(), "q".into()],
            },
        ],
    },
    "duplicate file destinations: 'data.csv' <- https://a/data.csv, https://b/data.csv; 'x' <- p, q"
)]
fn renders_diagnostics(#[case] err: BootError, #[case] expected: &str) {
    assert_eq!(err.to_string(), expected);
}

#[test]
fn fetch_preserves_source() {
    let err = BootError::fetch("conf.toml", std::io::Error::other("offline"));
    let source = std::error::Error::source(&err).expect("fetch errors keep their cause");
    assert_eq!(source.to_string(), "offline");
}

#[test]
fn figment_errors_become_settings_errors() {
    let err: BootError = figment::Error::from("boom".to_owned()).into();
    assert!(matches!(err, BootError::Settings(_)));
}
