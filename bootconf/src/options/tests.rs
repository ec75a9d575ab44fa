//! Option normalizer coverage.
#![expect(
    clippy::expect_used,
    reason = "tests panic to surface configuration mistakes"
)]

use rstest::rstest;

use super::{FileMapping, normalize_options};
use crate::{BootError, Document, Notation, ShapeProblem, Value};

fn toml(text: &str) -> Document {
    Document::parse(text, Notation::Toml).expect("valid toml")
}

fn shape_error(text: &str) -> (String, ShapeProblem) {
    let err = normalize_options(&toml(text)).expect_err("shape error");
    match err.as_ref() {
        BootError::Shape { key, problem } => (key.clone(), problem.clone()),
        other => panic!("expected Shape, got {other:?}"),
    }
}

#[test]
fn recognized_options_are_typed() {
    let options = normalize_options(&toml(concat!(
        "interpreter = \"0.26.1\"\n",
        "packages = [\"numpy\", \"pandas>=2\"]\n",
        "plugins = [\"custom\", \"!error\"]\n",
        "[files]\n",
        "\"{DOMAIN}\" = \"https://h\"\n",
        "\"{DOMAIN}/a.py\" = \"\"\n",
    )))
    .expect("valid options");
    assert_eq!(options.interpreter.as_deref(), Some("0.26.1"));
    assert_eq!(options.packages, ["numpy", "pandas>=2"]);
    assert_eq!(options.plugins, ["custom", "!error"]);
    assert_eq!(
        options.files,
        [
            FileMapping::new("{DOMAIN}", "https://h"),
            FileMapping::new("{DOMAIN}/a.py", ""),
        ]
    );
    assert!(options.extra.is_empty());
}

#[test]
fn unrecognized_keys_pass_through_untouched() {
    let options = normalize_options(&toml(concat!(
        "experimental_create_proxy = \"auto\"\n",
        "sync_main_only = true\n",
        "[js_modules.main]\n",
        "\"https://cdn/lib.js\" = \"lib\"\n",
    )))
    .expect("valid options");
    assert_eq!(
        options.extra.keys().collect::<Vec<_>>(),
        ["experimental_create_proxy", "sync_main_only", "js_modules"]
    );
    assert_eq!(options.extra.get("sync_main_only"), Some(&Value::Bool(true)));
}

#[rstest]
#[case("interpreter = 3", "interpreter", "a string", "a number")]
#[case("packages = \"numpy\"", "packages", "a sequence of strings", "a string")]
#[case("packages = [\"numpy\", 1]", "packages[1]", "a string", "a number")]
#[case("plugins = [[\"x\"]]", "plugins[0]", "a string", "a sequence")]
#[case("files = [\"a.py\"]", "files", "a mapping of strings to strings", "a sequence")]
#[case("[files]\n\"a.py\" = true", "files[\"a.py\"]", "a string", "a boolean")]
fn wrong_shapes_name_key_and_types(
    #[case] text: &str,
    #[case] key: &str,
    #[case] expected: &str,
    #[case] actual: &str,
) {
    let (found_key, problem) = shape_error(text);
    assert_eq!(found_key, key);
    match problem {
        ShapeProblem::WrongType {
            expected: e,
            actual: a,
        } => assert_eq!((e, a), (expected, actual)),
        other => panic!("expected WrongType, got {other:?}"),
    }
}

#[rstest]
#[case("Files = {}", "Files", "files")]
#[case("PACKAGES = []", "PACKAGES", "packages")]
#[case("Interpreter = \"x\"", "Interpreter", "interpreter")]
fn spelling_variants_collide(#[case] text: &str, #[case] key: &str, #[case] recognized: &str) {
    let (found_key, problem) = shape_error(text);
    assert_eq!(found_key, key);
    match problem {
        ShapeProblem::Collides { recognized: name } => assert_eq!(name, recognized),
        other => panic!("expected Collides, got {other:?}"),
    }
}

#[test]
fn empty_document_yields_defaults() {
    let options = normalize_options(&Document::new()).expect("empty is valid");
    assert_eq!(options, super::NormalizedOptions::default());
}
