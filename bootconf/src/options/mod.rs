//! Shape validation of the recognized top-level options.
//!
//! Four keys are interpreted: `interpreter`, `files`, `packages` and
//! `plugins`. Everything else is carried through untouched in
//! [`NormalizedOptions::extra`].

use std::sync::Arc;

use crate::{BootError, BootResult, Document, ShapeProblem, Value};

/// Key naming the interpreter version or build URL.
pub const INTERPRETER: &str = "interpreter";
/// Key naming the files to stage.
pub const FILES: &str = "files";
/// Key naming the packages to install.
pub const PACKAGES: &str = "packages";
/// Key naming the plugins to enable or disable.
pub const PLUGINS: &str = "plugins";

const RECOGNIZED: [&str; 4] = [INTERPRETER, FILES, PACKAGES, PLUGINS];

/// One `files` entry: where a file comes from and where it is staged.
///
/// Holds raw text before placeholder expansion and expanded text after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMapping {
    /// Source location (key of the `files` entry).
    pub source: String,
    /// Destination path (value of the `files` entry), possibly empty.
    pub destination: String,
}

impl FileMapping {
    /// Pair a source with its destination.
    #[must_use]
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }
}

/// Recognized options with their shapes checked, plus passthrough keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedOptions {
    /// Interpreter version identifier or URL.
    pub interpreter: Option<String>,
    /// Raw `files` entries in document order, definitions included.
    pub files: Vec<FileMapping>,
    /// Package requirement strings.
    pub packages: Vec<String>,
    /// Plugin names, possibly `!`-prefixed.
    pub plugins: Vec<String>,
    /// Every unrecognized top-level key with its original value.
    pub extra: Document,
}

/// Validate the recognized options of `document`.
///
/// # Examples
///
/// ```
/// use bootconf::{Document, Notation, normalize_options};
///
/// let doc = Document::parse("packages = [\"numpy\"]\ntheme = \"dark\"", Notation::Toml)?;
/// let options = normalize_options(&doc)?;
/// assert_eq!(options.packages, ["numpy"]);
/// assert!(options.extra.contains_key("theme"));
/// # Ok::<_, std::sync::Arc<bootconf::BootError>>(())
/// ```
///
/// # Errors
///
/// Returns [`BootError::Shape`] when a recognized option has the wrong
/// shape or an unrecognized key is a spelling variant of a recognized one.
pub fn normalize_options(document: &Document) -> BootResult<NormalizedOptions> {
    let mut options = NormalizedOptions::default();
    for (key, value) in document.iter() {
        match key {
            INTERPRETER => options.interpreter = Some(expect_str(INTERPRETER, value)?.to_owned()),
            FILES => options.files = file_mappings(value)?,
            PACKAGES => options.packages = string_list(PACKAGES, value)?,
            PLUGINS => options.plugins = string_list(PLUGINS, value)?,
            other => {
                if let Some(recognized) = colliding_option(other) {
                    return Err(Arc::new(BootError::Shape {
                        key: other.to_owned(),
                        problem: ShapeProblem::Collides { recognized },
                    }));
                }
                options.extra.insert(other, value.clone());
            }
        }
    }
    Ok(options)
}

/// Returns the recognized option `key` is a case or separator variant of.
fn colliding_option(key: &str) -> Option<&'static str> {
    let folded = key.to_ascii_lowercase().replace('-', "_");
    RECOGNIZED.into_iter().find(|name| *name == folded)
}

fn expect_str<'a>(key: &str, value: &'a Value) -> BootResult<&'a str> {
    value
        .as_str()
        .ok_or_else(|| Arc::new(BootError::wrong_type(key, "a string", value.kind())))
}

fn string_list(key: &str, value: &Value) -> BootResult<Vec<String>> {
    let items = value.as_sequence().ok_or_else(|| {
        Arc::new(BootError::wrong_type(
            key,
            "a sequence of strings",
            value.kind(),
        ))
    })?;
    items
        .iter()
        .enumerate()
        .map(|(i, item)| expect_str(&format!("{key}[{i}]"), item).map(str::to_owned))
        .collect()
}

fn file_mappings(value: &Value) -> BootResult<Vec<FileMapping>> {
    let table = value.as_table().ok_or_else(|| {
        Arc::new(BootError::wrong_type(
            FILES,
            "a mapping of strings to strings",
            value.kind(),
        ))
    })?;
    table
        .iter()
        .map(|(source, destination)| {
            expect_str(&format!("{FILES}[{source:?}]"), destination)
                .map(|dest| FileMapping::new(source, dest))
        })
        .collect()
}

#[cfg(test)]
mod tests;
