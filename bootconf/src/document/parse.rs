//! Notation-specific decoding into a [`Document`].

use std::sync::Arc;

use crate::{BootError, BootResult, Location};

use super::value::TomlDocument;
use super::{Document, Notation};

impl Document {
    /// Parse `text` written in `notation`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bootconf::{Document, Notation};
    /// let toml = Document::parse("packages = [\"numpy\"]", Notation::Toml)?;
    /// let json = Document::parse(r#"{"packages": ["numpy"]}"#, Notation::Json)?;
    /// assert_eq!(toml, json);
    /// # Ok::<_, std::sync::Arc<bootconf::BootError>>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`BootError::Parse`] when the text is malformed, repeats a key,
    /// contains a JSON `null`, or does not have a mapping at its root.
    pub fn parse(text: &str, notation: Notation) -> BootResult<Self> {
        match notation {
            Notation::Json => serde_json::from_str(text).map_err(|e| json_error(&e)),
            Notation::Toml => toml::from_str::<TomlDocument>(text)
                .map(|TomlDocument(doc)| doc)
                .map_err(|e| toml_error(text, &e)),
        }
    }
}

fn json_error(err: &serde_json::Error) -> Arc<BootError> {
    // serde_json reports line 0 when the failure has no position.
    let location = (err.line() > 0).then(|| Location {
        line: err.line(),
        column: err.column(),
    });
    let full = err.to_string();
    let message = location
        .and_then(|loc| full.strip_suffix(&format!(" at line {} column {}", loc.line, loc.column)))
        .map_or_else(|| full.clone(), str::to_owned);
    Arc::new(BootError::Parse {
        notation: Notation::Json,
        location,
        message,
    })
}

fn toml_error(text: &str, err: &toml::de::Error) -> Arc<BootError> {
    Arc::new(BootError::Parse {
        notation: Notation::Toml,
        location: err.span().map(|span| locate(text, span.start)),
        message: err.message().trim_end().to_owned(),
    })
}

/// Convert a byte offset into a one-based line and column.
pub(super) fn locate(text: &str, offset: usize) -> Location {
    let prefix = text.get(..offset).unwrap_or(text);
    let line = prefix.matches('\n').count() + 1;
    let column = prefix.rsplit('\n').next().map_or(0, |l| l.chars().count()) + 1;
    Location { line, column }
}
