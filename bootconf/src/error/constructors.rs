//! Constructors for `BootError` variants used across the pipeline.

use std::error::Error;

use super::{BootError, ShapeProblem};

impl BootError {
    /// Construct a shape error for `key` whose value has the wrong type.
    ///
    /// # Examples
    ///
    /// ```
    /// use bootconf::{BootError, ShapeProblem};
    /// let e = BootError::wrong_type("packages", "a sequence of strings", "string");
    /// assert!(matches!(
    ///     e,
    ///     BootError::Shape { problem: ShapeProblem::WrongType { .. }, .. }
    /// ));
    /// ```
    #[must_use]
    pub fn wrong_type(key: impl Into<String>, expected: &'static str, actual: &'static str) -> Self {
        Self::Shape {
            key: key.into(),
            problem: ShapeProblem::WrongType { expected, actual },
        }
    }

    /// Construct an unresolved placeholder error.
    #[must_use]
    pub fn unresolved(token: impl Into<String>, entry: impl Into<String>) -> Self {
        Self::UnresolvedPlaceholder {
            token: token.into(),
            entry: entry.into(),
        }
    }

    /// Construct a fetch error for a reference that could not be retrieved.
    ///
    /// # Examples
    ///
    /// ```
    /// use bootconf::BootError;
    /// let e = BootError::fetch("conf.toml", std::io::Error::other("offline"));
    /// assert!(e.to_string().contains("conf.toml"));
    /// ```
    #[must_use]
    pub fn fetch(url: impl Into<String>, err: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        Self::Fetch {
            url: url.into(),
            source: err.into(),
        }
    }
}
