//! Supported configuration notations.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Textual notation a configuration source is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Notation {
    /// TOML, the default for undeclared inline bodies.
    #[default]
    Toml,
    /// JSON.
    Json,
}

impl Notation {
    /// Returns the lowercase name of the notation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Toml => "toml",
            Self::Json => "json",
        }
    }

    /// Infer the notation from a resource name's suffix.
    ///
    /// Any `?query` or `#fragment` is ignored and the comparison is
    /// case-insensitive. Returns `None` for unknown or missing suffixes.
    ///
    /// # Examples
    ///
    /// ```
    /// use bootconf::Notation;
    /// assert_eq!(Notation::from_suffix("conf/app.JSON?v=2"), Some(Notation::Json));
    /// assert_eq!(Notation::from_suffix("https://h/pyscript.toml"), Some(Notation::Toml));
    /// assert_eq!(Notation::from_suffix("https://h/config"), None);
    /// ```
    #[must_use]
    pub fn from_suffix(name: &str) -> Option<Self> {
        let path = name.split(['?', '#']).next().unwrap_or(name);
        let file = path.rsplit('/').next().unwrap_or(path);
        let (_, ext) = file.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

impl fmt::Display for Notation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
