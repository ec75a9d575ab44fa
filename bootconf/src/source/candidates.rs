//! Types describing what a page declares for one execution context.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use crate::{BootError, BootResult, Document, Notation};

/// One isolated script-running environment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExecutionContext {
    /// The main page.
    Main,
    /// A background worker, identified by name.
    Worker(String),
}

impl fmt::Display for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Main => f.write_str("main context"),
            Self::Worker(name) => write!(f, "worker '{name}'"),
        }
    }
}

/// Configuration text embedded directly in markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineBody {
    text: String,
    notation: Option<Notation>,
}

impl InlineBody {
    /// An inline body whose notation is left to the engine default.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            notation: None,
        }
    }

    /// Declare the notation the body is written in.
    #[must_use]
    pub const fn with_notation(mut self, notation: Notation) -> Self {
        self.notation = Some(notation);
        self
    }

    /// Raw body text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Declared notation, if any.
    #[must_use]
    pub const fn notation(&self) -> Option<Notation> {
        self.notation
    }
}

/// Every configuration declaration found for one execution context.
///
/// # Examples
///
/// ```
/// use bootconf::{InlineBody, SourceCandidates};
///
/// let candidates = SourceCandidates::new()
///     .with_inline(InlineBody::new("packages = [\"numpy\"]"));
/// assert_eq!(candidates.inline_bodies().len(), 1);
/// assert!(candidates.attribute().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceCandidates {
    attribute: Option<String>,
    inline: Vec<InlineBody>,
}

impl SourceCandidates {
    /// No declarations.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            attribute: None,
            inline: Vec::new(),
        }
    }

    /// Set the reference attribute text (a URL or a literal document).
    #[must_use]
    pub fn with_attribute(mut self, text: impl Into<String>) -> Self {
        self.attribute = Some(text.into());
        self
    }

    /// Add an inline body.
    #[must_use]
    pub fn with_inline(mut self, body: InlineBody) -> Self {
        self.inline.push(body);
        self
    }

    /// Reference attribute text as declared.
    #[must_use]
    pub fn attribute(&self) -> Option<&str> {
        self.attribute.as_deref()
    }

    /// Inline bodies in declaration order.
    #[must_use]
    pub fn inline_bodies(&self) -> &[InlineBody] {
        &self.inline
    }
}

/// The single authoritative configuration source of a context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// A resource that must be fetched before parsing.
    ExternalReference {
        /// Location of the resource.
        url: String,
        /// Notation inferred from the resource name.
        notation: Notation,
    },
    /// Text from a dedicated inline body.
    InlineLiteral {
        /// Body text.
        text: String,
        /// Declared or default notation.
        notation: Notation,
    },
    /// A literal document written directly in the reference attribute.
    AttributeLiteral {
        /// Attribute text.
        text: String,
        /// Sniffed notation.
        notation: Notation,
    },
}

impl ConfigSource {
    /// Notation the source text is written in.
    #[must_use]
    pub const fn notation(&self) -> Notation {
        match self {
            Self::ExternalReference { notation, .. }
            | Self::InlineLiteral { notation, .. }
            | Self::AttributeLiteral { notation, .. } => *notation,
        }
    }

    /// Produce the source's document, fetching external references with
    /// `fetch`.
    ///
    /// `fetch` is only called for [`ConfigSource::ExternalReference`]. Async
    /// callers fetch the text beforehand and hand it in through the closure.
    ///
    /// # Examples
    ///
    /// ```
    /// use bootconf::{ConfigSource, Notation};
    ///
    /// let source = ConfigSource::ExternalReference {
    ///     url: "conf.json".into(),
    ///     notation: Notation::Json,
    /// };
    /// let doc = source.load_with(|_| Ok::<_, std::io::Error>(r#"{"plugins": []}"#.into()))?;
    /// assert!(doc.contains_key("plugins"));
    /// # Ok::<_, std::sync::Arc<bootconf::BootError>>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`BootError::Fetch`] when `fetch` fails and
    /// [`BootError::Parse`] when the text is malformed.
    pub fn load_with<F, E>(&self, fetch: F) -> BootResult<Document>
    where
        F: FnOnce(&str) -> Result<String, E>,
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        match self {
            Self::ExternalReference { url, notation } => {
                let text = fetch(url).map_err(|e| Arc::new(BootError::fetch(url.as_str(), e)))?;
                Document::parse(&text, *notation)
            }
            Self::InlineLiteral { text, notation } | Self::AttributeLiteral { text, notation } => {
                Document::parse(text, *notation)
            }
        }
    }
}
