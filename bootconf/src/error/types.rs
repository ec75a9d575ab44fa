//! Primary error enum for configuration resolution flows.

use std::fmt;

use figment::Error as FigmentError;
use thiserror::Error;

use crate::document::Notation;
use crate::source::ExecutionContext;

/// One-based line and column of a parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    /// Line number, starting at 1.
    pub line: usize,
    /// Column number, starting at 1.
    pub column: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Reason a context's declared sources could not be narrowed to one.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SourceConflict {
    /// More than one inline body was declared.
    InlineBodies {
        /// Number of inline bodies found.
        count: usize,
    },
    /// A reference attribute and an inline body were both declared.
    AttributeAndInline,
}

impl fmt::Display for SourceConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InlineBodies { count } => write!(f, "{count} inline configuration bodies"),
            Self::AttributeAndInline => {
                f.write_str("both a config attribute and an inline configuration body")
            }
        }
    }
}

/// What is wrong with the shape of a recognized option.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ShapeProblem {
    /// The value has a different type than the option requires.
    WrongType {
        /// Shape the option requires.
        expected: &'static str,
        /// Shape found in the document.
        actual: &'static str,
    },
    /// An unrecognized key is a spelling variant of a recognized one.
    Collides {
        /// Recognized option the key collides with.
        recognized: &'static str,
    },
    /// A plugin entry names no plugin.
    EmptyPluginName,
}

impl fmt::Display for ShapeProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongType { expected, actual } => write!(f, "expected {expected}, found {actual}"),
            Self::Collides { recognized } => {
                write!(f, "key collides with the recognized option '{recognized}'")
            }
            Self::EmptyPluginName => f.write_str("plugin name must not be empty"),
        }
    }
}

/// A destination claimed by more than one staged file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    /// Destination path claimed more than once.
    pub destination: String,
    /// Every source that resolved to `destination`, in document order.
    pub sources: Vec<String>,
}

impl fmt::Display for Collision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' <- {}", self.destination, self.sources.join(", "))
    }
}

/// Errors that can occur while resolving configuration for one execution
/// context.
///
/// Every variant is fatal for the context in which it occurs and carries the
/// structured detail a collaborator needs to render a diagnostic.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BootError {
    /// Configuration text is malformed in its notation.
    #[error("invalid {notation} configuration{}: {message}", at(.location))]
    Parse {
        /// Notation the text was decoded as.
        notation: Notation,
        /// Position of the failure, when the decoder reports one.
        location: Option<Location>,
        /// Decoder message.
        message: String,
    },

    /// More than one configuration source was declared for a context.
    #[error("conflicting configuration sources for {context}: {conflict}")]
    DuplicateConfigSource {
        /// Context with the conflicting declarations.
        context: ExecutionContext,
        /// Which declarations conflict.
        conflict: SourceConflict,
    },

    /// A recognized option has the wrong shape.
    #[error("invalid option '{key}': {problem}")]
    Shape {
        /// Path of the offending key, such as `packages[2]`.
        key: String,
        /// Description of the mismatch.
        problem: ShapeProblem,
    },

    /// A placeholder token was used before it was defined.
    #[error("placeholder '{{{token}}}' used in '{entry}' is not defined before use")]
    UnresolvedPlaceholder {
        /// Name of the undefined placeholder.
        token: String,
        /// Raw key of the files entry that used it.
        entry: String,
    },

    /// Placeholder definitions depend on each other in a cycle.
    #[error("cyclic placeholder definitions: {cycle}")]
    PlaceholderCycle {
        /// Chain of placeholder names forming the cycle.
        cycle: String,
    },

    /// No destination file name can be derived for a staged file.
    #[error("cannot derive a destination for '{file_source}': {reason}")]
    InvalidDestination {
        /// Expanded source of the entry.
        file_source: String,
        /// Why inference failed.
        reason: String,
    },

    /// Several staged files resolve to the same destination.
    #[error("duplicate file destinations: {}", join_collisions(.collisions))]
    DuplicateDestination {
        /// Every colliding destination with its contributing sources.
        collisions: Vec<Collision>,
    },

    /// Fetching an external configuration reference failed.
    #[error("failed to fetch configuration from '{url}': {source}")]
    Fetch {
        /// Reference that could not be fetched.
        url: String,
        /// Underlying error reported by the fetcher.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Engine settings could not be gathered.
    #[error("failed to load engine settings: {0}")]
    Settings(#[from] Box<FigmentError>),
}

fn at(location: &Option<Location>) -> String {
    location.map_or_else(String::new, |loc| format!(" at {loc}"))
}

fn join_collisions(collisions: &[Collision]) -> String {
    collisions
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
