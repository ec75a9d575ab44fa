//! Configuration resolution for per-context script runtimes.
//!
//! Each execution context (the main page and every worker) gets exactly one
//! [`ResolvedConfiguration`], built from a single declared source written in
//! TOML or JSON. Resolution runs in fixed stages:
//!
//! 1. [`select_source`] picks the authoritative [`ConfigSource`].
//! 2. [`Document::parse`] decodes it into the shared [`Document`] tree.
//! 3. [`normalize_options`] checks the shape of `interpreter`, `files`,
//!    `packages` and `plugins`, passing other keys through.
//! 4. [`expand_files`] substitutes `{NAME}` placeholders in `files`.
//! 5. [`resolve_destinations`] infers destinations and rejects collisions.
//! 6. [`ResolvedConfiguration::assemble`] builds the final value.
//!
//! [`Resolver`] drives the stages; [`Bootstrap`] runs them for several
//! contexts independently.

mod destination;
mod document;
mod error;
mod options;
mod pipeline;
mod placeholder;
mod resolved;
mod result_ext;
mod settings;
mod source;

pub use destination::{ResolvedFileEntry, resolve_destinations};
pub use document::{Document, Notation, Number, Value};
pub use error::{BootError, Collision, Location, ShapeProblem, SourceConflict};
pub use options::{
    FILES, FileMapping, INTERPRETER, NormalizedOptions, PACKAGES, PLUGINS, normalize_options,
};
pub use pipeline::{Bootstrap, BootstrapOutcome, Resolver};
pub use placeholder::{Expansion, PlaceholderOrder, PlaceholderTable, expand_files};
pub use resolved::{
    InterpreterSpec, PackageKind, PackageSpec, PluginSpec, ResolvedConfiguration, STAGED_SCHEME,
};
pub use result_ext::BootResultExt;
pub use settings::{ENV_PREFIX, EngineSettings};
pub use source::{ConfigSource, ExecutionContext, InlineBody, SourceCandidates, select_source};

/// Result type used throughout the crate.
///
/// Errors are shared so a failed context's diagnosis can be handed to several
/// consumers without cloning.
pub type BootResult<T> = Result<T, std::sync::Arc<BootError>>;
