//! End-to-end resolution for one or many execution contexts.
//!
//! The stages run strictly in sequence: source selection, decoding, option
//! normalization, placeholder expansion, destination inference and final
//! assembly. Only fetching an external reference happens outside the engine;
//! callers supply it as a closure.

use std::error::Error;

use tracing::{debug, warn};

use crate::{
    BootResult, ConfigSource, Document, EngineSettings, ExecutionContext, Notation,
    ResolvedConfiguration, SourceCandidates, expand_files, normalize_options,
    resolve_destinations, select_source,
};

/// Resolution engine configured by [`EngineSettings`].
///
/// # Examples
///
/// ```
/// use bootconf::{Document, Notation, Resolver};
///
/// let doc = Document::parse(
///     r#"
///     plugins = ["custom", "!error"]
///     [files]
///     "{DOMAIN}" = "https://h"
///     "{DOMAIN}/data.csv" = "sub/"
///     "#,
///     Notation::Toml,
/// )?;
/// let config = Resolver::default().resolve_document(&doc)?;
/// assert_eq!(config.files()[0].destination(), "sub/data.csv");
/// assert!(!config.plugins()[1].enabled());
/// # Ok::<_, std::sync::Arc<bootconf::BootError>>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Resolver {
    settings: EngineSettings,
}

impl Resolver {
    /// Build a resolver from `settings`.
    #[must_use]
    pub const fn new(settings: EngineSettings) -> Self {
        Self { settings }
    }

    /// Settings in effect.
    #[must_use]
    pub const fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Pick the authoritative source for `context`.
    ///
    /// # Errors
    ///
    /// See [`select_source`].
    pub fn select(
        &self,
        context: &ExecutionContext,
        candidates: &SourceCandidates,
    ) -> BootResult<Option<ConfigSource>> {
        select_source(context, candidates, self.settings.default_notation)
    }

    /// Resolve an already decoded document.
    ///
    /// The document is only read, so resolving it again yields an equal
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns the first shape, placeholder or destination error encountered.
    pub fn resolve_document(&self, document: &Document) -> BootResult<ResolvedConfiguration> {
        let options = normalize_options(document)?;
        let expansion = expand_files(&options.files, self.settings.placeholder_order)?;
        let files = resolve_destinations(expansion.entries)?;
        ResolvedConfiguration::assemble(
            options.interpreter.as_deref(),
            files,
            options.packages,
            &options.plugins,
            options.extra,
        )
    }

    /// Decode `text` in `notation` and resolve it.
    ///
    /// # Errors
    ///
    /// Returns [`crate::BootError::Parse`] for malformed text, otherwise as
    /// [`Resolver::resolve_document`].
    pub fn resolve_text(&self, text: &str, notation: Notation) -> BootResult<ResolvedConfiguration> {
        self.resolve_document(&Document::parse(text, notation)?)
    }

    /// Run the whole pipeline for one context.
    ///
    /// `fetch` is called at most once, only when the selected source is an
    /// external reference. A context without sources resolves to the empty
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns any selection, fetch, parse or resolution error for this
    /// context.
    pub fn resolve_context<F, E>(
        &self,
        context: &ExecutionContext,
        candidates: &SourceCandidates,
        fetch: F,
    ) -> BootResult<ResolvedConfiguration>
    where
        F: FnOnce(&str) -> Result<String, E>,
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        let Some(source) = self.select(context, candidates)? else {
            debug!(context = %context, "no configuration declared; using defaults");
            return Ok(ResolvedConfiguration::default());
        };
        let document = source.load_with(fetch)?;
        self.resolve_document(&document)
    }
}

/// Configuration declarations for every execution context on a page.
///
/// # Examples
///
/// ```
/// use bootconf::{Bootstrap, ExecutionContext, InlineBody, Resolver, SourceCandidates};
///
/// let worker = ExecutionContext::Worker("sim".into());
/// let outcome = Bootstrap::new()
///     .with_context(
///         ExecutionContext::Main,
///         SourceCandidates::new().with_inline(InlineBody::new("packages = [\"numpy\"]")),
///     )
///     .with_context(
///         worker.clone(),
///         SourceCandidates::new()
///             .with_inline(InlineBody::new("a = 1"))
///             .with_inline(InlineBody::new("b = 2")),
///     )
///     .resolve(&Resolver::default(), |_| Err::<String, _>(std::io::Error::other("offline")));
/// assert!(outcome.get(&ExecutionContext::Main).is_some_and(Result::is_ok));
/// assert!(outcome.get(&worker).is_some_and(Result::is_err));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Bootstrap {
    contexts: Vec<(ExecutionContext, SourceCandidates)>,
}

impl Bootstrap {
    /// No contexts.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            contexts: Vec::new(),
        }
    }

    /// Register the declarations of one context.
    #[must_use]
    pub fn with_context(mut self, context: ExecutionContext, candidates: SourceCandidates) -> Self {
        self.contexts.push((context, candidates));
        self
    }

    /// Resolve every context independently.
    ///
    /// A failing context is logged and recorded; it never prevents the
    /// others from resolving.
    pub fn resolve<F, E>(&self, resolver: &Resolver, mut fetch: F) -> BootstrapOutcome
    where
        F: FnMut(&str) -> Result<String, E>,
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        let outcomes = self
            .contexts
            .iter()
            .map(|(context, candidates)| {
                let result = resolver.resolve_context(context, candidates, &mut fetch);
                if let Err(err) = &result {
                    warn!(context = %context, error = %err, "configuration resolution failed");
                }
                (context.clone(), result)
            })
            .collect();
        BootstrapOutcome { outcomes }
    }
}

/// Per-context results of [`Bootstrap::resolve`], in registration order.
#[derive(Debug)]
#[must_use]
pub struct BootstrapOutcome {
    outcomes: Vec<(ExecutionContext, BootResult<ResolvedConfiguration>)>,
}

impl BootstrapOutcome {
    /// Result for `context`, if it was registered.
    #[must_use]
    pub fn get(&self, context: &ExecutionContext) -> Option<&BootResult<ResolvedConfiguration>> {
        self.outcomes
            .iter()
            .find_map(|(ctx, result)| (ctx == context).then_some(result))
    }

    /// Iterates over every context and its result.
    pub fn iter(
        &self,
    ) -> impl Iterator<Item = (&ExecutionContext, &BootResult<ResolvedConfiguration>)> {
        self.outcomes.iter().map(|(ctx, result)| (ctx, result))
    }

    /// Contexts that failed to resolve.
    pub fn failures(&self) -> impl Iterator<Item = &ExecutionContext> {
        self.outcomes
            .iter()
            .filter(|(_, result)| result.is_err())
            .map(|(ctx, _)| ctx)
    }
}
