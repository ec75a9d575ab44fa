//! The fully resolved configuration handed to downstream collaborators.
//!
//! Each collaborator reads one field: the interpreter bootstrapper reads
//! [`ResolvedConfiguration::interpreter`], the file stager
//! [`ResolvedConfiguration::files`], the package installer
//! [`ResolvedConfiguration::packages`] and the plugin loader
//! [`ResolvedConfiguration::plugins`].

use std::sync::Arc;

use serde::{Serialize, Serializer};

use crate::{BootError, BootResult, Document, ResolvedFileEntry, ShapeProblem};

/// Scheme for packages already present on the staged filesystem.
pub const STAGED_SCHEME: &str = "emfs://";

/// Which interpreter to boot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterpreterSpec {
    /// A release identifier such as `0.26.1`.
    Version(String),
    /// A URL or path to an interpreter build.
    Url(String),
}

impl InterpreterSpec {
    /// Classify a raw `interpreter` value.
    ///
    /// Values carrying a URL scheme or starting with `.` or `/` are locations;
    /// anything else is a version identifier.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw.contains("://") || raw.starts_with(['.', '/']) {
            Self::Url(raw.to_owned())
        } else {
            Self::Version(raw.to_owned())
        }
    }

    /// The value as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Version(v) | Self::Url(v) => v,
        }
    }
}

impl Serialize for InterpreterSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Rough category of a package requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageKind {
    /// A bare package name.
    Name,
    /// A name followed by a version constraint or extras.
    Constrained,
    /// An absolute URL to a package archive.
    Url,
    /// A path on the staged filesystem (`emfs://`).
    Staged,
}

/// One package requirement, passed through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PackageSpec(String);

impl PackageSpec {
    /// The requirement as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Light structural classification; no validity check is implied.
    ///
    /// # Examples
    ///
    /// ```
    /// use bootconf::{PackageKind, PackageSpec};
    /// let spec = PackageSpec::from("pandas>=2.0");
    /// assert_eq!(spec.kind(), PackageKind::Constrained);
    /// assert_eq!(spec.name(), Some("pandas"));
    /// assert_eq!(PackageSpec::from("emfs://wheels/a.whl").kind(), PackageKind::Staged);
    /// ```
    #[must_use]
    pub fn kind(&self) -> PackageKind {
        if self.0.starts_with(STAGED_SCHEME) {
            PackageKind::Staged
        } else if self.0.contains("://") {
            PackageKind::Url
        } else if self.0.contains(is_constraint_char) {
            PackageKind::Constrained
        } else {
            PackageKind::Name
        }
    }

    /// The package name for name-based requirements.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self.kind() {
            PackageKind::Name | PackageKind::Constrained => self
                .0
                .split(is_constraint_char)
                .next()
                .map(str::trim)
                .filter(|name| !name.is_empty()),
            PackageKind::Url | PackageKind::Staged => None,
        }
    }
}

const fn is_constraint_char(c: char) -> bool {
    matches!(c, '=' | '<' | '>' | '!' | '~' | '[' | ';' | ' ' | '@')
}

impl From<&str> for PackageSpec {
    fn from(raw: &str) -> Self {
        Self(raw.to_owned())
    }
}

impl From<String> for PackageSpec {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

/// A plugin and whether it is enabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginSpec {
    name: String,
    enabled: bool,
}

impl PluginSpec {
    /// Build a plugin entry.
    #[must_use]
    pub fn new(name: impl Into<String>, enabled: bool) -> Self {
        Self {
            name: name.into(),
            enabled,
        }
    }

    /// Parse one `plugins` element; a leading `!` disables the plugin.
    ///
    /// # Errors
    ///
    /// Returns [`BootError::Shape`] keyed `plugins[index]` when no name
    /// remains.
    pub fn parse(raw: &str, index: usize) -> BootResult<Self> {
        let (name, enabled) = raw
            .strip_prefix('!')
            .map_or((raw, true), |rest| (rest, false));
        if name.is_empty() {
            return Err(Arc::new(BootError::Shape {
                key: format!("plugins[{index}]"),
                problem: ShapeProblem::EmptyPluginName,
            }));
        }
        Ok(Self::new(name, enabled))
    }

    /// Plugin name without the `!` marker.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the plugin should be loaded.
    #[must_use]
    pub const fn enabled(&self) -> bool {
        self.enabled
    }
}

/// Immutable configuration of one execution context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    interpreter: Option<InterpreterSpec>,
    files: Vec<ResolvedFileEntry>,
    packages: Vec<PackageSpec>,
    plugins: Vec<PluginSpec>,
    extra: Document,
}

impl ResolvedConfiguration {
    /// Assemble the configuration from validated parts.
    ///
    /// # Errors
    ///
    /// Returns [`BootError::Shape`] when a plugin entry names no plugin.
    pub fn assemble(
        interpreter: Option<&str>,
        files: Vec<ResolvedFileEntry>,
        packages: Vec<String>,
        plugins: &[String],
        extra: Document,
    ) -> BootResult<Self> {
        let parsed_plugins = plugins
            .iter()
            .enumerate()
            .map(|(i, raw)| PluginSpec::parse(raw, i))
            .collect::<BootResult<Vec<_>>>()?;
        Ok(Self {
            interpreter: interpreter.map(InterpreterSpec::parse),
            files,
            packages: packages.into_iter().map(PackageSpec::from).collect(),
            plugins: parsed_plugins,
            extra,
        })
    }

    /// Interpreter to boot, when one is configured.
    #[must_use]
    pub const fn interpreter(&self) -> Option<&InterpreterSpec> {
        self.interpreter.as_ref()
    }

    /// Files to stage, in document order.
    #[must_use]
    pub fn files(&self) -> &[ResolvedFileEntry] {
        &self.files
    }

    /// Packages to install, in document order.
    #[must_use]
    pub fn packages(&self) -> &[PackageSpec] {
        &self.packages
    }

    /// Plugins with their enabled state, in document order.
    #[must_use]
    pub fn plugins(&self) -> &[PluginSpec] {
        &self.plugins
    }

    /// Unrecognized top-level keys with their original values.
    #[must_use]
    pub const fn extra(&self) -> &Document {
        &self.extra
    }

    /// Returns `true` when nothing beyond defaults is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.interpreter.is_none()
            && self.files.is_empty()
            && self.packages.is_empty()
            && self.plugins.is_empty()
            && self.extra.is_empty()
    }
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "tests panic to surface configuration mistakes"
)]
mod tests {
    use rstest::rstest;

    use super::{InterpreterSpec, PackageKind, PackageSpec, PluginSpec, ResolvedConfiguration};
    use crate::{BootError, Document, ShapeProblem};

    #[rstest]
    #[case("numpy", PackageKind::Name, Some("numpy"))]
    #[case("pandas>=2.0", PackageKind::Constrained, Some("pandas"))]
    #[case("requests[socks]", PackageKind::Constrained, Some("requests"))]
    #[case("https://pkgs/a-1.0-py3-none-any.whl", PackageKind::Url, None)]
    #[case("emfs://wheels/a.whl", PackageKind::Staged, None)]
    fn classifies_packages(
        #[case] raw: &str,
        #[case] kind: PackageKind,
        #[case] name: Option<&str>,
    ) {
        let spec = PackageSpec::from(raw);
        assert_eq!(spec.kind(), kind);
        assert_eq!(spec.name(), name);
        assert_eq!(spec.as_str(), raw);
    }

    #[rstest]
    #[case("0.26.1", InterpreterSpec::Version("0.26.1".into()))]
    #[case(
        "https://cdn/pyodide.mjs",
        InterpreterSpec::Url("https://cdn/pyodide.mjs".into())
    )]
    #[case("./pyodide/pyodide.mjs", InterpreterSpec::Url("./pyodide/pyodide.mjs".into()))]
    fn classifies_interpreters(#[case] raw: &str, #[case] expected: InterpreterSpec) {
        assert_eq!(InterpreterSpec::parse(raw), expected);
    }

    #[test]
    fn bang_prefix_disables_plugins() {
        let config = ResolvedConfiguration::assemble(
            None,
            Vec::new(),
            Vec::new(),
            &["custom".to_owned(), "!error".to_owned()],
            Document::new(),
        )
        .expect("plugins parse");
        assert_eq!(
            config.plugins(),
            [PluginSpec::new("custom", true), PluginSpec::new("error", false)]
        );
    }

    #[test]
    fn bare_bang_is_a_shape_error() {
        let err = PluginSpec::parse("!", 3).expect_err("empty name");
        match err.as_ref() {
            BootError::Shape { key, problem } => {
                assert_eq!(key, "plugins[3]");
                assert_eq!(problem, &ShapeProblem::EmptyPluginName);
            }
            other => panic!("expected Shape, got {other:?}"),
        }
    }

    #[test]
    fn default_configuration_is_empty() {
        assert!(ResolvedConfiguration::default().is_empty());
    }
}
