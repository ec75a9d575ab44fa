//! Expansion of `{NAME}` placeholders inside the `files` option.
//!
//! A `files` entry whose key is exactly one token defines that placeholder;
//! every other entry is a file mapping whose source and destination have
//! their tokens substituted. By default definitions are only visible to
//! entries that follow them ([`PlaceholderOrder::SourceOrder`]).

mod graph;
mod token;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{BootResult, FileMapping};

use token::{sole_token, substitute};

/// How placeholder definitions become visible to other entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlaceholderOrder {
    /// A definition is visible only to entries after it.
    #[default]
    SourceOrder,
    /// Definitions may reference each other in any order; cycles are errors.
    DependencyGraph,
}

/// Placeholder names mapped to fully expanded values, in definition order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderTable {
    entries: Vec<(String, String)>,
}

impl PlaceholderTable {
    /// Creates an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Current value of placeholder `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find_map(|(k, v)| (k == name).then_some(v.as_str()))
    }

    /// Returns `true` when `name` is defined.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Bind `name` to `value`, replacing any previous binding in place.
    pub fn define(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let owned_name = name.into();
        let expanded = value.into();
        debug!(token = %owned_name, value = %expanded, "defined placeholder");
        if let Some((_, slot)) = self.entries.iter_mut().find(|(k, _)| *k == owned_name) {
            *slot = expanded;
        } else {
            self.entries.push((owned_name, expanded));
        }
    }

    /// Iterates over bindings in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of bindings.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing is defined.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Result of expanding the `files` option.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expansion {
    /// Every placeholder binding.
    pub table: PlaceholderTable,
    /// File mappings with all tokens substituted, in document order.
    pub entries: Vec<FileMapping>,
}

/// Expand placeholders across raw `files` entries.
///
/// # Examples
///
/// ```
/// use bootconf::{FileMapping, PlaceholderOrder, expand_files};
///
/// let raw = [
///     FileMapping::new("{DOMAIN}", "https://h"),
///     FileMapping::new("{PATH}", "p"),
///     FileMapping::new("{FROM}", "{DOMAIN}/{PATH}"),
///     FileMapping::new("{FROM}/a.py", "dst/a.py"),
/// ];
/// let expansion = expand_files(&raw, PlaceholderOrder::SourceOrder)?;
/// assert_eq!(expansion.entries, [FileMapping::new("https://h/p/a.py", "dst/a.py")]);
/// # Ok::<_, std::sync::Arc<bootconf::BootError>>(())
/// ```
///
/// # Errors
///
/// Returns [`crate::BootError::UnresolvedPlaceholder`] when a token has no
/// visible definition, and [`crate::BootError::PlaceholderCycle`] when
/// definitions form a cycle under [`PlaceholderOrder::DependencyGraph`].
pub fn expand_files(raw: &[FileMapping], order: PlaceholderOrder) -> BootResult<Expansion> {
    let table = match order {
        PlaceholderOrder::SourceOrder => PlaceholderTable::new(),
        PlaceholderOrder::DependencyGraph => graph::resolve_definitions(raw)?,
    };
    let mut expansion = Expansion {
        table,
        entries: Vec::with_capacity(raw.len()),
    };
    for mapping in raw {
        if let Some(name) = sole_token(&mapping.source) {
            if order == PlaceholderOrder::SourceOrder {
                let value = substitute(&mapping.destination, &expansion.table, &mapping.source)?;
                expansion.table.define(name, value);
            }
            continue;
        }
        let source = substitute(&mapping.source, &expansion.table, &mapping.source)?;
        let destination = substitute(&mapping.destination, &expansion.table, &mapping.source)?;
        expansion.entries.push(FileMapping {
            source,
            destination,
        });
    }
    Ok(expansion)
}
