//! Selection of the authoritative source for one execution context.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::{BootError, BootResult, Document, Notation, SourceConflict};

use super::{ConfigSource, ExecutionContext, SourceCandidates};

/// Pick the single configuration source declared for `context`.
///
/// Conflicts are detected before any text is parsed. A blank attribute counts
/// as absent. Returns `Ok(None)` when nothing is declared, in which case the
/// context runs with an empty configuration.
///
/// # Examples
///
/// ```
/// use bootconf::{ConfigSource, ExecutionContext, Notation, SourceCandidates, select_source};
///
/// let candidates = SourceCandidates::new().with_attribute("./conf/pyscript.json");
/// let source = select_source(&ExecutionContext::Main, &candidates, Notation::Toml)?;
/// assert_eq!(
///     source,
///     Some(ConfigSource::ExternalReference {
///         url: "./conf/pyscript.json".into(),
///         notation: Notation::Json,
///     })
/// );
/// # Ok::<_, std::sync::Arc<bootconf::BootError>>(())
/// ```
///
/// # Errors
///
/// Returns [`BootError::DuplicateConfigSource`] when more than one inline
/// body is declared, or when an attribute and an inline body are both
/// declared.
pub fn select_source(
    context: &ExecutionContext,
    candidates: &SourceCandidates,
    default_notation: Notation,
) -> BootResult<Option<ConfigSource>> {
    let bodies = candidates.inline_bodies();
    if bodies.len() > 1 {
        return Err(conflict(
            context,
            SourceConflict::InlineBodies {
                count: bodies.len(),
            },
        ));
    }

    let attribute = match candidates.attribute() {
        Some(text) if text.trim().is_empty() => {
            warn!(context = %context, "ignoring blank config attribute");
            None
        }
        other => other,
    };

    let source = match (attribute, bodies.first()) {
        (Some(_), Some(_)) => return Err(conflict(context, SourceConflict::AttributeAndInline)),
        (Some(text), None) => Some(classify_attribute(text, default_notation)),
        (None, Some(body)) => Some(ConfigSource::InlineLiteral {
            text: body.text().to_owned(),
            notation: body.notation().unwrap_or(default_notation),
        }),
        (None, None) => None,
    };
    debug!(context = %context, source = ?source, "selected configuration source");
    Ok(source)
}

fn conflict(context: &ExecutionContext, conflict: SourceConflict) -> Arc<BootError> {
    Arc::new(BootError::DuplicateConfigSource {
        context: context.clone(),
        conflict,
    })
}

/// Decide whether attribute text is a literal document or a reference.
///
/// Text wrapped in braces is a JSON literal; text that parses as a non-empty
/// TOML document is a TOML literal; anything else names a resource.
fn classify_attribute(text: &str, default_notation: Notation) -> ConfigSource {
    let trimmed = text.trim();
    if trimmed.starts_with('{') && trimmed.ends_with('}') {
        return ConfigSource::AttributeLiteral {
            text: trimmed.to_owned(),
            notation: Notation::Json,
        };
    }
    if Document::parse(trimmed, Notation::Toml).is_ok_and(|doc| !doc.is_empty()) {
        return ConfigSource::AttributeLiteral {
            text: trimmed.to_owned(),
            notation: Notation::Toml,
        };
    }
    ConfigSource::ExternalReference {
        url: trimmed.to_owned(),
        notation: Notation::from_suffix(trimmed).unwrap_or(default_notation),
    }
}
