//! Tokenizer for `{NAME}` placeholders.
//!
//! A token opens at `{` and closes at the next `}`; its name is the text in
//! between. Empty braces and an unclosed `{` are literal text.

use std::sync::Arc;

use crate::{BootError, BootResult};

use super::PlaceholderTable;

/// A piece of text split at placeholder boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Segment<'a> {
    Literal(&'a str),
    Token(&'a str),
}

/// Split `text` into literal runs and placeholder tokens.
pub(crate) fn segments(text: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut rest = text;
    while let Some((before, after_open)) = rest.split_once('{') {
        let Some((name, after_close)) = after_open.split_once('}') else {
            break;
        };
        if !before.is_empty() {
            out.push(Segment::Literal(before));
        }
        if name.is_empty() {
            out.push(Segment::Literal("{}"));
        } else {
            out.push(Segment::Token(name));
        }
        rest = after_close;
    }
    if !rest.is_empty() {
        out.push(Segment::Literal(rest));
    }
    out
}

/// Names of every token in `text`, in order of appearance.
pub(crate) fn tokens(text: &str) -> impl Iterator<Item = &str> {
    segments(text).into_iter().filter_map(|segment| match segment {
        Segment::Token(name) => Some(name),
        Segment::Literal(_) => None,
    })
}

/// Returns the token name when `key` is exactly one token and nothing else.
pub(crate) fn sole_token(key: &str) -> Option<&str> {
    match segments(key).as_slice() {
        [Segment::Token(name)] => Some(*name),
        _ => None,
    }
}

/// Substitute every token in `text` from `table`.
///
/// Substituted values are not scanned again.
pub(crate) fn substitute(text: &str, table: &PlaceholderTable, entry: &str) -> BootResult<String> {
    let mut out = String::with_capacity(text.len());
    for segment in segments(text) {
        match segment {
            Segment::Literal(s) => out.push_str(s),
            Segment::Token(name) => {
                let value = table
                    .get(name)
                    .ok_or_else(|| Arc::new(BootError::unresolved(name, entry)))?;
                tracing::trace!(token = %name, value = %value, entry = %entry, "substituted placeholder");
                out.push_str(value);
            }
        }
    }
    Ok(out)
}
