//! Configuration source declarations and selection.
//!
//! Each execution context may declare a reference attribute and inline
//! bodies. [`select_source`] narrows those declarations down to at most one
//! authoritative [`ConfigSource`].

mod candidates;
mod selector;

pub use candidates::{ConfigSource, ExecutionContext, InlineBody, SourceCandidates};
pub use selector::select_source;

#[cfg(test)]
mod tests;
