//! The structured document both configuration notations decode into.
//!
//! A [`Document`] is an ordered mapping from keys to [`Value`]s. The JSON and
//! TOML decoders drive the same [`serde::Deserialize`] implementation, so
//! equivalent text in either notation yields equal documents.

mod notation;
mod parse;
mod value;

pub use notation::Notation;
pub use value::{Document, Number, Value};

#[cfg(test)]
mod tests;
