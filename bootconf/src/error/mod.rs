//! Error types produced while resolving a context's configuration.

mod constructors;
mod conversions;
mod types;

pub use types::{BootError, Collision, Location, ShapeProblem, SourceConflict};

#[cfg(test)]
mod tests;
