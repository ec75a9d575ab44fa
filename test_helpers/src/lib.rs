//! Test helpers shared across crates.
//!
//! [`figment`] wraps `figment::Jail` so settings tests can create files and
//! set environment variables in isolation. [`fixtures`] holds documents
//! written once in TOML and once in JSON with identical meaning.

pub mod figment;
pub mod fixtures;
