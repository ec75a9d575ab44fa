//! Extension for mapping foreign errors into `BootResult` concisely.
//!
//! Replaces repeated `.map_err(|e| Arc::new(BootError::from(e)))` at call
//! sites that surface errors from other crates.
//!
//! # Examples
//!
//! ```
//! use bootconf::{BootResult, BootResultExt};
//!
//! fn gather() -> BootResult<u8> {
//!     // figment::Error implements Into<BootError>
//!     figment::Figment::new().extract_inner("missing").into_boot()
//! }
//! assert!(gather().is_err());
//! ```

use std::sync::Arc;

use crate::{BootError, BootResult};

/// Map any `Result<T, E>` with `E: Into<BootError>` into a [`BootResult`].
pub trait BootResultExt<T> {
    /// Convert the error into an `Arc<BootError>`.
    ///
    /// # Errors
    ///
    /// Propagates the original error after conversion.
    fn into_boot(self) -> BootResult<T>;
}

impl<T, E> BootResultExt<T> for Result<T, E>
where
    E: Into<BootError>,
{
    fn into_boot(self) -> BootResult<T> {
        self.map_err(|e| Arc::new(e.into()))
    }
}
