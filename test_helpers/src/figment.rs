//! Shared helpers for working with `figment::Jail` in tests.
//!
//! The jail changes into a temporary directory and restores the environment
//! once the closure returns, so settings layers can be exercised without
//! leaking state between tests.

use anyhow::{Result, anyhow};

/// Executes `f` inside a [`figment::Jail`], returning the closure's output.
///
/// The jail is torn down once the closure completes, even when it fails.
///
/// # Errors
///
/// Returns an error if the jail cannot be created or the closure returns a
/// [`figment::error::Error`].
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|j| {
        output = Some(f(j)?);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail closure did not return a value"))
}

/// Converts any displayable error into a [`figment::Error`].
///
/// Lets closures passed to [`with_jail`] use `?` on engine results.
pub fn figment_error<E: ToString + ?Sized>(err: &E) -> figment::Error {
    figment::Error::from(err.to_string())
}
