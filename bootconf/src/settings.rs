//! Engine settings layered from defaults, an optional file and the
//! environment.

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::{BootResult, BootResultExt, Notation, PlaceholderOrder};

/// Prefix for environment variables that override engine settings.
pub const ENV_PREFIX: &str = "BOOTCONF_";

/// Knobs that change how sources are interpreted.
///
/// Layers, lowest precedence first: built-in defaults, an optional TOML file,
/// then `BOOTCONF_*` environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Notation for inline bodies without a declared notation and for
    /// references with an unknown suffix.
    pub default_notation: Notation,
    /// Visibility rule for placeholder definitions.
    pub placeholder_order: PlaceholderOrder,
}

impl EngineSettings {
    /// Defaults overlaid with the environment.
    #[must_use]
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default())).merge(Env::prefixed(ENV_PREFIX))
    }

    /// Defaults overlaid with the TOML file at `path`, then the environment.
    ///
    /// A missing file contributes nothing.
    #[must_use]
    pub fn figment_with_file(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Load settings from defaults and the environment.
    ///
    /// # Errors
    ///
    /// Returns [`crate::BootError::Settings`] when a layer holds an invalid
    /// value.
    pub fn load() -> BootResult<Self> {
        Self::figment().extract().into_boot()
    }

    /// Load settings from defaults, the file at `path` and the environment.
    ///
    /// # Errors
    ///
    /// Returns [`crate::BootError::Settings`] when the file cannot be parsed
    /// or a layer holds an invalid value.
    pub fn load_from(path: &Path) -> BootResult<Self> {
        Self::figment_with_file(path).extract().into_boot()
    }
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "tests panic to surface configuration mistakes"
)]
mod tests {
    use std::path::Path;

    use anyhow::{Result, ensure};
    use rstest::rstest;
    use test_helpers::figment::{figment_error, with_jail};

    use super::EngineSettings;
    use crate::{BootError, Notation, PlaceholderOrder};

    #[rstest]
    fn defaults_apply_without_layers() -> Result<()> {
        let settings = with_jail(|_| EngineSettings::load().map_err(|e| figment_error(&e)))?;
        ensure!(settings == EngineSettings::default(), "unexpected {settings:?}");
        ensure!(settings.default_notation == Notation::Toml);
        ensure!(settings.placeholder_order == PlaceholderOrder::SourceOrder);
        Ok(())
    }

    #[rstest]
    fn environment_overrides_file() -> Result<()> {
        let settings = with_jail(|j| {
            j.create_file(
                "bootconf.toml",
                "default_notation = \"json\"\nplaceholder_order = \"dependency-graph\"\n",
            )?;
            j.set_env("BOOTCONF_DEFAULT_NOTATION", "toml");
            EngineSettings::load_from(Path::new("bootconf.toml")).map_err(|e| figment_error(&e))
        })?;
        ensure!(settings.default_notation == Notation::Toml);
        ensure!(settings.placeholder_order == PlaceholderOrder::DependencyGraph);
        Ok(())
    }

    #[rstest]
    fn missing_file_contributes_nothing() -> Result<()> {
        let settings = with_jail(|_| {
            EngineSettings::load_from(Path::new("absent.toml")).map_err(|e| figment_error(&e))
        })?;
        ensure!(settings == EngineSettings::default());
        Ok(())
    }

    #[rstest]
    fn invalid_values_are_settings_errors() -> Result<()> {
        let outcome = with_jail(|j| {
            j.set_env("BOOTCONF_PLACEHOLDER_ORDER", "alphabetical");
            Ok(EngineSettings::load())
        })?;
        let err = outcome.expect_err("invalid order");
        ensure!(
            matches!(err.as_ref(), BootError::Settings(_)),
            "expected Settings, got {err:?}"
        );
        Ok(())
    }
}
