//! Configuration loading
//!
//! Settings are layered with figment, lowest priority first:
//!
//! 1. Built-in defaults
//! 2. A TOML file (`./tableform.toml` unless a path is given)
//! 3. Environment variables prefixed with `TABLEFORM_`, using `__` to
//!    separate nested keys (e.g. `TABLEFORM_RENDER__INPUT_CLASS=input`)
//!
//! # Example file
//!
//! ```toml
//! [converter]
//! warn_unmapped = false
//!
//! [render]
//! input_class = "input input-bordered"
//! submit_text = "Save"
//!
//! [logging]
//! filter = "tableform=debug"
//! json = true
//! ```

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TableFormError};
use crate::forms::FormRenderOptions;

/// Default configuration file name
pub const CONFIG_FILE: &str = "tableform.toml";

/// Prefix of configuration environment variables
pub const ENV_PREFIX: &str = "TABLEFORM_";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableFormConfig {
    /// Column conversion settings
    pub converter: ConverterSettings,
    /// HTML rendering options
    pub render: FormRenderOptions,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Column conversion settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterSettings {
    /// Log a warning for each column whose type has no converter
    pub warn_unmapped: bool,
}

impl Default for ConverterSettings {
    fn default() -> Self {
        Self {
            warn_unmapped: true,
        }
    }
}

/// Logging settings
///
/// Unset values fall back to build-dependent defaults: verbose pretty output
/// in debug builds, `warn` level JSON in release builds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `EnvFilter` directive, used when `RUST_LOG` is not set
    pub filter: Option<String>,
    /// Emit JSON lines instead of pretty output
    pub json: Option<bool>,
}

impl TableFormConfig {
    /// Load from `./tableform.toml` (if present) and the environment
    ///
    /// # Errors
    ///
    /// Returns an error if a source holds invalid values.
    pub fn load() -> Result<Self> {
        Self::extract(&Self::figment(None))
    }

    /// Load from a specific file and the environment
    ///
    /// A missing file is treated as empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is not valid TOML or a source holds
    /// invalid values.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        Self::extract(&Self::figment(Some(path.as_ref())))
    }

    /// The layered figment used by the loaders
    #[must_use]
    pub fn figment(path: Option<&Path>) -> Figment {
        let path = path.map_or_else(|| PathBuf::from(CONFIG_FILE), Path::to_path_buf);
        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__").lowercase(true))
    }

    fn extract(figment: &Figment) -> Result<Self> {
        let config: Self = figment
            .extract()
            .map_err(|e| TableFormError::Config(Box::new(e)))?;
        tracing::debug!(?config, "Loaded configuration");
        Ok(config)
    }
}
