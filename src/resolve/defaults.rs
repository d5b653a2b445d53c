//! Resolver defaults
//!
//! `defaults/pargrid.default.toml` is embedded into the crate so that docs and
//! runtime behavior stay in sync. Callers may layer their own TOML files or
//! single overrides on top of it via [`DefaultsLoader`] before deserializing
//! into the immutable [`GridDefaults`] record handed to the pipeline.

use crate::resolve::choices::{Domain, GridType, TimeStepMethod};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

const DEFAULT_TOML: &str = include_str!("../../defaults/pargrid.default.toml");

/// Values used wherever a parameter file is silent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GridDefaults {
    pub dimension: usize,
    pub decomposition: DecompositionDefaults,
    pub grid: GeometryDefaults,
    pub time: TimeDefaults,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DecompositionDefaults {
    pub global_size: [i32; 3],
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeometryDefaults {
    #[serde(rename = "type")]
    pub grid_type: GridType,
    pub domain: Domain,
    pub avoid_origin: [bool; 3],
    pub spacing: [f64; 3],
    pub min: [f64; 3],
    pub max: [f64; 3],
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TimeDefaults {
    pub method: TimeStepMethod,
    pub dtfac: f64,
    pub courant_fac: f64,
    pub courant_min_time: f64,
}

/// Name of the optional defaults file looked up next to a parameter file.
pub const SIBLING_DEFAULTS_FILE: &str = "pargrid.toml";

/// Layers defaults sources, later sources winning:
/// embedded TOML, then files in the order added, then single overrides.
#[derive(Debug, Clone)]
pub struct DefaultsLoader {
    builder: ConfigBuilder<DefaultState>,
}

impl DefaultsLoader {
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    fn layer(mut self, path: &Path, required: bool) -> Self {
        debug!(path = %path.display(), required, "layering resolver defaults");
        self.builder = self
            .builder
            .add_source(File::from(path).format(FileFormat::Toml).required(required));
        self
    }

    /// Layer a defaults file that must exist.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), true)
    }

    /// Layer a defaults file if it exists.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), false)
    }

    /// Layer [`SIBLING_DEFAULTS_FILE`] from the directory of `parameter_file`,
    /// if there is one.
    pub fn beside(self, parameter_file: impl AsRef<Path>) -> Self {
        let directory = parameter_file
            .as_ref()
            .parent()
            .unwrap_or_else(|| Path::new(""));
        self.with_optional_file(directory.join(SIBLING_DEFAULTS_FILE))
    }

    /// Override one value, e.g. `("time.dtfac", 0.5)`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<GridDefaults, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for DefaultsLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the embedded defaults.
pub fn load_defaults() -> Result<GridDefaults, ConfigError> {
    DefaultsLoader::new().build()
}
