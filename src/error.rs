//! Error types for parsing and resolution
//!
//! Every failure aborts the whole resolution pass. There is no partial result:
//! a caller receiving any of these errors must discard whatever it was building.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ParError>;

/// Top-level error for a parse/resolve pass.
#[derive(Debug, Error)]
pub enum ParError {
    /// A line is neither a comment, a blank line nor an assignment.
    #[error("syntax error in line {line_number}: \"{line}\"")]
    Syntax { line_number: usize, line: String },

    /// A stored value could not be scanned as the requested type.
    #[error("failed to convert \"{value}\" to {target}")]
    Conversion { value: String, target: &'static str },

    /// A typed lookup was made for a key that is not in the store.
    #[error("parameter \"{0}\" is not set")]
    MissingKey(String),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

/// Unsupported settings and unusable parameter sources.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("unknown grid type \"{0}\"")]
    UnknownGridType(String),

    #[error("unknown domain \"{0}\"")]
    UnknownDomain(String),

    #[error("unknown time step method \"{0}\"")]
    UnknownTimeStepMethod(String),

    /// A parameter the selected method depends on was not given.
    #[error("time step method \"{method}\" requires parameter \"{key}\"")]
    MissingParameter { method: &'static str, key: &'static str },

    /// A resolved grid size below one point.
    #[error("grid size {size} on axis {axis} must be at least 1")]
    NonPositiveSize { axis: usize, size: i32 },

    #[error("unsupported dimension {0}, expected 1 to 3")]
    UnsupportedDimension(usize),

    #[error("parameter file \"{}\" does not exist", .0.display())]
    MissingSource(PathBuf),

    #[error("bad parameter file \"{}\": {source}", path.display())]
    UnreadableSource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid resolver defaults: {0}")]
    Defaults(#[from] config::ConfigError),
}

impl From<config::ConfigError> for ParError {
    fn from(err: config::ConfigError) -> Self {
        ParError::Configuration(ConfigurationError::Defaults(err))
    }
}

impl ParError {
    /// Build a conversion error for target type `T`.
    pub fn conversion<T>(value: impl Into<String>) -> Self {
        ParError::Conversion {
            value: value.into(),
            target: short_type_name::<T>(),
        }
    }

    pub fn is_syntax(&self) -> bool {
        matches!(self, ParError::Syntax { .. })
    }

    pub fn is_conversion(&self) -> bool {
        matches!(self, ParError::Conversion { .. })
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, ParError::Configuration(_))
    }
}

/// `std::any::type_name` without the module path (`alloc::string::String` -> `String`).
fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}
