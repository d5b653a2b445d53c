//! Parameter file loading
//!
//! [`ParameterFileLoader`] holds the text of one parameter source and runs
//! transforms on it. It is used by the binary, the crate-level entry points
//! and the tests alike.
//!
//! ```rust,ignore
//! use pargrid::loader::ParameterFileLoader;
//!
//! let resolution = ParameterFileLoader::from_path("wavetoy.par")?.resolve()?;
//! let params = ParameterFileLoader::from_string("grid::type = box\n").parameters()?;
//! ```

use crate::error::{ConfigurationError, Result};
use crate::params::ParameterStore;
use crate::resolve::transform::Transform;
use crate::resolve::{Pipeline, Resolution, PARAMETERS};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct ParameterFileLoader {
    source: String,
    path: Option<PathBuf>,
}

impl ParameterFileLoader {
    /// Read a parameter file from disk.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigurationError::MissingSource(path.to_path_buf()).into());
        }
        let source = fs::read_to_string(path).map_err(|source| ConfigurationError::UnreadableSource {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), bytes = source.len(), "read parameter file");

        Ok(Self {
            source,
            path: Some(path.to_path_buf()),
        })
    }

    pub fn from_string<S: Into<String>>(source: S) -> Self {
        Self {
            source: source.into(),
            path: None,
        }
    }

    /// Run a custom transform on the source text.
    pub fn with<O: 'static>(&self, transform: &Transform<String, O>) -> Result<O> {
        transform.run(self.source.clone())
    }

    /// Parse and normalize, without resolving.
    pub fn parameters(&self) -> Result<ParameterStore> {
        self.with(&PARAMETERS)
    }

    /// Resolve with the embedded defaults.
    pub fn resolve(&self) -> Result<Resolution> {
        self.resolve_with(&Pipeline::new()?)
    }

    pub fn resolve_with(&self, pipeline: &Pipeline) -> Result<Resolution> {
        pipeline.run(&self.source)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Path the source was read from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParError;
    use std::io::Write;

    #[test]
    fn test_from_string() {
        let loader = ParameterFileLoader::from_string("driver::global_nsize = 4\n");
        assert_eq!(loader.source(), "driver::global_nsize = 4\n");
        assert!(loader.path().is_none());

        let resolution = loader.resolve().unwrap();
        assert_eq!(resolution.hierarchy.global_size(), &[4, 4, 4]);
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Grid::Type = \"ByRange\"").unwrap();

        let loader = ParameterFileLoader::from_path(file.path()).unwrap();
        assert_eq!(loader.path(), Some(file.path()));
        assert_eq!(loader.parameters().unwrap().value("grid::type"), Some("ByRange"));
    }

    #[test]
    fn test_missing_path() {
        let result = ParameterFileLoader::from_path("no/such/file.par");
        assert!(matches!(
            result,
            Err(ParError::Configuration(ConfigurationError::MissingSource(_)))
        ));
    }

    #[test]
    fn test_directory_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let result = ParameterFileLoader::from_path(dir.path());
        assert!(matches!(
            result,
            Err(ParError::Configuration(ConfigurationError::UnreadableSource { .. }))
        ));
    }
}
