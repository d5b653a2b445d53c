//! # pargrid
//!
//! Reads Cactus-style parameter files and resolves them into the geometry of
//! a single-level computational grid.
//!
//! A parameter file is a sequence of `implementation::name = value` lines plus
//! one optional `ActiveThorns = "..."` line. Resolution turns the recognized
//! keys into a [`GridHierarchy`]: grid sizes, spacing, origin and time step.
//!
//! ```rust,ignore
//! let resolution = pargrid::parse_str("grid::type = byrange\ndriver::global_nsize = 11\n")?;
//! assert_eq!(resolution.hierarchy.delta_space(), &[0.2, 0.2, 0.2]);
//! ```
//!
//! The pieces are usable on their own: [`params`] holds the line parser and
//! the normalized store, [`resolve`] the resolver stages and defaults,
//! [`loader`] reads files.

pub mod error;
pub mod grid;
pub mod loader;
pub mod params;
pub mod resolve;

pub use error::{ConfigurationError, ParError, Result};
pub use grid::GridHierarchy;
pub use loader::ParameterFileLoader;
pub use params::{FromParameter, ParameterStore};
pub use resolve::{GridDefaults, Pipeline, Resolution};

use std::path::Path;

/// Parse and resolve parameter file text with the embedded defaults.
pub fn parse_str(source: &str) -> Result<Resolution> {
    Pipeline::new()?.run(source)
}

/// Read, parse and resolve a parameter file with the embedded defaults.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Resolution> {
    ParameterFileLoader::from_path(path)?.resolve()
}
