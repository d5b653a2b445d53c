//! Resolution of parameter stores into grid hierarchies
//!
//! # Architecture
//!
//! Resolution is a fixed sequence of stages (see [`stages`]), chained with the
//! [`transform`] machinery so each stage receives the typed output of the one
//! before it:
//!
//! 1. **Normalization** - values cleaned up, exactly once
//! 2. **Seeding** - hierarchy created and filled with defaults
//! 3. **Runtime** - maximum iteration
//! 4. **Decomposition** - global and local sizes
//! 5. **Geometry** - spacing and origin, then symmetry
//! 6. **Time step** - delta time from the resolved spacing
//!
//! Domain defaults come from an immutable [`GridDefaults`] record built once
//! per [`Pipeline`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use pargrid::resolve::Pipeline;
//!
//! let pipeline = Pipeline::new()?;
//! let resolution = pipeline.run("driver::global_nsize = 20\n")?;
//! assert_eq!(resolution.hierarchy.global_size(), &[20, 20, 20]);
//! ```

pub mod choices;
pub mod defaults;
pub mod keys;
pub mod stages;
pub mod transform;

pub use choices::{Domain, GridType, TimeStepMethod};
pub use defaults::{load_defaults, DefaultsLoader, GridDefaults};

use crate::error::Result;
use crate::grid::GridHierarchy;
use crate::params::ParameterStore;
use once_cell::sync::Lazy;
use serde::Serialize;
use stages::{
    DecompositionStage, GeometryStage, LineParsing, Normalization, RuntimeStage, Seeding,
    TimeStepStage,
};
use transform::Transform;

/// Text to normalized store: line parsing followed by normalization.
pub static PARAMETERS: Lazy<Transform<String, ParameterStore>> = Lazy::new(|| {
    Transform::from_fn(|source: String| Ok(source))
        .then(LineParsing::new())
        .then(Normalization)
});

/// Everything one resolution pass produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    pub hierarchy: GridHierarchy,
    /// Last iteration to run, when the file sets one.
    pub max_iteration: Option<u32>,
    /// The normalized parameters, including keys the resolver does not use.
    pub parameters: ParameterStore,
}

/// Build the store-to-hierarchy chain for a defaults record.
pub fn resolver(defaults: GridDefaults) -> Transform<ParameterStore, Resolution> {
    Transform::from_fn(|store: ParameterStore| Ok(store))
        .then(Normalization)
        .then(Seeding::new(defaults))
        .then(RuntimeStage)
        .then(DecompositionStage)
        .then(GeometryStage)
        .then(TimeStepStage)
}

/// A ready-to-run resolver bound to one defaults record.
pub struct Pipeline {
    resolver: Transform<ParameterStore, Resolution>,
}

impl Pipeline {
    /// Pipeline using the embedded defaults.
    pub fn new() -> Result<Self> {
        Ok(Self::with_defaults(load_defaults()?))
    }

    pub fn with_defaults(defaults: GridDefaults) -> Self {
        Self {
            resolver: resolver(defaults),
        }
    }

    /// Parse and resolve parameter file text.
    pub fn run(&self, source: &str) -> Result<Resolution> {
        let store = PARAMETERS.run(source.to_string())?;
        self.resolver.run(store)
    }

    /// Resolve an already parsed store. Raw stores are normalized first.
    pub fn run_store(&self, store: ParameterStore) -> Result<Resolution> {
        self.resolver.run(store)
    }
}
