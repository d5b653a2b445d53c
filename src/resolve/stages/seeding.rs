//! Defaults stage
//!
//! Creates the hierarchy and fills everything no later stage derives from the
//! parameter file: iteration and time start at zero, refinement factor and
//! offset denominator are one, offsets and boundary flags zero, one ghost zone
//! per axis.

use crate::error::{ConfigurationError, Result};
use crate::grid::GridHierarchy;
use crate::params::ParameterStore;
use crate::resolve::defaults::GridDefaults;
use crate::resolve::transform::Runnable;
use tracing::debug;

/// Highest dimension the resolver has axis keys for.
pub const MAX_DIMENSION: usize = 3;

/// Parameters paired with the defaults record and a freshly seeded hierarchy.
#[derive(Debug, Clone)]
pub struct Seeded {
    pub parameters: ParameterStore,
    pub defaults: GridDefaults,
    pub hierarchy: GridHierarchy,
}

pub struct Seeding {
    defaults: GridDefaults,
}

impl Seeding {
    pub fn new(defaults: GridDefaults) -> Self {
        Self { defaults }
    }
}

impl Runnable<ParameterStore, Seeded> for Seeding {
    fn run(&self, input: ParameterStore) -> Result<Seeded> {
        let dimension = self.defaults.dimension;
        if !(1..=MAX_DIMENSION).contains(&dimension) {
            return Err(ConfigurationError::UnsupportedDimension(dimension).into());
        }

        let mut hierarchy = GridHierarchy::new(dimension);
        hierarchy.set_iteration(0);
        hierarchy.set_time(0.0);
        hierarchy.set_level_factor_all(1);
        hierarchy.set_level_offset_all(0);
        hierarchy.set_level_offset_denominator_all(1);
        hierarchy.set_boundary_flags_all(0);
        hierarchy.set_ghost_zones_all(1);

        debug!(dimension, "seeded grid hierarchy");
        Ok(Seeded {
            parameters: input,
            defaults: self.defaults.clone(),
            hierarchy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParError;
    use crate::resolve::defaults::load_defaults;

    #[test]
    fn test_seeds_refinement_and_ghost_zones() {
        let seeded = Seeding::new(load_defaults().unwrap())
            .run(ParameterStore::new())
            .unwrap();
        let grid = &seeded.hierarchy;

        assert_eq!(grid.dimension(), 3);
        assert_eq!(grid.iteration(), 0);
        assert_eq!(grid.time(), 0.0);
        assert_eq!(grid.level_factor(), &[1, 1, 1]);
        assert_eq!(grid.level_offset(), &[0, 0, 0]);
        assert_eq!(grid.level_offset_denominator(), &[1, 1, 1]);
        assert_eq!(grid.ghost_zones(), &[1, 1, 1]);
        assert_eq!(grid.boundary_flags(), &[0; 6]);
    }

    #[test]
    fn test_rejects_unsupported_dimension() {
        let mut defaults = load_defaults().unwrap();
        defaults.dimension = 4;

        let err = Seeding::new(defaults).run(ParameterStore::new()).unwrap_err();
        assert!(matches!(
            err,
            ParError::Configuration(ConfigurationError::UnsupportedDimension(4))
        ));
    }
}
