//! Decomposition stage: global and local grid sizes
//!
//! Local sizes are resolved first. When all three end up positive they become
//! both the global and the local size and the global keys are not read at all.
//! Otherwise the global sizes (defaults, then axis keys, then the uniform key)
//! are used for both. In either case the single local block spans the whole
//! global domain, so the bounds run from `0` to `size - 1`. A resolved size
//! below one is rejected.

use crate::error::{ConfigurationError, Result};
use crate::grid::GridHierarchy;
use crate::params::ParameterStore;
use crate::resolve::defaults::GridDefaults;
use crate::resolve::keys;
use crate::resolve::stages::read_axes;
use crate::resolve::stages::runtime::{RuntimeResolved, RuntimeSettings};
use crate::resolve::transform::Runnable;
use serde::Serialize;
use tracing::debug;

/// Which group of keys determined the sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeSource {
    Local,
    Global,
}

/// Sizes of the axes below the configured dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decomposition {
    pub source: SizeSource,
    pub sizes: Vec<i32>,
}

#[derive(Debug, Clone)]
pub struct Decomposed {
    pub parameters: ParameterStore,
    pub defaults: GridDefaults,
    pub hierarchy: GridHierarchy,
    pub runtime: RuntimeSettings,
    pub decomposition: Decomposition,
}

pub struct DecompositionStage;

impl DecompositionStage {
    /// The three local sizes, if every one of them ends up positive.
    fn requested_local(parameters: &ParameterStore) -> Result<Option<[i32; 3]>> {
        let mut local: [Option<i32>; 3] = [None; 3];
        for (slot, key) in local.iter_mut().zip(keys::LOCAL_SIZE_AXES) {
            *slot = parameters.get_opt::<i32>(key)?;
        }
        if let Some(uniform) = parameters
            .get_opt::<i32>(keys::LOCAL_SIZE)?
            .filter(|n| *n > 0)
        {
            local = [Some(uniform); 3];
        }

        Ok(match local {
            [Some(x), Some(y), Some(z)] if x > 0 && y > 0 && z > 0 => Some([x, y, z]),
            _ => None,
        })
    }

    fn resolve(parameters: &ParameterStore, defaults: &GridDefaults) -> Result<(SizeSource, [i32; 3])> {
        if let Some(local) = Self::requested_local(parameters)? {
            return Ok((SizeSource::Local, local));
        }
        let global = read_axes(
            parameters,
            defaults.decomposition.global_size,
            &keys::GLOBAL_SIZE_AXES,
            keys::GLOBAL_SIZE,
            |n| *n > 0,
        )?;
        Ok((SizeSource::Global, global))
    }
}

impl Runnable<RuntimeResolved, Decomposed> for DecompositionStage {
    fn run(&self, input: RuntimeResolved) -> Result<Decomposed> {
        let RuntimeResolved {
            parameters,
            defaults,
            mut hierarchy,
            runtime,
        } = input;

        let (source, sizes) = Self::resolve(&parameters, &defaults)?;
        let dimension = hierarchy.dimension();
        let sizes = sizes[..dimension].to_vec();
        if let Some((axis, &size)) = sizes.iter().enumerate().find(|(_, n)| **n < 1) {
            return Err(ConfigurationError::NonPositiveSize { axis, size }.into());
        }

        hierarchy.global_size_mut().copy_from_slice(&sizes);
        hierarchy.local_size_mut().copy_from_slice(&sizes);
        hierarchy.set_lower_bound_all(0);
        for (upper, size) in hierarchy.upper_bound_mut().iter_mut().zip(&sizes) {
            *upper = size - 1;
        }

        debug!(?source, ?sizes, "resolved decomposition");
        Ok(Decomposed {
            parameters,
            defaults,
            hierarchy,
            runtime,
            decomposition: Decomposition { source, sizes },
        })
    }
}
