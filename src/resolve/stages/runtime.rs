//! Runtime stage: run-length settings that live beside the hierarchy.

use crate::error::Result;
use crate::grid::GridHierarchy;
use crate::params::ParameterStore;
use crate::resolve::defaults::GridDefaults;
use crate::resolve::keys;
use crate::resolve::stages::seeding::Seeded;
use crate::resolve::transform::Runnable;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RuntimeSettings {
    /// Last iteration to run, if the file sets one.
    pub max_iteration: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct RuntimeResolved {
    pub parameters: ParameterStore,
    pub defaults: GridDefaults,
    pub hierarchy: GridHierarchy,
    pub runtime: RuntimeSettings,
}

pub struct RuntimeStage;

impl Runnable<Seeded, RuntimeResolved> for RuntimeStage {
    fn run(&self, input: Seeded) -> Result<RuntimeResolved> {
        let runtime = RuntimeSettings {
            max_iteration: input.parameters.get_opt::<u32>(keys::MAX_ITERATION)?,
        };
        debug!(max_iteration = ?runtime.max_iteration, "resolved runtime settings");

        Ok(RuntimeResolved {
            parameters: input.parameters,
            defaults: input.defaults,
            hierarchy: input.hierarchy,
            runtime,
        })
    }
}
