//! Value normalization stage

use crate::error::Result;
use crate::params::ParameterStore;
use crate::resolve::transform::Runnable;

/// Normalizes all stored values. A store that is already normalized passes
/// through unchanged.
pub struct Normalization;

impl Runnable<ParameterStore, ParameterStore> for Normalization {
    fn run(&self, mut input: ParameterStore) -> Result<ParameterStore> {
        input.normalize();
        Ok(input)
    }
}
