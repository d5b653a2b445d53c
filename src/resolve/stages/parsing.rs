//! Line parsing stage
//!
//! Turns parameter file text into a raw [`ParameterStore`].

use crate::error::Result;
use crate::params::{parse_source, ParameterStore};
use crate::resolve::transform::Runnable;

pub struct LineParsing;

impl LineParsing {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LineParsing {
    fn default() -> Self {
        Self::new()
    }
}

impl Runnable<String, ParameterStore> for LineParsing {
    fn run(&self, input: String) -> Result<ParameterStore> {
        parse_source(&input)
    }
}
