//! Individual resolver stages
//!
//! Each stage implements [`Runnable`](crate::resolve::transform::Runnable) and
//! consumes the output type of the stage before it:
//!
//! | stage                  | input             | output            |
//! |------------------------|-------------------|-------------------|
//! | [`LineParsing`]        | `String`          | `ParameterStore`  |
//! | [`Normalization`]      | `ParameterStore`  | `ParameterStore`  |
//! | [`Seeding`]            | `ParameterStore`  | [`Seeded`]        |
//! | [`RuntimeStage`]       | [`Seeded`]        | [`RuntimeResolved`] |
//! | [`DecompositionStage`] | [`RuntimeResolved`] | [`Decomposed`]  |
//! | [`GeometryStage`]      | [`Decomposed`]    | [`Shaped`]        |
//! | [`TimeStepStage`]      | [`Shaped`]        | [`Resolution`](crate::resolve::Resolution) |

pub mod decomposition;
pub mod geometry;
pub mod normalization;
pub mod parsing;
pub mod runtime;
pub mod seeding;
pub mod time_step;

pub use decomposition::{Decomposed, Decomposition, DecompositionStage, SizeSource};
pub use geometry::{Geometry, GeometryStage, Shaped};
pub use normalization::Normalization;
pub use parsing::LineParsing;
pub use runtime::{RuntimeResolved, RuntimeSettings, RuntimeStage};
pub use seeding::{Seeded, Seeding};
pub use time_step::TimeStepStage;

use crate::error::Result;
use crate::params::{FromParameter, ParameterStore};

/// Resolve three per-axis values.
///
/// Starts from `base`, applies every axis key that is present, then replaces
/// all three with the uniform key's value when it is present and `accept`s it.
pub(crate) fn read_axes<T>(
    parameters: &ParameterStore,
    base: [T; 3],
    axis_keys: &[&str; 3],
    uniform_key: &str,
    accept: fn(&T) -> bool,
) -> Result<[T; 3]>
where
    T: FromParameter + Copy,
{
    let mut values = base;
    for (value, key) in values.iter_mut().zip(axis_keys) {
        if let Some(given) = parameters.get_opt::<T>(key)? {
            *value = given;
        }
    }
    if let Some(uniform) = parameters.get_opt::<T>(uniform_key)? {
        if accept(&uniform) {
            values = [uniform; 3];
        }
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    const AXES: [&str; 3] = ["grid::dx", "grid::dy", "grid::dz"];

    #[test]
    fn test_axis_keys_override_base() {
        let params: ParameterStore = [("grid::dy", "0.5")].into_iter().collect();
        let values = read_axes(&params, [0.3; 3], &AXES, "grid::dxyz", |_| true).unwrap();
        assert_eq!(values, [0.3, 0.5, 0.3]);
    }

    #[test]
    fn test_uniform_wins_when_accepted() {
        let params: ParameterStore = [("grid::dy", "0.5"), ("grid::dxyz", "0.1")]
            .into_iter()
            .collect();
        let values = read_axes(&params, [0.3; 3], &AXES, "grid::dxyz", |_| true).unwrap();
        assert_eq!(values, [0.1; 3]);

        let values = read_axes(&params, [0.3; 3], &AXES, "grid::dxyz", |v| *v > 1.0).unwrap();
        assert_eq!(values, [0.3, 0.5, 0.3]);
    }

    #[test]
    fn test_conversion_error_propagates() {
        let params: ParameterStore = [("grid::dz", "wide")].into_iter().collect();
        let err = read_axes(&params, [0.3; 3], &AXES, "grid::dxyz", |_| true).unwrap_err();
        assert!(err.is_conversion());
    }
}
