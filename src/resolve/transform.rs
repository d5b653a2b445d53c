//! Composable resolver stages
//!
//! A stage implements [`Runnable<I, O>`]; a [`Transform<I, O>`] chains stages
//! with [`Transform::then`], and the compiler only accepts a stage whose input
//! type is the previous stage's output. The resolver order is therefore fixed
//! by the stage types rather than by call-site discipline:
//!
//! ```rust,ignore
//! let resolver = Transform::from_fn(Ok)
//!     .then(Normalization)              // ParameterStore -> ParameterStore
//!     .then(Seeding::new(defaults))     // ParameterStore -> Seeded
//!     .then(RuntimeStage);              // Seeded -> RuntimeResolved
//! ```
//!
//! Any stage error aborts the chain; nothing after it runs.

use crate::error::Result;

/// A single resolver stage.
pub trait Runnable<I, O> {
    fn run(&self, input: I) -> Result<O>;
}

/// A chain of stages from `I` to `O`.
pub struct Transform<I, O> {
    run_fn: Box<dyn Fn(I) -> Result<O> + Send + Sync>,
}

impl<I, O> Transform<I, O> {
    /// Create a transform from a function
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(I) -> Result<O> + Send + Sync + 'static,
    {
        Transform {
            run_fn: Box::new(f),
        }
    }

    /// Append a stage, extending the output type to the stage's output.
    pub fn then<O2, S>(self, stage: S) -> Transform<I, O2>
    where
        S: Runnable<O, O2> + Send + Sync + 'static,
        I: 'static,
        O: 'static,
        O2: 'static,
    {
        let prev_run = self.run_fn;
        Transform {
            run_fn: Box::new(move |input| {
                let intermediate = prev_run(input)?;
                stage.run(intermediate)
            }),
        }
    }

    /// Execute this transform on the given input
    pub fn run(&self, input: I) -> Result<O> {
        (self.run_fn)(input)
    }
}

impl<I, O> Runnable<I, O> for Transform<I, O>
where
    I: 'static,
    O: 'static,
{
    fn run(&self, input: I) -> Result<O> {
        Transform::run(self, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigurationError, ParError};

    struct DoubleSize;
    impl Runnable<i32, i32> for DoubleSize {
        fn run(&self, input: i32) -> Result<i32> {
            Ok(input * 2)
        }
    }

    struct ToSpacing;
    impl Runnable<i32, f64> for ToSpacing {
        fn run(&self, input: i32) -> Result<f64> {
            Ok(1.0 / f64::from(input))
        }
    }

    struct RejectAll;
    impl Runnable<i32, i32> for RejectAll {
        fn run(&self, input: i32) -> Result<i32> {
            Err(ConfigurationError::UnsupportedDimension(input as usize).into())
        }
    }

    #[test]
    fn test_stages_run_in_order() {
        let transform = Transform::from_fn(|x: i32| Ok(x))
            .then(DoubleSize)
            .then(ToSpacing);

        assert_eq!(transform.run(5).unwrap(), 0.1);
    }

    #[test]
    fn test_error_stops_the_chain() {
        let transform = Transform::from_fn(|x: i32| Ok(x))
            .then(RejectAll)
            .then(DoubleSize);

        assert!(matches!(
            transform.run(7),
            Err(ParError::Configuration(ConfigurationError::UnsupportedDimension(7)))
        ));
    }

    #[test]
    fn test_transform_is_a_stage() {
        let inner = Transform::from_fn(|x: i32| Ok(x)).then(DoubleSize);
        let outer = Transform::from_fn(|x: i32| Ok(x + 1)).then(inner);

        assert_eq!(outer.run(4).unwrap(), 10);
    }
}
