//! Time step stage
//!
//! Derives the hierarchy's time step from the already resolved spacing and
//! dimension, then hands the finished hierarchy to the caller.

use crate::error::{ConfigurationError, Result};
use crate::grid::GridHierarchy;
use crate::params::ParameterStore;
use crate::resolve::choices::TimeStepMethod;
use crate::resolve::defaults::TimeDefaults;
use crate::resolve::keys;
use crate::resolve::stages::geometry::Shaped;
use crate::resolve::transform::Runnable;
use crate::resolve::Resolution;
use tracing::debug;

pub struct TimeStepStage;

impl TimeStepStage {
    fn delta_time(
        method: TimeStepMethod,
        parameters: &ParameterStore,
        defaults: &TimeDefaults,
        hierarchy: &GridHierarchy,
    ) -> Result<f64> {
        let dtfac = parameters.get_opt::<f64>(keys::DTFAC)?.unwrap_or(defaults.dtfac);
        let courant_fac = parameters
            .get_opt::<f64>(keys::COURANT_FAC)?
            .unwrap_or(defaults.courant_fac);
        let sqrt_dim = (hierarchy.dimension() as f64).sqrt();

        let delta_time = match method {
            TimeStepMethod::Given => parameters.get_opt::<f64>(keys::TIME_STEP)?.ok_or(
                ConfigurationError::MissingParameter {
                    method: TimeStepMethod::Given.as_str(),
                    key: keys::TIME_STEP,
                },
            )?,
            TimeStepMethod::CourantStatic => dtfac * hierarchy.min_delta_space(),
            TimeStepMethod::CourantSpeed => {
                let wave_speed = parameters.get_opt::<f64>(keys::COURANT_WAVE_SPEED)?.ok_or(
                    ConfigurationError::MissingParameter {
                        method: TimeStepMethod::CourantSpeed.as_str(),
                        key: keys::COURANT_WAVE_SPEED,
                    },
                )?;
                courant_fac * hierarchy.min_delta_space() / wave_speed / sqrt_dim
            }
            TimeStepMethod::CourantTime => {
                let min_time = parameters
                    .get_opt::<f64>(keys::COURANT_MIN_TIME)?
                    .unwrap_or(defaults.courant_min_time);
                courant_fac * min_time / sqrt_dim
            }
        };
        Ok(delta_time)
    }
}

impl Runnable<Shaped, Resolution> for TimeStepStage {
    fn run(&self, input: Shaped) -> Result<Resolution> {
        let Shaped {
            parameters,
            defaults,
            mut hierarchy,
            runtime,
            ..
        } = input;

        let method = match parameters.get_opt::<String>(keys::TIME_STEP_METHOD)? {
            Some(name) => name.parse()?,
            None => defaults.time.method,
        };
        let delta_time = Self::delta_time(method, &parameters, &defaults.time, &hierarchy)?;
        hierarchy.set_delta_time(delta_time);

        debug!(%method, delta_time, "resolved time step");
        Ok(Resolution {
            hierarchy,
            max_iteration: runtime.max_iteration,
            parameters,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParError;
    use crate::resolve::defaults::load_defaults;
    use crate::resolve::stages::{DecompositionStage, GeometryStage, RuntimeStage, Seeding};
    use crate::resolve::transform::Transform;

    fn resolve(pairs: &[(&str, &str)]) -> Result<Resolution> {
        let mut params: ParameterStore = pairs.iter().copied().collect();
        params.normalize();

        Transform::from_fn(|params: ParameterStore| Ok(params))
            .then(Seeding::new(load_defaults().unwrap()))
            .then(RuntimeStage)
            .then(DecompositionStage)
            .then(GeometryStage)
            .then(TimeStepStage)
            .run(params)
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-12, "{actual} != {expected}");
    }

    #[test]
    fn test_courant_static() {
        let out = resolve(&[
            ("grid::type", "byspacing"),
            ("grid::dx", "0.2"),
            ("grid::dy", "0.1"),
            ("grid::dz", "0.3"),
            ("time::dtfac", "0.5"),
        ])
        .unwrap();
        assert_close(out.hierarchy.delta_time(), 0.05);
    }

    #[test]
    fn test_default_dtfac_is_zero() {
        let out = resolve(&[]).unwrap();
        assert_eq!(out.hierarchy.delta_time(), 0.0);
    }

    #[test]
    fn test_given() {
        let out = resolve(&[("time::timestep_method", "given"), ("time::timestep", "0.004")]).unwrap();
        assert_eq!(out.hierarchy.delta_time(), 0.004);
    }

    #[test]
    fn test_given_without_timestep() {
        let err = resolve(&[("time::timestep_method", "Given")]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "time step method \"given\" requires parameter \"time::timestep\""
        );
    }

    #[test]
    fn test_courant_speed() {
        let out = resolve(&[
            ("time::timestep_method", "courant_speed"),
            ("time::courant_fac", "0.6"),
            ("time::courant_wave_speed", "2"),
        ])
        .unwrap();
        // box grid, min spacing 0.1
        assert_close(out.hierarchy.delta_time(), 0.6 * 0.1 / 2.0 / 3f64.sqrt());
    }

    #[test]
    fn test_courant_speed_requires_wave_speed() {
        let err = resolve(&[("time::timestep_method", "courant_speed")]).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_courant_time_uses_default_factor() {
        let out = resolve(&[
            ("time::timestep_method", "courant_time"),
            ("time::courant_min_time", "0.3"),
        ])
        .unwrap();
        assert_close(out.hierarchy.delta_time(), 0.9 * 0.3 / 3f64.sqrt());
    }

    #[test]
    fn test_unknown_method() {
        let err = resolve(&[("time::timestep_method", "adaptive")]).unwrap_err();
        assert!(matches!(
            err,
            ParError::Configuration(ConfigurationError::UnknownTimeStepMethod(_))
        ));
    }

    #[test]
    fn test_max_iteration_travels_with_result() {
        let out = resolve(&[("cactus::cctk_itlast", "128")]).unwrap();
        assert_eq!(out.max_iteration, Some(128));

        let out = resolve(&[]).unwrap();
        assert_eq!(out.max_iteration, None);
    }
}
