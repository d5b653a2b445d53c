//! Geometry stage: grid spacing, origin and symmetry
//!
//! - `box`: the unit box `[-0.5, 0.5]`, spacing `1 / n`.
//! - `byrange`: origin at the axis minimum, spacing `(max - min) / (n - 1)`.
//! - `byspacing`: given spacing, grid centered on the origin and shifted by
//!   half a cell on odd axes that avoid the origin.
//!
//! Afterwards every axis lying on a symmetry plane of the domain is moved so
//! that its first interior point sits half a cell (avoiding the origin) or a
//! full cell (not avoiding it) past the plane.

use crate::error::Result;
use crate::grid::GridHierarchy;
use crate::params::ParameterStore;
use crate::resolve::choices::{Domain, GridType};
use crate::resolve::defaults::GridDefaults;
use crate::resolve::keys;
use crate::resolve::stages::decomposition::{Decomposed, Decomposition};
use crate::resolve::stages::read_axes;
use crate::resolve::stages::runtime::RuntimeSettings;
use crate::resolve::transform::Runnable;
use serde::Serialize;
use tracing::debug;

/// Geometry choices that produced the hierarchy's spacing and origin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Geometry {
    pub grid_type: GridType,
    pub domain: Domain,
    pub avoid_origin: [bool; 3],
}

#[derive(Debug, Clone)]
pub struct Shaped {
    pub parameters: ParameterStore,
    pub defaults: GridDefaults,
    pub hierarchy: GridHierarchy,
    pub runtime: RuntimeSettings,
    pub decomposition: Decomposition,
    pub geometry: Geometry,
}

pub struct GeometryStage;

impl GeometryStage {
    fn read_geometry(parameters: &ParameterStore, defaults: &GridDefaults) -> Result<Geometry> {
        let grid_type = match parameters.get_opt::<String>(keys::GRID_TYPE)? {
            Some(name) => name.parse()?,
            None => defaults.grid.grid_type,
        };
        let domain = match parameters.get_opt::<String>(keys::DOMAIN)? {
            Some(name) => name.parse()?,
            None => defaults.grid.domain,
        };
        // The uniform switch can only turn avoidance off.
        let avoid_origin = read_axes(
            parameters,
            defaults.grid.avoid_origin,
            &keys::AVOID_ORIGIN_AXES,
            keys::AVOID_ORIGIN,
            |avoid| !*avoid,
        )?;

        Ok(Geometry {
            grid_type,
            domain,
            avoid_origin,
        })
    }

    fn apply_grid_type(
        hierarchy: &mut GridHierarchy,
        parameters: &ParameterStore,
        defaults: &GridDefaults,
        geometry: &Geometry,
    ) -> Result<()> {
        let dimension = hierarchy.dimension();
        let sizes: Vec<f64> = hierarchy.global_size().iter().map(|&n| f64::from(n)).collect();

        match geometry.grid_type {
            GridType::Box => {
                hierarchy.set_origin_space_all(-0.5);
                for (dx, n) in hierarchy.delta_space_mut().iter_mut().zip(&sizes) {
                    *dx = 1.0 / n;
                }
            }
            GridType::ByRange => {
                let min = read_axes(
                    parameters,
                    defaults.grid.min,
                    &keys::RANGE_MIN_AXES,
                    keys::RANGE_MIN,
                    |_| true,
                )?;
                let max = read_axes(
                    parameters,
                    defaults.grid.max,
                    &keys::RANGE_MAX_AXES,
                    keys::RANGE_MAX,
                    |_| true,
                )?;
                for axis in 0..dimension {
                    hierarchy.origin_space_mut()[axis] = min[axis];
                    hierarchy.delta_space_mut()[axis] = (max[axis] - min[axis]) / (sizes[axis] - 1.0);
                }
            }
            GridType::BySpacing => {
                let spacing = read_axes(
                    parameters,
                    defaults.grid.spacing,
                    &keys::SPACING_AXES,
                    keys::SPACING,
                    |_| true,
                )?;
                let global = hierarchy.global_size().to_vec();
                for axis in 0..dimension {
                    let n = global[axis];
                    let shift = if geometry.avoid_origin[axis] { n % 2 } else { 0 };
                    hierarchy.delta_space_mut()[axis] = spacing[axis];
                    hierarchy.origin_space_mut()[axis] = -0.5 * f64::from(n - 1 - shift) * spacing[axis];
                }
            }
        }
        Ok(())
    }

    fn apply_symmetry(hierarchy: &mut GridHierarchy, geometry: &Geometry) {
        let dimension = hierarchy.dimension();
        for &axis in geometry.domain.mirrored_axes() {
            if axis >= dimension {
                continue;
            }
            let dx = hierarchy.delta_space()[axis];
            hierarchy.origin_space_mut()[axis] = if geometry.avoid_origin[axis] {
                -dx / 2.0
            } else {
                -dx
            };
        }
    }
}

impl Runnable<Decomposed, Shaped> for GeometryStage {
    fn run(&self, input: Decomposed) -> Result<Shaped> {
        let Decomposed {
            parameters,
            defaults,
            mut hierarchy,
            runtime,
            decomposition,
        } = input;

        let geometry = Self::read_geometry(&parameters, &defaults)?;
        Self::apply_grid_type(&mut hierarchy, &parameters, &defaults, &geometry)?;
        Self::apply_symmetry(&mut hierarchy, &geometry);

        debug!(
            grid_type = %geometry.grid_type,
            domain = %geometry.domain,
            spacing = ?hierarchy.delta_space(),
            origin = ?hierarchy.origin_space(),
            "resolved geometry"
        );
        Ok(Shaped {
            parameters,
            defaults,
            hierarchy,
            runtime,
            decomposition,
            geometry,
        })
    }
}
