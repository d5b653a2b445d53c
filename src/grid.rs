//! The grid hierarchy
//!
//! [`GridHierarchy`] is the resolved description of a computational domain:
//! scalar state (dimension, iteration, time, time step, identity) plus one
//! value per axis for sizes, bounds, spacing, origin, refinement bookkeeping
//! and ghost zones, and one boundary flag per face.
//!
//! All per-axis arrays hold exactly `dimension` values and the boundary array
//! exactly `2 * dimension`. Changing the dimension keeps the overlapping prefix
//! of every array and zero-fills new slots. Cloning yields fully independent
//! storage.

use serde::Serialize;
use std::fmt;

/// Dimension used by [`GridHierarchy::default`].
pub const DEFAULT_DIMENSION: usize = 3;

/// Generates the read, write and "set every axis" accessors for one per-axis field.
macro_rules! axis_accessors {
    ($($field:ident, $field_mut:ident, $set_all:ident: $ty:ty;)*) => {
        $(
            pub fn $field(&self) -> &[$ty] {
                &self.$field
            }

            pub fn $field_mut(&mut self) -> &mut [$ty] {
                &mut self.$field
            }

            pub fn $set_all(&mut self, value: $ty) {
                self.$field.fill(value);
            }
        )*
    };
}

/// Resolved grid description owned by the caller.
///
/// Sizes and refinement values are signed: downstream numerical modules
/// expect signed integers for them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridHierarchy {
    dimension: usize,
    iteration: u32,
    time: f64,
    delta_time: f64,
    identity: String,
    global_size: Vec<i32>,
    local_size: Vec<i32>,
    lower_bound: Vec<i32>,
    upper_bound: Vec<i32>,
    delta_space: Vec<f64>,
    origin_space: Vec<f64>,
    boundary_flags: Vec<i32>,
    level_factor: Vec<i32>,
    level_offset: Vec<i32>,
    level_offset_denominator: Vec<i32>,
    ghost_zones: Vec<i32>,
}

impl GridHierarchy {
    /// Create a hierarchy with zeroed arrays.
    ///
    /// # Panics
    ///
    /// Panics if `dimension` is zero.
    pub fn new(dimension: usize) -> Self {
        assert!(dimension >= 1, "grid hierarchy needs at least one dimension");
        Self {
            dimension,
            iteration: 0,
            time: 0.0,
            delta_time: 0.0,
            identity: String::new(),
            global_size: vec![0; dimension],
            local_size: vec![0; dimension],
            lower_bound: vec![0; dimension],
            upper_bound: vec![0; dimension],
            delta_space: vec![0.0; dimension],
            origin_space: vec![0.0; dimension],
            boundary_flags: vec![0; 2 * dimension],
            level_factor: vec![0; dimension],
            level_offset: vec![0; dimension],
            level_offset_denominator: vec![0; dimension],
            ghost_zones: vec![0; dimension],
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Change the dimension, keeping values below `min(old, new)`.
    ///
    /// # Panics
    ///
    /// Panics if `dimension` is zero.
    pub fn set_dimension(&mut self, dimension: usize) {
        assert!(dimension >= 1, "grid hierarchy needs at least one dimension");

        resize_axis(&mut self.global_size, dimension);
        resize_axis(&mut self.local_size, dimension);
        resize_axis(&mut self.lower_bound, dimension);
        resize_axis(&mut self.upper_bound, dimension);
        resize_axis(&mut self.delta_space, dimension);
        resize_axis(&mut self.origin_space, dimension);
        resize_axis(&mut self.boundary_flags, 2 * dimension);
        resize_axis(&mut self.level_factor, dimension);
        resize_axis(&mut self.level_offset, dimension);
        resize_axis(&mut self.level_offset_denominator, dimension);
        resize_axis(&mut self.ghost_zones, dimension);

        self.dimension = dimension;
    }

    pub fn iteration(&self) -> u32 {
        self.iteration
    }

    pub fn set_iteration(&mut self, iteration: u32) {
        self.iteration = iteration;
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn set_time(&mut self, time: f64) {
        self.time = time;
    }

    pub fn delta_time(&self) -> f64 {
        self.delta_time
    }

    pub fn set_delta_time(&mut self, delta_time: f64) {
        self.delta_time = delta_time;
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn set_identity(&mut self, identity: impl Into<String>) {
        self.identity = identity.into();
    }

    axis_accessors! {
        global_size, global_size_mut, set_global_size_all: i32;
        local_size, local_size_mut, set_local_size_all: i32;
        lower_bound, lower_bound_mut, set_lower_bound_all: i32;
        upper_bound, upper_bound_mut, set_upper_bound_all: i32;
        delta_space, delta_space_mut, set_delta_space_all: f64;
        origin_space, origin_space_mut, set_origin_space_all: f64;
        level_factor, level_factor_mut, set_level_factor_all: i32;
        level_offset, level_offset_mut, set_level_offset_all: i32;
        level_offset_denominator, level_offset_denominator_mut, set_level_offset_denominator_all: i32;
        ghost_zones, ghost_zones_mut, set_ghost_zones_all: i32;
    }

    /// One flag per face, ordered lower/upper for each axis.
    pub fn boundary_flags(&self) -> &[i32] {
        &self.boundary_flags
    }

    pub fn boundary_flags_mut(&mut self) -> &mut [i32] {
        &mut self.boundary_flags
    }

    pub fn set_boundary_flags_all(&mut self, value: i32) {
        self.boundary_flags.fill(value);
    }

    /// Smallest grid spacing over all axes.
    pub fn min_delta_space(&self) -> f64 {
        self.delta_space
            .iter()
            .copied()
            .fold(f64::INFINITY, f64::min)
    }
}

impl Default for GridHierarchy {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSION)
    }
}

fn resize_axis<T: Copy + Default>(values: &mut Vec<T>, len: usize) {
    if len <= values.len() {
        values.truncate(len);
    } else {
        values.resize(len, T::default());
    }
}

impl fmt::Display for GridHierarchy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "dimension        = {}", self.dimension)?;
        writeln!(f, "iteration        = {}", self.iteration)?;
        writeln!(f, "time             = {}", self.time)?;
        writeln!(f, "delta_time       = {}", self.delta_time)?;
        if !self.identity.is_empty() {
            writeln!(f, "identity         = {}", self.identity)?;
        }
        write_axes(f, "global_size", &self.global_size)?;
        write_axes(f, "local_size", &self.local_size)?;
        write_axes(f, "lower_bound", &self.lower_bound)?;
        write_axes(f, "upper_bound", &self.upper_bound)?;
        write_axes(f, "delta_space", &self.delta_space)?;
        write_axes(f, "origin_space", &self.origin_space)?;
        write_axes(f, "level_factor", &self.level_factor)?;
        write_axes(f, "level_offset", &self.level_offset)?;
        write_axes(f, "level_offset_denom", &self.level_offset_denominator)?;
        write_axes(f, "ghost_zones", &self.ghost_zones)?;
        write_axes(f, "boundary_flags", &self.boundary_flags)
    }
}

fn write_axes<T: fmt::Display>(f: &mut fmt::Formatter<'_>, name: &str, values: &[T]) -> fmt::Result {
    let joined = values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    writeln!(f, "{:<16} = [{}]", name, joined)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GridHierarchy {
        let mut grid = GridHierarchy::new(3);
        grid.global_size_mut().copy_from_slice(&[10, 20, 30]);
        grid.delta_space_mut().copy_from_slice(&[0.2, 0.1, 0.3]);
        grid.boundary_flags_mut().copy_from_slice(&[1, 2, 3, 4, 5, 6]);
        grid
    }

    #[test]
    fn test_new_is_zeroed() {
        let grid = GridHierarchy::default();
        assert_eq!(grid.dimension(), 3);
        assert_eq!(grid.iteration(), 0);
        assert_eq!(grid.global_size(), &[0, 0, 0]);
        assert_eq!(grid.boundary_flags().len(), 6);
        assert_eq!(grid.identity(), "");
    }

    #[test]
    fn test_set_all_touches_every_axis() {
        let mut grid = GridHierarchy::new(2);
        grid.set_ghost_zones_all(3);
        grid.set_origin_space_all(-0.5);
        assert_eq!(grid.ghost_zones(), &[3, 3]);
        assert_eq!(grid.origin_space(), &[-0.5, -0.5]);
    }

    #[test]
    fn test_grow_preserves_prefix() {
        let mut grid = sample();
        grid.set_dimension(4);

        assert_eq!(grid.dimension(), 4);
        assert_eq!(grid.global_size(), &[10, 20, 30, 0]);
        assert_eq!(grid.delta_space(), &[0.2, 0.1, 0.3, 0.0]);
        assert_eq!(grid.boundary_flags(), &[1, 2, 3, 4, 5, 6, 0, 0]);
        assert_eq!(grid.ghost_zones().len(), 4);
    }

    #[test]
    fn test_shrink_discards_tail() {
        let mut grid = sample();
        grid.set_dimension(2);

        assert_eq!(grid.global_size(), &[10, 20]);
        assert_eq!(grid.boundary_flags(), &[1, 2, 3, 4]);

        grid.set_dimension(3);
        assert_eq!(grid.global_size(), &[10, 20, 0]);
    }

    #[test]
    fn test_clone_does_not_alias() {
        let original = sample();
        let mut copy = original.clone();
        copy.global_size_mut()[0] = 99;
        copy.set_identity("copy");

        assert_eq!(original.global_size()[0], 10);
        assert_eq!(original.identity(), "");
        assert_eq!(copy.boundary_flags().len(), 2 * copy.dimension());
    }

    #[test]
    fn test_min_delta_space() {
        assert_eq!(sample().min_delta_space(), 0.1);
    }

    #[test]
    #[should_panic]
    fn test_zero_dimension_panics() {
        GridHierarchy::new(0);
    }
}
