//! Recognized parameter keys
//!
//! Keys are listed lower-cased, the form the store uses. Per-axis keys are
//! ordered x, y, z. Any key not listed here is kept in the store but ignored by
//! the resolver.

pub const MAX_ITERATION: &str = "cactus::cctk_itlast";

pub const GLOBAL_SIZE: &str = "driver::global_nsize";
pub const GLOBAL_SIZE_AXES: [&str; 3] = ["driver::global_nx", "driver::global_ny", "driver::global_nz"];
pub const LOCAL_SIZE: &str = "driver::local_nsize";
pub const LOCAL_SIZE_AXES: [&str; 3] = ["driver::local_nx", "driver::local_ny", "driver::local_nz"];

pub const GRID_TYPE: &str = "grid::type";
pub const DOMAIN: &str = "grid::domain";
pub const AVOID_ORIGIN: &str = "grid::avoid_origin";
pub const AVOID_ORIGIN_AXES: [&str; 3] = ["grid::avoid_originx", "grid::avoid_originy", "grid::avoid_originz"];
pub const RANGE_MIN: &str = "grid::xyzmin";
pub const RANGE_MIN_AXES: [&str; 3] = ["grid::xmin", "grid::ymin", "grid::zmin"];
pub const RANGE_MAX: &str = "grid::xyzmax";
pub const RANGE_MAX_AXES: [&str; 3] = ["grid::xmax", "grid::ymax", "grid::zmax"];
pub const SPACING: &str = "grid::dxyz";
pub const SPACING_AXES: [&str; 3] = ["grid::dx", "grid::dy", "grid::dz"];

pub const TIME_STEP_METHOD: &str = "time::timestep_method";
pub const TIME_STEP: &str = "time::timestep";
pub const DTFAC: &str = "time::dtfac";
pub const COURANT_FAC: &str = "time::courant_fac";
pub const COURANT_WAVE_SPEED: &str = "time::courant_wave_speed";
pub const COURANT_MIN_TIME: &str = "time::courant_min_time";
