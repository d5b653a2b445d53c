//! Enumerated resolver settings
//!
//! Grid type, symmetry domain and time step method arrive as free text. They are
//! translated here, once, into closed enums; an unknown word is a
//! [`ConfigurationError`] naming the offending value. Matching ignores case.

use crate::error::ConfigurationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How spacing and origin are derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridType {
    /// Unit box centered on the origin.
    Box,
    /// Explicit coordinate range per axis.
    ByRange,
    /// Explicit spacing per axis, centered on the origin.
    BySpacing,
}

impl GridType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GridType::Box => "box",
            GridType::ByRange => "byrange",
            GridType::BySpacing => "byspacing",
        }
    }
}

impl FromStr for GridType {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "box" => Ok(GridType::Box),
            "byrange" => Ok(GridType::ByRange),
            "byspacing" => Ok(GridType::BySpacing),
            _ => Err(ConfigurationError::UnknownGridType(s.to_string())),
        }
    }
}

/// Reflection symmetry of the simulated domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Full,
    /// z >= 0
    Bitant,
    /// x >= 0, y >= 0
    Quadrant,
    /// x >= 0, y >= 0, z >= 0
    Octant,
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Full => "full",
            Domain::Bitant => "bitant",
            Domain::Quadrant => "quadrant",
            Domain::Octant => "octant",
        }
    }

    /// Axes whose origin sits on a symmetry plane.
    pub fn mirrored_axes(&self) -> &'static [usize] {
        match self {
            Domain::Full => &[],
            Domain::Bitant => &[2],
            Domain::Quadrant => &[0, 1],
            Domain::Octant => &[0, 1, 2],
        }
    }
}

impl FromStr for Domain {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "full" => Ok(Domain::Full),
            "bitant" => Ok(Domain::Bitant),
            "quadrant" => Ok(Domain::Quadrant),
            "octant" => Ok(Domain::Octant),
            _ => Err(ConfigurationError::UnknownDomain(s.to_string())),
        }
    }
}

/// Rule that produces the time step size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeStepMethod {
    /// Taken verbatim from `time::timestep`.
    Given,
    /// `dtfac * min(dx)`
    CourantStatic,
    /// `courant_fac * min(dx) / courant_wave_speed / sqrt(dim)`
    CourantSpeed,
    /// `courant_fac * courant_min_time / sqrt(dim)`
    CourantTime,
}

impl TimeStepMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeStepMethod::Given => "given",
            TimeStepMethod::CourantStatic => "courant_static",
            TimeStepMethod::CourantSpeed => "courant_speed",
            TimeStepMethod::CourantTime => "courant_time",
        }
    }
}

impl FromStr for TimeStepMethod {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "given" => Ok(TimeStepMethod::Given),
            "courant_static" => Ok(TimeStepMethod::CourantStatic),
            "courant_speed" => Ok(TimeStepMethod::CourantSpeed),
            "courant_time" => Ok(TimeStepMethod::CourantTime),
            _ => Err(ConfigurationError::UnknownTimeStepMethod(s.to_string())),
        }
    }
}

impl fmt::Display for GridType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for TimeStepMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ignores_case() {
        assert_eq!("ByRange".parse::<GridType>().unwrap(), GridType::ByRange);
        assert_eq!("OCTANT".parse::<Domain>().unwrap(), Domain::Octant);
        assert_eq!(
            "Courant_Speed".parse::<TimeStepMethod>().unwrap(),
            TimeStepMethod::CourantSpeed
        );
    }

    #[test]
    fn test_unknown_values_are_named() {
        let err = "coordbase".parse::<GridType>().unwrap_err();
        assert_eq!(err.to_string(), "unknown grid type \"coordbase\"");

        let err = "Hemisphere".parse::<Domain>().unwrap_err();
        assert_eq!(err.to_string(), "unknown domain \"Hemisphere\"");

        let err = "adaptive".parse::<TimeStepMethod>().unwrap_err();
        assert_eq!(err.to_string(), "unknown time step method \"adaptive\"");
    }

    #[test]
    fn test_round_trip_through_display() {
        for method in [
            TimeStepMethod::Given,
            TimeStepMethod::CourantStatic,
            TimeStepMethod::CourantSpeed,
            TimeStepMethod::CourantTime,
        ] {
            assert_eq!(method.to_string().parse::<TimeStepMethod>().unwrap(), method);
        }
    }

    #[test]
    fn test_mirrored_axes() {
        assert!(Domain::Full.mirrored_axes().is_empty());
        assert_eq!(Domain::Bitant.mirrored_axes(), &[2]);
        assert_eq!(Domain::Quadrant.mirrored_axes(), &[0, 1]);
        assert_eq!(Domain::Octant.mirrored_axes(), &[0, 1, 2]);
    }
}
