//! Display units for distances and angles
//!
//! [`UnitsConfig`] is owned by the caller and handed to every measurement
//! call; the engine only reads it.

use crate::measurement::{MeasureError, MeasureResult};
use std::fmt;
use std::str::FromStr;

/// Unit for displaying line lengths
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum DistanceUnit {
    Miles,
    /// Same display rule as [`DistanceUnit::Meters`]: kilometers are chosen
    /// by the 100 m threshold, not by this selection.
    Kilometers,
    #[default]
    Meters,
}

impl DistanceUnit {
    pub const ALL: [DistanceUnit; 3] =
        [DistanceUnit::Miles, DistanceUnit::Kilometers, DistanceUnit::Meters];

    /// Suffix appended to formatted values
    pub fn symbol(self) -> &'static str {
        match self {
            DistanceUnit::Miles => " miles",
            DistanceUnit::Kilometers => " km",
            DistanceUnit::Meters => " m",
        }
    }

    /// Stable lowercase name, used in config files and on the command line
    pub fn name(self) -> &'static str {
        match self {
            DistanceUnit::Miles => "miles",
            DistanceUnit::Kilometers => "kilometers",
            DistanceUnit::Meters => "meters",
        }
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DistanceUnit {
    type Err = MeasureError;

    fn from_str(s: &str) -> MeasureResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "miles" | "mile" | "mi" => Ok(DistanceUnit::Miles),
            "kilometers" | "kilometer" | "km" => Ok(DistanceUnit::Kilometers),
            "meters" | "meter" | "m" => Ok(DistanceUnit::Meters),
            _ => Err(MeasureError::InvalidConfiguration(format!(
                "unknown distance unit '{s}'"
            ))),
        }
    }
}

impl TryFrom<String> for DistanceUnit {
    type Error = MeasureError;

    fn try_from(value: String) -> MeasureResult<Self> {
        value.parse()
    }
}

impl From<DistanceUnit> for String {
    fn from(unit: DistanceUnit) -> Self {
        unit.name().to_owned()
    }
}

/// Unit for displaying bearings and angles
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum AngleUnit {
    #[default]
    Degrees,
    Radians,
}

impl AngleUnit {
    pub const ALL: [AngleUnit; 2] = [AngleUnit::Degrees, AngleUnit::Radians];

    pub fn symbol(self) -> &'static str {
        match self {
            AngleUnit::Degrees => "°",
            AngleUnit::Radians => " rad",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AngleUnit::Degrees => "degrees",
            AngleUnit::Radians => "radians",
        }
    }
}

impl fmt::Display for AngleUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AngleUnit {
    type Err = MeasureError;

    fn from_str(s: &str) -> MeasureResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "degrees" | "degree" | "deg" => Ok(AngleUnit::Degrees),
            "radians" | "radian" | "rad" => Ok(AngleUnit::Radians),
            _ => Err(MeasureError::InvalidConfiguration(format!(
                "unknown angle unit '{s}'"
            ))),
        }
    }
}

impl TryFrom<String> for AngleUnit {
    type Error = MeasureError;

    fn try_from(value: String) -> MeasureResult<Self> {
        value.parse()
    }
}

impl From<AngleUnit> for String {
    fn from(unit: AngleUnit) -> Self {
        unit.name().to_owned()
    }
}

/// User-selected display units
///
/// Defaults to meters and degrees.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
pub struct UnitsConfig {
    pub distance_unit: DistanceUnit,
    pub angle_unit: AngleUnit,
}

impl UnitsConfig {
    pub fn new(distance_unit: DistanceUnit, angle_unit: AngleUnit) -> Self {
        Self {
            distance_unit,
            angle_unit,
        }
    }

    /// Build a config from unit names
    ///
    /// # Errors
    /// [`MeasureError::InvalidConfiguration`] if either name is not recognized
    pub fn from_names(distance_unit: &str, angle_unit: &str) -> MeasureResult<Self> {
        Ok(Self::new(distance_unit.parse()?, angle_unit.parse()?))
    }

    /// Copy with a different distance unit
    pub fn with_distance_unit(mut self, distance_unit: DistanceUnit) -> Self {
        self.distance_unit = distance_unit;
        self
    }

    /// Copy with a different angle unit
    pub fn with_angle_unit(mut self, angle_unit: AngleUnit) -> Self {
        self.angle_unit = angle_unit;
        self
    }
}
