//! Measurement engine for line features
//!
//! Converts line geometry into display values: geodesic length, initial
//! bearing (azimuth), and the angle between the last two segments of a
//! drawing. Every formatter has a structured counterpart returning a
//! [`Quantity`]; the string functions only render it.
//!
//! All functions are pure. Units are read from the [`UnitsConfig`] passed in
//! on each call and never cached.

use crate::annotation::LineId;
use crate::coordinate::{ensure_finite, GeoPoint, Line, ProjectedPoint};
use crate::sphere::GreatCircleLength;
use crate::units::{AngleUnit, DistanceUnit, UnitsConfig};
use std::f64::consts::{PI, TAU};
use std::fmt;

/// Error types for measurement operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeasureError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("a line needs at least {required} points, got {actual}")]
    TooFewPoints { required: usize, actual: usize },

    #[error("coordinate at index {index} is not a finite number")]
    NonFiniteCoordinate { index: usize },

    #[error("line coordinates are incomplete")]
    IncompleteCoordinates,

    #[error("line not found: {0}")]
    LineNotFound(LineId),
}

/// Result type for measurement operations
pub type MeasureResult<T> = Result<T, MeasureError>;

/// Meters in one statute mile
pub const METERS_PER_MILE: f64 = 1609.34;

pub const METERS_PER_KILOMETER: f64 = 1000.0;

/// Lengths above this many meters are shown in kilometers
pub const KILOMETER_THRESHOLD: f64 = 100.0;

/// Text returned by [`calculate_angle`] when there are not enough vertices
pub const DEGENERATE_ANGLE: &str = "0";

const FULL_CIRCLE_DEGREES: f64 = 360.0;
const DECIMAL_PLACES: usize = 2;

/// A numeric value paired with the unit suffix it is displayed with
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantity {
    value: f64,
    unit: &'static str,
}

impl Quantity {
    pub fn new(value: f64, unit: &'static str) -> Self {
        Self { value, unit }
    }

    /// Value in display units
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Unit suffix, including any leading space (e.g. `" km"`, `"°"`)
    pub fn unit(&self) -> &'static str {
        self.unit
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.*}{}", DECIMAL_PLACES, self.value, self.unit)
    }
}

/// Pick the display unit for a length given in meters
///
/// Miles when selected; otherwise kilometers above [`KILOMETER_THRESHOLD`]
/// and meters at or below it. A `Kilometers` selection follows the meters
/// rule.
pub fn display_length(meters: f64, units: &UnitsConfig) -> Quantity {
    match units.distance_unit {
        DistanceUnit::Miles => {
            Quantity::new(meters / METERS_PER_MILE, DistanceUnit::Miles.symbol())
        }
        DistanceUnit::Kilometers | DistanceUnit::Meters => {
            if meters > KILOMETER_THRESHOLD {
                Quantity::new(
                    meters / METERS_PER_KILOMETER,
                    DistanceUnit::Kilometers.symbol(),
                )
            } else {
                Quantity::new(meters, DistanceUnit::Meters.symbol())
            }
        }
    }
}

/// Geodesic length of `line` in display units
pub fn length<P: GreatCircleLength + ?Sized>(
    line: &Line,
    units: &UnitsConfig,
    provider: &P,
) -> Quantity {
    let meters = provider.length(line.points());
    display_length(meters, units)
}

/// Format the geodesic length of a line, e.g. `"12.34 km"`
pub fn format_length<P: GreatCircleLength + ?Sized>(
    line: &Line,
    units: &UnitsConfig,
    provider: &P,
) -> String {
    length(line, units, provider).to_string()
}

/// Initial great-circle bearing from `start` to `end`, normalized to [0, 360) degrees
pub fn azimuth_degrees(start: GeoPoint, end: GeoPoint) -> f64 {
    let lon1 = start.lon.to_radians();
    let lat1 = start.lat.to_radians();
    let lon2 = end.lon.to_radians();
    let lat2 = end.lat.to_radians();

    let d_lon = lon2 - lon1;
    let y = d_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();

    (y.atan2(x).to_degrees() + FULL_CIRCLE_DEGREES) % FULL_CIRCLE_DEGREES
}

/// Azimuth from `start` to `end` in display units
///
/// The bearing is normalized in degrees first; the radian value is converted
/// from the normalized degrees.
///
/// # Errors
/// [`MeasureError::NonFiniteCoordinate`] if either point is NaN or infinite
/// (index 0 for `start`, 1 for `end`)
pub fn azimuth(start: GeoPoint, end: GeoPoint, units: &UnitsConfig) -> MeasureResult<Quantity> {
    if let Some(index) = [start, end].iter().position(|p| !p.is_finite()) {
        log::warn!("rejecting non-finite azimuth input at index {index}");
        return Err(MeasureError::NonFiniteCoordinate { index });
    }

    let degrees = azimuth_degrees(start, end);
    Ok(match units.angle_unit {
        AngleUnit::Radians => Quantity::new(degrees.to_radians(), AngleUnit::Radians.symbol()),
        AngleUnit::Degrees => Quantity::new(degrees, AngleUnit::Degrees.symbol()),
    })
}

/// Format the azimuth from `start` to `end` (geographic degrees), e.g. `"45.00°"`
pub fn calculate_azimuth(
    start: GeoPoint,
    end: GeoPoint,
    units: &UnitsConfig,
) -> MeasureResult<String> {
    azimuth(start, end, units).map(|q| q.to_string())
}

/// Signed angle between the last two segments, in radians
///
/// With vertices `a, b, c` at the end of `points`, the first segment runs
/// `a -> b` and the second runs `c -> b`, both pointing at the shared vertex.
/// Returns `atan2(second) - atan2(first)`, which lies in [-2π, 2π].
/// `None` with fewer than three points.
pub fn angle_between(points: &[ProjectedPoint]) -> Option<f64> {
    let [a, b, c] = match points {
        [.., a, b, c] => [*a, *b, *c],
        _ => return None,
    };

    let first = (b.y - a.y).atan2(b.x - a.x);
    let second = (b.y - c.y).atan2(b.x - c.x);
    log::debug!("segment headings: first {first:.6} rad, second {second:.6} rad");

    Some(second - first)
}

/// Angle between the last two segments in display units
///
/// `Ok(None)` when fewer than three points are given.
///
/// Degrees are normalized with `(deg + 360) mod 360`; radians add 2π only
/// when negative. Both agree for the [-2π, 2π] range `angle_between` yields.
///
/// The radian value lies in [0, 2π]: a negative `angle_between` smaller in
/// magnitude than half an ulp of 2π rounds up to exactly 2π (`"6.28 rad"`),
/// while the degree value of the same input wraps to `0`.
///
/// # Errors
/// [`MeasureError::NonFiniteCoordinate`] if any vertex is NaN or infinite
pub fn angle(points: &[ProjectedPoint], units: &UnitsConfig) -> MeasureResult<Option<Quantity>> {
    let Some(between) = angle_between(points) else {
        return Ok(None);
    };
    ensure_finite(points)?;

    Ok(Some(match units.angle_unit {
        AngleUnit::Degrees => Quantity::new(
            (between * (180.0 / PI) + FULL_CIRCLE_DEGREES) % FULL_CIRCLE_DEGREES,
            AngleUnit::Degrees.symbol(),
        ),
        AngleUnit::Radians => {
            let radians = if between < 0.0 { between + TAU } else { between };
            Quantity::new(radians, AngleUnit::Radians.symbol())
        }
    }))
}

/// Format the angle between the last two segments, e.g. `"90.00°"`
///
/// Returns the literal [`DEGENERATE_ANGLE`] (`"0"`, no unit) when fewer than
/// three points are given.
pub fn calculate_angle(points: &[ProjectedPoint], units: &UnitsConfig) -> MeasureResult<String> {
    Ok(match angle(points, units)? {
        Some(quantity) => quantity.to_string(),
        None => DEGENERATE_ANGLE.to_string(),
    })
}
