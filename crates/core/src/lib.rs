//! Map Measurement Core Library
//!
//! Length, azimuth and angle measurement for lines drawn on a Web Mercator
//! map, plus the line collection and drawing-session model built on it.

pub mod annotation;
pub mod coordinate;
pub mod measurement;
pub mod mode;
pub mod projection;
pub mod sketch;
pub mod sphere;
pub mod units;

pub use annotation::{LineCollection, LineCoordinates, LineId, LineMetrics, MeasuredLine};
pub use coordinate::{GeoPoint, Line, ProjectedPoint};
pub use measurement::{
    angle, azimuth, calculate_angle, calculate_azimuth, display_length, format_length, length,
    MeasureError, MeasureResult, Quantity,
};
pub use mode::InteractionMode;
pub use projection::{from_geographic, to_geographic};
pub use sketch::{Sketch, SketchKind, Tooltip};
pub use sphere::{GreatCircleLength, Haversine};
pub use units::{AngleUnit, DistanceUnit, UnitsConfig};
