//! Coordinate types for map geometry
//!
//! Two coordinate spaces are in play and are kept as separate types:
//! - [`ProjectedPoint`]: spherical Web Mercator (EPSG:3857), in meters.
//!   Everything drawn on the map lives here.
//! - [`GeoPoint`]: longitude/latitude in degrees (EPSG:4326).
//!   Azimuth and great-circle math take these.

use crate::measurement::{MeasureError, MeasureResult};

/// Point in projected map space (EPSG:3857 meters)
///
/// - Origin (0, 0) at longitude 0, latitude 0
/// - X increases to the east
/// - Y increases to the north
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
}

impl ProjectedPoint {
    /// Create a new projected point
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Planar distance to another point, in projected units
    pub fn distance_to(&self, other: &ProjectedPoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Both components are finite numbers
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Geographic point in degrees
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GeoPoint {
    /// Longitude in degrees, east positive
    pub lon: f64,
    /// Latitude in degrees, north positive
    pub lat: f64,
}

impl GeoPoint {
    /// Create a new geographic point from longitude and latitude (degrees)
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    pub fn is_finite(&self) -> bool {
        self.lon.is_finite() && self.lat.is_finite()
    }
}

/// Line feature: an ordered list of at least two projected vertices
///
/// Vertex order is drawing order. A two-point line is a single measured
/// segment; longer lines come out of drawing sessions.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Line {
    points: Vec<ProjectedPoint>,
}

impl Line {
    /// Minimum number of vertices a line must have
    pub const MIN_POINTS: usize = 2;

    /// Create a line from its vertices
    ///
    /// # Errors
    /// - [`MeasureError::TooFewPoints`] with fewer than two vertices
    /// - [`MeasureError::NonFiniteCoordinate`] if any vertex is NaN or infinite
    pub fn new(points: Vec<ProjectedPoint>) -> MeasureResult<Self> {
        if points.len() < Self::MIN_POINTS {
            return Err(MeasureError::TooFewPoints {
                required: Self::MIN_POINTS,
                actual: points.len(),
            });
        }
        ensure_finite(&points)?;
        Ok(Self { points })
    }

    /// Create a single-segment line
    pub fn segment(start: ProjectedPoint, end: ProjectedPoint) -> MeasureResult<Self> {
        Self::new(vec![start, end])
    }

    /// All vertices in drawing order
    pub fn points(&self) -> &[ProjectedPoint] {
        &self.points
    }

    pub fn first(&self) -> ProjectedPoint {
        self.points[0]
    }

    pub fn last(&self) -> ProjectedPoint {
        self.points[self.points.len() - 1]
    }

    /// Number of vertices (always >= 2)
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Lines are never empty; present for API symmetry with slices
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Distance from `point` to the closest segment of this line (projected units)
    pub fn distance_to_point(&self, point: &ProjectedPoint) -> f64 {
        self.points
            .windows(2)
            .map(|w| distance_to_segment(point, &w[0], &w[1]))
            .fold(f64::INFINITY, f64::min)
    }
}

/// Reject NaN and infinite vertices, reporting the first offending index
pub(crate) fn ensure_finite(points: &[ProjectedPoint]) -> MeasureResult<()> {
    match points.iter().position(|p| !p.is_finite()) {
        Some(index) => {
            log::warn!("rejecting non-finite vertex at index {index}");
            Err(MeasureError::NonFiniteCoordinate { index })
        }
        None => Ok(()),
    }
}

fn distance_to_segment(
    point: &ProjectedPoint,
    start: &ProjectedPoint,
    end: &ProjectedPoint,
) -> f64 {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let length_sq = dx * dx + dy * dy;

    if length_sq < 1e-12 {
        // Degenerate segment
        return point.distance_to(start);
    }

    let t = ((point.x - start.x) * dx + (point.y - start.y) * dy) / length_sq;
    let t = t.clamp(0.0, 1.0);

    let closest = ProjectedPoint::new(start.x + t * dx, start.y + t * dy);
    point.distance_to(&closest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projected_distance() {
        let p1 = ProjectedPoint::new(0.0, 0.0);
        let p2 = ProjectedPoint::new(3.0, 4.0);
        assert!((p1.distance_to(&p2) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_line_requires_two_points() {
        let err = Line::new(vec![ProjectedPoint::new(1.0, 1.0)]).unwrap_err();
        assert_eq!(
            err,
            MeasureError::TooFewPoints {
                required: 2,
                actual: 1
            }
        );
        assert!(Line::new(Vec::new()).is_err());
    }

    #[test]
    fn test_line_rejects_nan() {
        let err = Line::new(vec![
            ProjectedPoint::new(0.0, 0.0),
            ProjectedPoint::new(f64::NAN, 1.0),
        ])
        .unwrap_err();
        assert_eq!(err, MeasureError::NonFiniteCoordinate { index: 1 });
    }

    #[test]
    fn test_line_endpoints() {
        let line = Line::new(vec![
            ProjectedPoint::new(0.0, 0.0),
            ProjectedPoint::new(5.0, 5.0),
            ProjectedPoint::new(10.0, 0.0),
        ])
        .unwrap();
        assert_eq!(line.len(), 3);
        assert_eq!(line.first(), ProjectedPoint::new(0.0, 0.0));
        assert_eq!(line.last(), ProjectedPoint::new(10.0, 0.0));
    }

    #[test]
    fn test_distance_to_point() {
        let line = Line::segment(ProjectedPoint::new(0.0, 0.0), ProjectedPoint::new(100.0, 0.0))
            .unwrap();

        // Perpendicular foot inside the segment
        assert!((line.distance_to_point(&ProjectedPoint::new(50.0, 10.0)) - 10.0).abs() < 1e-9);
        // Beyond the end clamps to the endpoint
        assert!((line.distance_to_point(&ProjectedPoint::new(103.0, 4.0)) - 5.0).abs() < 1e-9);
    }
}
