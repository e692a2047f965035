//! Great-circle lengths on a spherical earth

use crate::coordinate::{GeoPoint, ProjectedPoint};
use crate::projection::to_geographic;

/// Mean earth radius in meters
pub const EARTH_MEAN_RADIUS: f64 = 6_371_008.8;

/// Provider of geodesic line lengths
///
/// Implementations receive the line's vertices in projected map space and
/// return the summed great-circle length of consecutive segments in meters.
pub trait GreatCircleLength {
    fn length(&self, points: &[ProjectedPoint]) -> f64;
}

/// Haversine great-circle distance on a sphere
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Haversine {
    radius: f64,
}

impl Haversine {
    /// Create a provider for a sphere of the given radius (meters)
    pub fn with_radius(radius: f64) -> Self {
        Self { radius }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Great-circle distance between two geographic points, in meters
    pub fn distance(&self, a: GeoPoint, b: GeoPoint) -> f64 {
        let lat1 = a.lat.to_radians();
        let lat2 = b.lat.to_radians();
        let d_lat = lat2 - lat1;
        let d_lon = (b.lon - a.lon).to_radians();

        let h = (d_lat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        2.0 * self.radius * h.sqrt().atan2((1.0 - h).sqrt())
    }
}

impl Default for Haversine {
    fn default() -> Self {
        Self::with_radius(EARTH_MEAN_RADIUS)
    }
}

impl GreatCircleLength for Haversine {
    fn length(&self, points: &[ProjectedPoint]) -> f64 {
        points
            .windows(2)
            .map(|w| self.distance(to_geographic(w[0]), to_geographic(w[1])))
            .sum()
    }
}

impl<T: GreatCircleLength + ?Sized> GreatCircleLength for &T {
    fn length(&self, points: &[ProjectedPoint]) -> f64 {
        (**self).length(points)
    }
}
