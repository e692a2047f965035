//! Spherical Web Mercator projection (EPSG:3857 <-> EPSG:4326)
//!
//! Map geometry is held in projected meters; the measurement code needs
//! geographic degrees for bearings and great-circle distances.

use crate::coordinate::{GeoPoint, ProjectedPoint};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

/// Sphere radius used by Web Mercator, in meters
pub const MERCATOR_RADIUS: f64 = 6_378_137.0;

/// Latitude limit of the square Web Mercator world, in degrees
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Project a geographic point (degrees) onto the map plane
///
/// Latitudes beyond [`MAX_LATITUDE`] are clamped so poles stay finite.
pub fn from_geographic(point: GeoPoint) -> ProjectedPoint {
    let lat = point.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);
    let x = MERCATOR_RADIUS * point.lon.to_radians();
    let y = MERCATOR_RADIUS * (FRAC_PI_4 + lat.to_radians() / 2.0).tan().ln();
    ProjectedPoint::new(x, y)
}

/// Inverse of [`from_geographic`]
pub fn to_geographic(point: ProjectedPoint) -> GeoPoint {
    let lon = (point.x / MERCATOR_RADIUS).to_degrees();
    let lat = (2.0 * (point.y / MERCATOR_RADIUS).exp().atan() - FRAC_PI_2).to_degrees();
    GeoPoint::new(lon, lat)
}
