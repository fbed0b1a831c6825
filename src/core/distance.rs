use geo::HaversineDistance;

use crate::models::{BoundingBox, GeoPoint};

/// Mean Earth radius in meters, the same one `geo` uses for haversine
pub const EARTH_RADIUS_METERS: f64 = 6_371_008.8;

/// Calculate the great-circle distance between two points in meters
#[inline]
pub fn haversine_distance(from: &GeoPoint, to: &GeoPoint) -> f64 {
    let from: geo::Point<f64> = (*from).into();
    let to: geo::Point<f64> = (*to).into();
    from.haversine_distance(&to)
}

/// Calculate a bounding box that fully contains the circle of `radius_meters`
/// around `center`
///
/// This is much cheaper than haversine and is used as the index-friendly
/// pre-filter. When the circle reaches a pole or crosses the antimeridian the
/// box spans the whole longitude range.
pub fn calculate_bounding_box(center: &GeoPoint, radius_meters: f64) -> BoundingBox {
    let angular = radius_meters.max(0.0) / EARTH_RADIUS_METERS;
    let lat_delta = angular.to_degrees();

    let lat = center.latitude();
    let lon = center.longitude();

    let min_lat = (lat - lat_delta).max(-90.0);
    let max_lat = (lat + lat_delta).min(90.0);

    if min_lat <= -90.0 || max_lat >= 90.0 {
        return BoundingBox { min_lat, max_lat, min_lon: -180.0, max_lon: 180.0 };
    }

    // Widest longitude extent of a spherical cap
    let ratio = angular.sin() / lat.to_radians().cos();
    if !ratio.is_finite() || ratio >= 1.0 {
        return BoundingBox { min_lat, max_lat, min_lon: -180.0, max_lon: 180.0 };
    }
    let lon_delta = ratio.asin().to_degrees();

    let min_lon = lon - lon_delta;
    let max_lon = lon + lon_delta;

    if min_lon < -180.0 || max_lon > 180.0 {
        return BoundingBox { min_lat, max_lat, min_lon: -180.0, max_lon: 180.0 };
    }

    BoundingBox { min_lat, max_lat, min_lon, max_lon }
}

/// Check if a point is within a bounding box
#[inline]
pub fn is_within_bounding_box(point: &GeoPoint, bbox: &BoundingBox) -> bool {
    point.latitude() >= bbox.min_lat
        && point.latitude() <= bbox.max_lat
        && point.longitude() >= bbox.min_lon
        && point.longitude() <= bbox.max_lon
}
