//! Great-circle distance between placemarks

use geo::Point;

/// Earth radius in kilometers (WGS84 equatorial radius)
pub const EARTH_RADIUS_KM: f64 = 6378.137;

/// Haversine distance in meters between two positions given in decimal degrees
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let to_rad = std::f64::consts::PI / 180.0;

    let d_lat = lat2 * to_rad - lat1 * to_rad;
    let d_lon = lon2 * to_rad - lon1 * to_rad;

    let a = (d_lat / 2.0).sin() * (d_lat / 2.0).sin()
        + (lat1 * to_rad).cos() * (lat2 * to_rad).cos() * (d_lon / 2.0).sin() * (d_lon / 2.0).sin();
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c * 1000.0
}

/// Haversine distance in meters between two points (x = longitude, y = latitude)
pub fn point_distance(from: Point<f64>, to: Point<f64>) -> f64 {
    haversine_distance(from.y(), from.x(), to.y(), to.x())
}
