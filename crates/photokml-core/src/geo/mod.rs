//! Geo module for coordinate math
//!
//! This module provides DMS to decimal conversion and great-circle distances.

pub mod coordinates;
pub mod distance;

// Re-export key types for convenience
pub use coordinates::{dms_to_decimal, Dms, Hemisphere, Rational};
pub use distance::{haversine_distance, point_distance, EARTH_RADIUS_KM};
