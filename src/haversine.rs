//! Great-circle distance model.
//!
//! The planner optimizes against straight-line distance on a sphere.
//! Roads and travel time are ignored.

use crate::traits::Point;

/// Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine distance between two (lat, lng) points in meters.
///
/// NaN or infinite coordinates propagate into the result.
pub fn distance(from: Point, to: Point) -> f64 {
    let (lat1, lng1) = from;
    let (lat2, lng2) = to;

    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lng = (lng2 - lng1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Total length of a tour over `points`.
///
/// Closes the loop back to the first point when `round_trip` is set and the
/// tour has more than one stop.
pub fn path_length(points: &[Point], order: &[usize], round_trip: bool) -> f64 {
    let mut total: f64 = order
        .windows(2)
        .map(|pair| distance(points[pair[0]], points[pair[1]]))
        .sum();

    if round_trip && order.len() > 1 {
        total += distance(points[order[order.len() - 1]], points[order[0]]);
    }

    total
}
