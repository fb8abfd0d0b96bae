//! Great-circle distance.

use crate::models::Coordinate;

/// Mean Earth radius used by the haversine formula, in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two coordinates in kilometers.
///
/// # Examples
///
/// ```
/// use u_carpool::distance::haversine_km;
/// use u_carpool::models::Coordinate;
///
/// let paris = Coordinate::new(48.8566, 2.3522);
/// let london = Coordinate::new(51.5074, -0.1278);
/// let d = haversine_km(paris, london);
/// assert!((d - 343.5).abs() < 2.0);
/// assert_eq!(haversine_km(paris, paris), 0.0);
/// ```
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    if a == b {
        return 0.0;
    }
    let lat1 = a.latitude().to_radians();
    let lat2 = b.latitude().to_radians();
    let dlat = lat2 - lat1;
    let dlon = (b.longitude() - a.longitude()).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // Rounding can push h marginally past 1 for antipodal points.
    let c = 2.0 * h.sqrt().min(1.0).asin();
    EARTH_RADIUS_KM * c
}

/// Sum of consecutive haversine legs over an ordered sequence of points.
///
/// Returns 0 for fewer than two points.
pub fn route_distance(points: &[Coordinate]) -> f64 {
    points.windows(2).map(|w| haversine_km(w[0], w[1])).sum()
}
