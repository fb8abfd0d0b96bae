//! Distance metrics between coordinates.
//!
//! Haversine is the default cost metric; a [`DistanceMatrix`] can be injected
//! when road-network distances are known.

mod haversine;
mod matrix;

pub use haversine::{haversine_km, route_distance, EARTH_RADIUS_KM};
pub use matrix::DistanceMatrix;

use std::fmt::Debug;

use crate::models::Coordinate;

/// A travel cost metric in kilometers.
///
/// Implementations must be shareable across the worker threads that
/// evaluate a population.
pub trait TravelMetric: Send + Sync + Debug {
    /// Distance from `from` to `to` in kilometers.
    fn distance(&self, from: Coordinate, to: Coordinate) -> f64;

    /// Sum of consecutive legs over an ordered sequence of points.
    fn path_distance(&self, points: &[Coordinate]) -> f64 {
        points.windows(2).map(|w| self.distance(w[0], w[1])).sum()
    }
}

/// Great-circle metric (Earth radius 6371 km).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Haversine;

impl TravelMetric for Haversine {
    fn distance(&self, from: Coordinate, to: Coordinate) -> f64 {
        haversine_km(from, to)
    }
}
