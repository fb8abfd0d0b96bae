//! Coordinate-keyed distance matrix.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{haversine_km, TravelMetric};
use crate::error::SolverError;
use crate::models::Coordinate;

/// A dense n×n distance matrix (kilometers) over a fixed set of locations,
/// stored in row-major order.
///
/// Lookups go through the exact coordinates of the locations. Pairs that
/// involve a coordinate outside the matrix fall back to haversine, so a
/// partial road-network matrix can be injected without covering every point.
/// Every entry is finite and non-negative; the coordinate lookup is rebuilt
/// on deserialization.
///
/// # Examples
///
/// ```
/// use u_carpool::models::Coordinate;
/// use u_carpool::distance::{DistanceMatrix, TravelMetric};
///
/// let a = Coordinate::new(0.0, 0.0);
/// let b = Coordinate::new(0.0, 0.1);
/// let mut dm = DistanceMatrix::from_coordinates(&[a, b]);
/// dm.set(0, 1, 20.0).unwrap();
/// assert_eq!(dm.distance(a, b), 20.0);
/// assert_eq!(dm.size(), 2);
/// assert!(dm.set(1, 0, f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawMatrix", into = "RawMatrix")]
pub struct DistanceMatrix {
    locations: Vec<Coordinate>,
    data: Vec<f64>,
    index: HashMap<(u64, u64), usize>,
}

/// Wire form of [`DistanceMatrix`].
#[derive(Serialize, Deserialize)]
struct RawMatrix {
    locations: Vec<Coordinate>,
    data: Vec<f64>,
}

impl TryFrom<RawMatrix> for DistanceMatrix {
    type Error = SolverError;

    fn try_from(raw: RawMatrix) -> Result<Self, Self::Error> {
        Self::from_data(raw.locations, raw.data)
    }
}

impl From<DistanceMatrix> for RawMatrix {
    fn from(dm: DistanceMatrix) -> Self {
        Self {
            locations: dm.locations,
            data: dm.data,
        }
    }
}

fn check_entry(distance: f64) -> Result<(), SolverError> {
    if distance.is_finite() && distance >= 0.0 {
        Ok(())
    } else {
        Err(SolverError::InvalidMatrix {
            reason: format!("entry {distance} is not a finite non-negative distance"),
        })
    }
}

impl DistanceMatrix {
    /// Computes a haversine distance matrix over the given locations.
    pub fn from_coordinates(locations: &[Coordinate]) -> Self {
        let n = locations.len();
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = haversine_km(locations[i], locations[j]);
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }
        Self::build(locations.to_vec(), data)
    }

    /// Creates a matrix from an explicit n×n grid.
    ///
    /// # Errors
    ///
    /// [`SolverError::InvalidMatrix`] if the data length doesn't match
    /// `locations.len()²` or an entry is NaN, infinite or negative.
    pub fn from_data(locations: Vec<Coordinate>, data: Vec<f64>) -> Result<Self, SolverError> {
        if data.len() != locations.len() * locations.len() {
            return Err(SolverError::InvalidMatrix {
                reason: format!(
                    "{} entries for {} locations",
                    data.len(),
                    locations.len()
                ),
            });
        }
        for &d in &data {
            check_entry(d)?;
        }
        Ok(Self::build(locations, data))
    }

    fn build(locations: Vec<Coordinate>, data: Vec<f64>) -> Self {
        let index = locations
            .iter()
            .enumerate()
            .map(|(i, c)| (c.key(), i))
            .collect();
        Self {
            locations,
            data,
            index,
        }
    }

    /// Returns the distance from location index `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.locations.len() + to]
    }

    /// Sets the distance from location index `from` to `to`.
    ///
    /// # Errors
    ///
    /// [`SolverError::InvalidMatrix`] for a NaN, infinite or negative
    /// distance; the matrix is left unchanged.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) -> Result<(), SolverError> {
        check_entry(distance)?;
        let n = self.locations.len();
        self.data[from * n + to] = distance;
        Ok(())
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.locations.len()
    }

    /// Index of a location, if the matrix covers it.
    pub fn index_of(&self, location: Coordinate) -> Option<usize> {
        self.index.get(&location.key()).copied()
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        let n = self.size();
        for i in 0..n {
            for j in (i + 1)..n {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }
}

impl TravelMetric for DistanceMatrix {
    fn distance(&self, from: Coordinate, to: Coordinate) -> f64 {
        match (self.index_of(from), self.index_of(to)) {
            (Some(i), Some(j)) => self.get(i, j),
            _ => haversine_km(from, to),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Coordinate> {
        vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.0, 0.5),
            Coordinate::new(0.5, 0.5),
        ]
    }

    #[test]
    fn test_from_coordinates_matches_haversine() {
        let locs = sample();
        let dm = DistanceMatrix::from_coordinates(&locs);
        assert_eq!(dm.size(), 3);
        assert!((dm.get(0, 2) - haversine_km(locs[0], locs[2])).abs() < 1e-12);
        assert_eq!(dm.get(1, 1), 0.0);
        assert!(dm.is_symmetric(1e-12));
    }

    #[test]
    fn test_from_data_invalid_size() {
        let err = DistanceMatrix::from_data(sample(), vec![0.0; 4]).unwrap_err();
        assert!(matches!(err, SolverError::InvalidMatrix { .. }));
    }

    #[test]
    fn test_from_data_rejects_bad_entries() {
        let locs = sample()[..2].to_vec();
        for bad in [f64::NAN, f64::INFINITY, -1.0] {
            let result = DistanceMatrix::from_data(locs.clone(), vec![0.0, bad, 1.0, 0.0]);
            assert!(matches!(result, Err(SolverError::InvalidMatrix { .. })), "{bad}");
        }
        let ok = DistanceMatrix::from_data(locs.clone(), vec![0.0, 3.0, 4.0, 0.0]).unwrap();
        assert_eq!(ok.distance(locs[1], locs[0]), 4.0);
    }

    #[test]
    fn test_set_rejects_bad_entries() {
        let mut dm = DistanceMatrix::from_coordinates(&sample());
        let before = dm.get(0, 1);
        assert!(dm.set(0, 1, f64::NAN).is_err());
        assert!(dm.set(0, 1, -0.5).is_err());
        assert_eq!(dm.get(0, 1), before);
    }

    #[test]
    fn test_asymmetric_override() {
        let locs = sample();
        let mut dm = DistanceMatrix::from_coordinates(&locs);
        dm.set(0, 1, 99.0).unwrap();
        assert!(!dm.is_symmetric(1e-9));
        assert_eq!(dm.distance(locs[0], locs[1]), 99.0);
        assert!((dm.distance(locs[1], locs[0]) - haversine_km(locs[1], locs[0])).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_coordinate_falls_back() {
        let dm = DistanceMatrix::from_coordinates(&sample());
        let outside = Coordinate::new(1.0, 1.0);
        let d = dm.distance(sample()[0], outside);
        assert!((d - haversine_km(sample()[0], outside)).abs() < 1e-12);
        assert!(dm.index_of(outside).is_none());
    }

    #[test]
    fn test_lookup_works_after_deserialize() {
        let locs = sample();
        let mut dm = DistanceMatrix::from_coordinates(&locs);
        dm.set(2, 0, 7.5).unwrap();
        let json = serde_json::to_string(&dm).expect("serialize");
        let back: DistanceMatrix = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.index_of(locs[2]), Some(2));
        assert_eq!(back.distance(locs[2], locs[0]), 7.5);
    }

    #[test]
    fn test_deserialize_rejects_bad_matrix() {
        let json = r#"{"locations":[{"latitude":0.0,"longitude":0.0}],"data":[-2.0]}"#;
        assert!(serde_json::from_str::<DistanceMatrix>(json).is_err());
        let short = r#"{"locations":[{"latitude":0.0,"longitude":0.0}],"data":[]}"#;
        assert!(serde_json::from_str::<DistanceMatrix>(short).is_err());
    }
}
