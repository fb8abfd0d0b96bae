//! Validated problem instance.

use std::collections::{HashMap, HashSet};

use crate::distance::{Haversine, TravelMetric};
use crate::error::SolverError;
use crate::models::{Coordinate, Passenger, Vehicle};
use crate::schedule::{travel_minutes, DEFAULT_AVERAGE_SPEED_KMH};

/// A ride-sharing instance: the fleet, the available passengers, an
/// optional shared destination and the travel metric.
///
/// Construction validates the input; unavailable passengers are dropped and
/// vehicle routes are cleared.
///
/// # Examples
///
/// ```
/// use u_carpool::models::{Coordinate, Passenger, Vehicle};
/// use u_carpool::problem::RideSharingProblem;
///
/// let vehicles = vec![Vehicle::new(0, Coordinate::new(0.0, 0.0), 3, "Dana")];
/// let passengers = vec![
///     Passenger::new(1, Coordinate::new(0.0, 0.01), "Ada"),
///     Passenger::new(2, Coordinate::new(0.0, 0.02), "Bo").with_availability(false),
/// ];
/// let problem = RideSharingProblem::new(vehicles, passengers)
///     .unwrap()
///     .with_destination(Coordinate::new(0.1, 0.1))
///     .unwrap();
/// assert_eq!(problem.passengers().len(), 1);
/// assert_eq!(problem.total_capacity(), 3);
/// ```
#[derive(Debug)]
pub struct RideSharingProblem {
    vehicles: Vec<Vehicle>,
    passengers: Vec<Passenger>,
    passenger_index: HashMap<usize, usize>,
    destination: Option<Coordinate>,
    metric: Box<dyn TravelMetric>,
    average_speed_kmh: f64,
}

impl RideSharingProblem {
    /// Validates and builds a problem.
    ///
    /// # Errors
    ///
    /// [`SolverError::EmptyFleet`] for no vehicles, [`SolverError::InvalidCapacity`]
    /// for a zero-seat vehicle, [`SolverError::InvalidCoordinate`] for a bad
    /// location and `Duplicate*` for repeated ids. An empty passenger set is
    /// accepted.
    pub fn new(vehicles: Vec<Vehicle>, passengers: Vec<Passenger>) -> Result<Self, SolverError> {
        if vehicles.is_empty() {
            return Err(SolverError::EmptyFleet);
        }

        let mut seen = HashSet::new();
        let mut fleet = Vec::with_capacity(vehicles.len());
        for mut v in vehicles {
            if v.capacity() == 0 {
                return Err(SolverError::InvalidCapacity { vehicle_id: v.id() });
            }
            check_coordinate(v.location(), || format!("vehicle {}", v.id()))?;
            if !seen.insert(v.id()) {
                return Err(SolverError::DuplicateVehicle { id: v.id() });
            }
            v.clear_route();
            fleet.push(v);
        }

        let mut seen = HashSet::new();
        let mut riders = Vec::with_capacity(passengers.len());
        for mut p in passengers {
            if !seen.insert(p.id()) {
                return Err(SolverError::DuplicatePassenger { id: p.id() });
            }
            if !p.is_available() {
                continue;
            }
            check_coordinate(p.location(), || format!("passenger {}", p.id()))?;
            p.clear_assignment();
            riders.push(p);
        }

        let passenger_index = riders.iter().enumerate().map(|(i, p)| (p.id(), i)).collect();

        Ok(Self {
            vehicles: fleet,
            passengers: riders,
            passenger_index,
            destination: None,
            metric: Box::new(Haversine),
            average_speed_kmh: DEFAULT_AVERAGE_SPEED_KMH,
        })
    }

    /// Sets the shared destination; routes then end there.
    pub fn with_destination(mut self, destination: Coordinate) -> Result<Self, SolverError> {
        check_coordinate(destination, || "destination".to_string())?;
        self.destination = Some(destination);
        Ok(self)
    }

    /// Replaces the haversine metric.
    pub fn with_metric(mut self, metric: impl TravelMetric + 'static) -> Self {
        self.metric = Box::new(metric);
        self
    }

    /// Sets the average speed used to turn distance into time.
    pub fn with_average_speed(mut self, speed_kmh: f64) -> Result<Self, SolverError> {
        if !speed_kmh.is_finite() || speed_kmh <= 0.0 {
            return Err(SolverError::InvalidSpeed { speed: speed_kmh });
        }
        self.average_speed_kmh = speed_kmh;
        Ok(self)
    }

    /// The fleet with empty routes.
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Available passengers.
    pub fn passengers(&self) -> &[Passenger] {
        &self.passengers
    }

    /// Looks up an available passenger by id.
    pub fn passenger(&self, id: usize) -> Option<&Passenger> {
        self.passenger_index.get(&id).map(|&i| &self.passengers[i])
    }

    /// Shared destination, if set.
    pub fn destination(&self) -> Option<Coordinate> {
        self.destination
    }

    /// Travel metric.
    pub fn metric(&self) -> &dyn TravelMetric {
        self.metric.as_ref()
    }

    /// Average speed in km/h.
    pub fn average_speed_kmh(&self) -> f64 {
        self.average_speed_kmh
    }

    /// Total seats across the fleet.
    pub fn total_capacity(&self) -> usize {
        self.vehicles.iter().map(|v| v.capacity()).sum()
    }

    /// Route distance for `vehicle` in km: start → passengers → destination.
    /// Zero for an empty route.
    pub fn route_distance(&self, vehicle: &Vehicle) -> f64 {
        self.metric.path_distance(&vehicle.stops(self.destination))
    }

    /// Route travel time for `vehicle` in minutes.
    pub fn route_time(&self, vehicle: &Vehicle) -> f64 {
        travel_minutes(self.route_distance(vehicle), self.average_speed_kmh)
    }
}

fn check_coordinate(c: Coordinate, what: impl FnOnce() -> String) -> Result<(), SolverError> {
    if c.is_valid() {
        Ok(())
    } else {
        Err(SolverError::InvalidCoordinate {
            what: what(),
            latitude: c.latitude(),
            longitude: c.longitude(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::{haversine_km, DistanceMatrix};

    fn vehicle(id: usize, capacity: usize) -> Vehicle {
        Vehicle::new(id, Coordinate::new(0.0, 0.0), capacity, format!("d{id}"))
    }

    fn passenger(id: usize) -> Passenger {
        Passenger::new(id, Coordinate::new(0.0, id as f64 * 0.01), format!("p{id}"))
    }

    #[test]
    fn test_empty_fleet_rejected() {
        let err = RideSharingProblem::new(vec![], vec![passenger(1)]).unwrap_err();
        assert!(matches!(err, SolverError::EmptyFleet));
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let err = RideSharingProblem::new(vec![vehicle(3, 0)], vec![]).unwrap_err();
        assert!(matches!(err, SolverError::InvalidCapacity { vehicle_id: 3 }));
    }

    #[test]
    fn test_duplicates_rejected() {
        let err = RideSharingProblem::new(vec![vehicle(1, 2), vehicle(1, 2)], vec![]).unwrap_err();
        assert!(matches!(err, SolverError::DuplicateVehicle { id: 1 }));
        let err =
            RideSharingProblem::new(vec![vehicle(1, 2)], vec![passenger(4), passenger(4)]).unwrap_err();
        assert!(matches!(err, SolverError::DuplicatePassenger { id: 4 }));
    }

    #[test]
    fn test_bad_coordinates_rejected() {
        let bad = Passenger::new(1, Coordinate::new(f64::NAN, 0.0), "x");
        let err = RideSharingProblem::new(vec![vehicle(0, 1)], vec![bad]).unwrap_err();
        assert!(matches!(err, SolverError::InvalidCoordinate { .. }));

        let problem = RideSharingProblem::new(vec![vehicle(0, 1)], vec![]).unwrap();
        assert!(problem.with_destination(Coordinate::new(0.0, 200.0)).is_err());
    }

    #[test]
    fn test_bad_speed_rejected() {
        let problem = RideSharingProblem::new(vec![vehicle(0, 1)], vec![]).unwrap();
        assert!(matches!(
            problem.with_average_speed(0.0),
            Err(SolverError::InvalidSpeed { .. })
        ));
    }

    #[test]
    fn test_empty_passengers_accepted() {
        let problem = RideSharingProblem::new(vec![vehicle(0, 1)], vec![]).unwrap();
        assert!(problem.passengers().is_empty());
    }

    #[test]
    fn test_unavailable_filtered_and_routes_cleared() {
        let mut v = vehicle(0, 2);
        v.push_passenger(passenger(9));
        let problem = RideSharingProblem::new(
            vec![v],
            vec![passenger(1), passenger(2).with_availability(false)],
        )
        .unwrap();
        assert_eq!(problem.passengers().len(), 1);
        assert!(problem.passenger(2).is_none());
        assert!(problem.passenger(1).is_some());
        assert!(problem.vehicles()[0].is_empty());
    }

    #[test]
    fn test_route_distance_includes_destination() {
        let dest = Coordinate::new(0.1, 0.0);
        let problem = RideSharingProblem::new(vec![vehicle(0, 2)], vec![passenger(1)])
            .unwrap()
            .with_destination(dest)
            .unwrap();
        let mut v = problem.vehicles()[0].clone();
        assert_eq!(problem.route_distance(&v), 0.0);
        v.push_passenger(problem.passengers()[0].clone());
        let p = problem.passengers()[0].location();
        let expected = haversine_km(v.location(), p) + haversine_km(p, dest);
        assert!((problem.route_distance(&v) - expected).abs() < 1e-12);
        assert!((problem.route_time(&v) - expected * 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_injected_metric() {
        let start = Coordinate::new(0.0, 0.0);
        let p = passenger(1);
        let mut dm = DistanceMatrix::from_coordinates(&[start, p.location()]);
        dm.set(0, 1, 42.0).unwrap();
        let problem = RideSharingProblem::new(vec![vehicle(0, 2)], vec![p.clone()])
            .unwrap()
            .with_metric(dm);
        let mut v = problem.vehicles()[0].clone();
        v.push_passenger(p);
        assert_eq!(problem.route_distance(&v), 42.0);
    }
}
