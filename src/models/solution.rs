//! Solution, violation and validation report types.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Passenger, Vehicle};

/// A type of constraint violation in a solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ViolationType {
    /// More passengers assigned than seats.
    CapacityExceeded {
        /// Overloaded vehicle.
        vehicle_id: usize,
        /// Number of passengers assigned.
        assigned: usize,
        /// Seat capacity.
        capacity: usize,
    },
    /// An available passenger is on no route.
    Unassigned {
        /// Passenger left behind.
        passenger_id: usize,
    },
    /// A passenger appears on more than one route (or twice on one).
    DuplicateAssignment {
        /// Duplicated passenger.
        passenger_id: usize,
        /// Every vehicle carrying it, once per occurrence.
        vehicle_ids: Vec<usize>,
    },
}

/// A constraint violation in a solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ViolationType::CapacityExceeded {
                vehicle_id,
                assigned,
                capacity,
            } => write!(
                f,
                "vehicle {vehicle_id} carries {assigned} passengers but has {capacity} seats"
            ),
            ViolationType::Unassigned { passenger_id } => {
                write!(f, "passenger {passenger_id} is not assigned to any vehicle")
            }
            ViolationType::DuplicateAssignment {
                passenger_id,
                vehicle_ids,
            } => write!(
                f,
                "passenger {passenger_id} is assigned to multiple vehicles {vehicle_ids:?}"
            ),
        }
    }
}

/// Diagnostic list of violations found in a solution.
///
/// This is not a gate; callers decide whether to accept a flagged solution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// All violations found.
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// Returns `true` if no violation was found.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Number of capacity violations.
    pub fn capacity_violations(&self) -> usize {
        self.count(|k| matches!(k, ViolationType::CapacityExceeded { .. }))
    }

    /// Number of unassigned passengers.
    pub fn unassigned(&self) -> usize {
        self.count(|k| matches!(k, ViolationType::Unassigned { .. }))
    }

    /// Number of duplicated passengers.
    pub fn duplicates(&self) -> usize {
        self.count(|k| matches!(k, ViolationType::DuplicateAssignment { .. }))
    }

    fn count(&self, pred: impl Fn(&ViolationType) -> bool) -> usize {
        self.violations.iter().filter(|v| pred(&v.kind)).count()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.violations.is_empty() {
            return writeln!(f, "no violations");
        }
        for v in &self.violations {
            writeln!(f, "- {v}")?;
        }
        Ok(())
    }
}

/// One complete candidate assignment: a deep copy of every vehicle with its
/// route, plus a fitness score (lower is better).
///
/// # Examples
///
/// ```
/// use u_carpool::models::{Coordinate, Passenger, Solution, Vehicle};
///
/// let fleet = vec![Vehicle::new(0, Coordinate::new(0.0, 0.0), 2, "Dana")];
/// let mut sol = Solution::from_fleet(&fleet);
/// sol.vehicles_mut()[0].push_passenger(Passenger::new(1, Coordinate::new(0.0, 0.1), "Ada"));
/// assert_eq!(sol.num_assigned(), 1);
/// assert!(fleet[0].is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    vehicles: Vec<Vehicle>,
    fitness: f64,
}

impl Solution {
    /// Creates a solution from owned vehicles. Fitness starts at infinity.
    pub fn new(vehicles: Vec<Vehicle>) -> Self {
        Self {
            vehicles,
            fitness: f64::INFINITY,
        }
    }

    /// Creates a solution with empty-route copies of the fleet.
    pub fn from_fleet(fleet: &[Vehicle]) -> Self {
        let vehicles = fleet
            .iter()
            .map(|v| {
                let mut copy = v.clone();
                copy.clear_route();
                copy
            })
            .collect();
        Self::new(vehicles)
    }

    /// Vehicles in fleet order.
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Mutable access to the vehicles.
    pub fn vehicles_mut(&mut self) -> &mut Vec<Vehicle> {
        &mut self.vehicles
    }

    /// Looks up a vehicle by id.
    pub fn vehicle(&self, id: usize) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id() == id)
    }

    /// Fitness score (lower is better).
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Sets the fitness score.
    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }

    /// Number of passenger slots filled across all routes.
    pub fn num_assigned(&self) -> usize {
        self.vehicles.iter().map(|v| v.len()).sum()
    }

    /// Ids of every passenger on some route.
    pub fn assigned_ids(&self) -> HashSet<usize> {
        self.vehicles
            .iter()
            .flat_map(|v| v.passengers().iter().map(|p| p.id()))
            .collect()
    }

    /// Number of vehicles with a non-empty route.
    pub fn vehicles_used(&self) -> usize {
        self.vehicles.iter().filter(|v| !v.is_empty()).count()
    }

    /// Sum of vehicle distance totals (km).
    pub fn total_distance(&self) -> f64 {
        self.vehicles.iter().map(|v| v.total_distance()).sum()
    }

    /// Sum of vehicle time totals (minutes).
    pub fn total_time(&self) -> f64 {
        self.vehicles.iter().map(|v| v.total_time()).sum()
    }

    /// Vehicle id → sorted passenger ids. Ignores route order and fitness.
    pub fn assignment_map(&self) -> BTreeMap<usize, Vec<usize>> {
        self.vehicles
            .iter()
            .map(|v| {
                let mut ids = v.passenger_ids();
                ids.sort_unstable();
                (v.id(), ids)
            })
            .collect()
    }

    /// Writes assigned vehicle and pickup time onto caller-owned passengers.
    ///
    /// Passengers absent from every route get their assignment cleared.
    pub fn apply_to(&self, passengers: &mut [Passenger]) {
        for target in passengers.iter_mut() {
            let found = self
                .vehicles
                .iter()
                .flat_map(|v| v.passengers())
                .find(|p| p.id() == target.id());
            match found {
                Some(p) => {
                    target.set_assigned_vehicle(p.assigned_vehicle());
                    target.set_pickup_time(p.pickup_time());
                }
                None => target.clear_assignment(),
            }
        }
    }
}
