//! Vehicle type with seat capacity and its current route.

use serde::{Deserialize, Serialize};

use super::{Coordinate, Passenger};

/// A vehicle with its driver, start location and ordered passenger route.
///
/// The order of [`passengers`](Vehicle::passengers) is the visiting
/// sequence. Cloning a vehicle deep-copies its route, so two clones never
/// share assignment state.
///
/// # Examples
///
/// ```
/// use u_carpool::models::{Coordinate, Passenger, Vehicle};
///
/// let mut v = Vehicle::new(0, Coordinate::new(0.0, 0.0), 2, "Dana");
/// v.push_passenger(Passenger::new(1, Coordinate::new(0.0, 0.1), "Ada"));
/// assert_eq!(v.len(), 1);
/// assert_eq!(v.remaining_capacity(), 1);
/// assert_eq!(v.passengers()[0].assigned_vehicle(), Some(0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    id: usize,
    location: Coordinate,
    capacity: usize,
    driver_name: String,
    passengers: Vec<Passenger>,
    total_distance: f64,
    total_time: f64,
}

impl Vehicle {
    /// Creates a vehicle with an empty route.
    pub fn new(
        id: usize,
        location: Coordinate,
        capacity: usize,
        driver_name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            location,
            capacity,
            driver_name: driver_name.into(),
            passengers: Vec::new(),
            total_distance: 0.0,
            total_time: 0.0,
        }
    }

    /// Vehicle ID.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Start location.
    pub fn location(&self) -> Coordinate {
        self.location
    }

    /// Seat capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Driver display name.
    pub fn driver_name(&self) -> &str {
        &self.driver_name
    }

    /// Assigned passengers in visiting order.
    pub fn passengers(&self) -> &[Passenger] {
        &self.passengers
    }

    /// Mutable access to the route.
    ///
    /// Totals are not refreshed; see
    /// [`calculate_exact_metrics`](crate::local_search::calculate_exact_metrics).
    pub fn passengers_mut(&mut self) -> &mut Vec<Passenger> {
        &mut self.passengers
    }

    /// Passenger ids in visiting order.
    pub fn passenger_ids(&self) -> Vec<usize> {
        self.passengers.iter().map(|p| p.id()).collect()
    }

    /// Number of assigned passengers.
    pub fn len(&self) -> usize {
        self.passengers.len()
    }

    /// Returns `true` if nobody is assigned.
    pub fn is_empty(&self) -> bool {
        self.passengers.is_empty()
    }

    /// Free seats (zero when over capacity).
    pub fn remaining_capacity(&self) -> usize {
        self.capacity.saturating_sub(self.passengers.len())
    }

    /// Returns `true` if more passengers are assigned than seats exist.
    pub fn is_over_capacity(&self) -> bool {
        self.passengers.len() > self.capacity
    }

    /// Appends a passenger to the route tail and marks it assigned here.
    pub fn push_passenger(&mut self, mut passenger: Passenger) {
        passenger.set_assigned_vehicle(Some(self.id));
        self.passengers.push(passenger);
    }

    /// Inserts a passenger at `index` and marks it assigned here.
    pub fn insert_passenger(&mut self, index: usize, mut passenger: Passenger) {
        passenger.set_assigned_vehicle(Some(self.id));
        self.passengers.insert(index, passenger);
    }

    /// Removes and returns the passenger at `index`, clearing its assignment.
    pub fn remove_passenger(&mut self, index: usize) -> Passenger {
        let mut p = self.passengers.remove(index);
        p.clear_assignment();
        p
    }

    /// Drops every assigned passenger and resets totals.
    pub fn clear_route(&mut self) {
        self.passengers.clear();
        self.total_distance = 0.0;
        self.total_time = 0.0;
    }

    /// Ordered stop coordinates: start, each passenger, then the destination
    /// if given. An empty route yields no stops since the vehicle stays put.
    pub fn stops(&self, destination: Option<Coordinate>) -> Vec<Coordinate> {
        if self.passengers.is_empty() {
            return Vec::new();
        }
        let mut stops = Vec::with_capacity(self.passengers.len() + 2);
        stops.push(self.location);
        stops.extend(self.passengers.iter().map(|p| p.location()));
        stops.extend(destination);
        stops
    }

    /// Total route distance in km (set by metric recomputation).
    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    /// Total route time in minutes (set by metric recomputation).
    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    /// Sets route totals.
    pub fn set_totals(&mut self, distance: f64, time: f64) {
        self.total_distance = distance;
        self.total_time = time;
    }
}
