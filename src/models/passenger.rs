//! Passenger type.

use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};

use super::Coordinate;

/// A passenger waiting to be picked up.
///
/// The solver reads the location and availability and writes the assigned
/// vehicle id and the computed pickup time.
///
/// # Examples
///
/// ```
/// use u_carpool::models::{Coordinate, Passenger};
///
/// let p = Passenger::new(3, Coordinate::new(1.0, 2.0), "Ada");
/// assert_eq!(p.id(), 3);
/// assert!(p.is_available());
/// assert!(p.assigned_vehicle().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passenger {
    id: usize,
    location: Coordinate,
    name: String,
    available: bool,
    assigned_vehicle: Option<usize>,
    pickup_time: Option<DateTime>,
}

impl Passenger {
    /// Creates an available, unassigned passenger.
    pub fn new(id: usize, location: Coordinate, name: impl Into<String>) -> Self {
        Self {
            id,
            location,
            name: name.into(),
            available: true,
            assigned_vehicle: None,
            pickup_time: None,
        }
    }

    /// Sets the availability flag.
    pub fn with_availability(mut self, available: bool) -> Self {
        self.available = available;
        self
    }

    /// Passenger ID.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Pickup location.
    pub fn location(&self) -> Coordinate {
        self.location
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the passenger takes part in today's run.
    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Id of the vehicle carrying this passenger, if any.
    pub fn assigned_vehicle(&self) -> Option<usize> {
        self.assigned_vehicle
    }

    /// Computed pickup time, if scheduled.
    pub fn pickup_time(&self) -> Option<DateTime> {
        self.pickup_time
    }

    /// Records the assigned vehicle.
    pub fn set_assigned_vehicle(&mut self, vehicle_id: Option<usize>) {
        self.assigned_vehicle = vehicle_id;
    }

    /// Records the pickup time.
    pub fn set_pickup_time(&mut self, time: Option<DateTime>) {
        self.pickup_time = time;
    }

    /// Clears assignment and pickup time.
    pub fn clear_assignment(&mut self) {
        self.assigned_vehicle = None;
        self.pickup_time = None;
    }
}
