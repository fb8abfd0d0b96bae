//! Per-stop route breakdown.

use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};

use super::{Coordinate, Vehicle};
use crate::distance::TravelMetric;
use crate::schedule::travel_minutes;

/// What happens at a stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopKind {
    /// The vehicle's start location.
    Start,
    /// A passenger pickup.
    Pickup {
        /// Passenger picked up here.
        passenger_id: usize,
    },
    /// The shared destination.
    Destination,
}

/// A scheduling problem attached to a stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduleWarning {
    /// The computed time at this stop precedes "now".
    PickupInPast {
        /// Computed time.
        scheduled: DateTime,
        /// Reference time it was checked against.
        now: DateTime,
    },
}

/// One stop of a route with leg and cumulative metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopDetail {
    /// Position in the route (0 = start).
    pub sequence: usize,
    /// What happens here.
    pub kind: StopKind,
    /// Stop location.
    pub location: Coordinate,
    /// Distance of the leg ending here (km).
    pub distance_from_previous: f64,
    /// Travel time of the leg ending here (minutes).
    pub time_from_previous: f64,
    /// Distance from the start (km).
    pub cumulative_distance: f64,
    /// Travel time from the start (minutes).
    pub cumulative_time: f64,
    /// Wall-clock time at this stop, once scheduled.
    pub arrival_time: Option<DateTime>,
    /// Feasibility annotation.
    pub warning: Option<ScheduleWarning>,
}

/// Derived report for one vehicle's route. Regenerated on demand; has no
/// lifecycle of its own.
///
/// # Examples
///
/// ```
/// use u_carpool::distance::Haversine;
/// use u_carpool::models::{Coordinate, Passenger, RouteDetails, StopKind, Vehicle};
///
/// let mut v = Vehicle::new(0, Coordinate::new(0.0, 0.0), 2, "Dana");
/// v.push_passenger(Passenger::new(1, Coordinate::new(0.0, 0.1), "Ada"));
/// let details = RouteDetails::from_vehicle(&v, Some(Coordinate::new(0.0, 0.2)), &Haversine, 30.0);
/// assert_eq!(details.stops.len(), 3);
/// assert_eq!(details.stops[1].kind, StopKind::Pickup { passenger_id: 1 });
/// assert_eq!(details.stops[2].kind, StopKind::Destination);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteDetails {
    /// Vehicle this route belongs to.
    pub vehicle_id: usize,
    /// Stops in visiting order.
    pub stops: Vec<StopDetail>,
    /// Total distance (km).
    pub total_distance: f64,
    /// Total travel time (minutes).
    pub total_time: f64,
}

impl RouteDetails {
    /// Builds the breakdown for `vehicle`: start, each pickup, then the
    /// destination if given. An empty route yields no stops.
    pub fn from_vehicle(
        vehicle: &Vehicle,
        destination: Option<Coordinate>,
        metric: &dyn TravelMetric,
        speed_kmh: f64,
    ) -> Self {
        let mut details = Self {
            vehicle_id: vehicle.id(),
            stops: Vec::new(),
            total_distance: 0.0,
            total_time: 0.0,
        };
        if vehicle.is_empty() {
            return details;
        }

        let mut kinds = Vec::with_capacity(vehicle.len() + 2);
        kinds.push((StopKind::Start, vehicle.location()));
        for p in vehicle.passengers() {
            kinds.push((
                StopKind::Pickup {
                    passenger_id: p.id(),
                },
                p.location(),
            ));
        }
        if let Some(dest) = destination {
            kinds.push((StopKind::Destination, dest));
        }

        let mut prev = vehicle.location();
        let mut cumulative_distance = 0.0;
        let mut cumulative_time = 0.0;
        for (sequence, (kind, location)) in kinds.into_iter().enumerate() {
            let leg = metric.distance(prev, location);
            let minutes = travel_minutes(leg, speed_kmh);
            cumulative_distance += leg;
            cumulative_time += minutes;
            details.stops.push(StopDetail {
                sequence,
                kind,
                location,
                distance_from_previous: leg,
                time_from_previous: minutes,
                cumulative_distance,
                cumulative_time,
                arrival_time: None,
                warning: None,
            });
            prev = location;
        }
        details.total_distance = cumulative_distance;
        details.total_time = cumulative_time;
        details
    }

    /// Returns `true` if any stop carries a warning.
    pub fn has_warnings(&self) -> bool {
        self.stops.iter().any(|s| s.warning.is_some())
    }
}
