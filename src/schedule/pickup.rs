//! Backward pickup-time propagation from a fixed arrival deadline.
//!
//! # Algorithm
//!
//! Each leg's travel time is `distance / speed`. Starting from the target
//! arrival time at the last stop, the time at stop `i` is
//!
//! ```text
//! t_i = target - (total_time - cumulative_time_i)
//! ```
//!
//! so summing leg times forward from any stop lands exactly on the target.
//! A stop whose time precedes the supplied "now" is annotated with
//! [`ScheduleWarning::PickupInPast`]; deciding what to do about it is up to
//! the caller.

use jiff::civil::{Date, DateTime, Time};
use jiff::fmt::strtime;
use jiff::SignedDuration;
use tracing::{instrument, warn};

use crate::distance::TravelMetric;
use crate::error::SolverError;
use crate::models::{Coordinate, RouteDetails, ScheduleWarning, Solution, StopKind, Vehicle};
use crate::problem::RideSharingProblem;

/// Default assumed average speed.
pub const DEFAULT_AVERAGE_SPEED_KMH: f64 = 30.0;

/// Travel time in minutes for `distance_km` at `speed_kmh`.
pub fn travel_minutes(distance_km: f64, speed_kmh: f64) -> f64 {
    distance_km / speed_kmh * 60.0
}

/// Parses a target time of day (`HH:MM` or `HH:MM:SS`) on `day`.
///
/// # Examples
///
/// ```
/// use jiff::civil::date;
/// use u_carpool::schedule::parse_target_time;
///
/// let t = parse_target_time("09:00", date(2024, 3, 4)).unwrap();
/// assert_eq!(t, date(2024, 3, 4).at(9, 0, 0, 0));
/// assert!(parse_target_time("nine", date(2024, 3, 4)).is_err());
/// ```
pub fn parse_target_time(input: &str, day: Date) -> Result<DateTime, SolverError> {
    let trimmed = input.trim();
    ["%H:%M:%S", "%H:%M"]
        .iter()
        .find_map(|fmt| {
            strtime::parse(fmt, trimmed)
                .ok()
                .and_then(|tm| tm.to_time().ok())
        })
        .map(|time: Time| day.to_datetime(time))
        .ok_or_else(|| SolverError::InvalidTargetTime {
            input: input.to_string(),
        })
}

/// Wall-clock time at every stop of `route` so that the last stop is reached
/// exactly at `target`.
///
/// # Errors
///
/// [`SolverError::InvalidTravelTime`] when a metric produced a NaN, infinite
/// or negative lead time; [`SolverError::TimeArithmetic`] when the result
/// falls outside the civil calendar.
pub fn backward_times(route: &RouteDetails, target: DateTime) -> Result<Vec<DateTime>, SolverError> {
    route
        .stops
        .iter()
        .map(|stop| {
            let lead_minutes = route.total_time - stop.cumulative_time;
            if !lead_minutes.is_finite() || lead_minutes < 0.0 {
                return Err(SolverError::InvalidTravelTime {
                    minutes: lead_minutes,
                });
            }
            let lead = SignedDuration::try_from_secs_f64(lead_minutes * 60.0)?;
            Ok(target.checked_sub(lead)?)
        })
        .collect()
}

/// Assigns pickup times so that every vehicle reaches the destination by a
/// fixed deadline.
///
/// # Examples
///
/// ```
/// use jiff::civil::date;
/// use u_carpool::distance::Haversine;
/// use u_carpool::models::{Coordinate, Passenger, Vehicle};
/// use u_carpool::schedule::PickupScheduler;
///
/// let mut v = Vehicle::new(0, Coordinate::new(0.0, 0.0), 2, "Dana");
/// v.push_passenger(Passenger::new(1, Coordinate::new(0.0, 0.05), "Ada"));
/// let target = date(2024, 3, 4).at(9, 0, 0, 0);
/// let now = date(2024, 3, 4).at(7, 0, 0, 0);
///
/// let scheduler = PickupScheduler::default();
/// let details = scheduler
///     .schedule(&v, Some(Coordinate::new(0.0, 0.1)), &Haversine, target, now)
///     .unwrap();
/// assert_eq!(details.stops.last().unwrap().arrival_time, Some(target));
/// assert!(details.stops[1].arrival_time.unwrap() < target);
/// assert!(!details.has_warnings());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickupScheduler {
    speed_kmh: f64,
}

impl Default for PickupScheduler {
    fn default() -> Self {
        Self {
            speed_kmh: DEFAULT_AVERAGE_SPEED_KMH,
        }
    }
}

impl PickupScheduler {
    /// Creates a scheduler with the given average speed.
    pub fn new(speed_kmh: f64) -> Result<Self, SolverError> {
        if !speed_kmh.is_finite() || speed_kmh <= 0.0 {
            return Err(SolverError::InvalidSpeed { speed: speed_kmh });
        }
        Ok(Self { speed_kmh })
    }

    /// Assumed average speed.
    pub fn speed_kmh(&self) -> f64 {
        self.speed_kmh
    }

    /// Computes the timed breakdown of one vehicle's route.
    ///
    /// The last stop (the destination when given, else the last pickup) is
    /// reached at `target`. Stops timed before `now` carry a warning.
    pub fn schedule(
        &self,
        vehicle: &Vehicle,
        destination: Option<Coordinate>,
        metric: &dyn TravelMetric,
        target: DateTime,
        now: DateTime,
    ) -> Result<RouteDetails, SolverError> {
        let mut details = RouteDetails::from_vehicle(vehicle, destination, metric, self.speed_kmh);
        let times = backward_times(&details, target)?;
        for (stop, time) in details.stops.iter_mut().zip(times) {
            stop.arrival_time = Some(time);
            if stop.kind != StopKind::Destination && time < now {
                stop.warning = Some(ScheduleWarning::PickupInPast {
                    scheduled: time,
                    now,
                });
            }
        }
        Ok(details)
    }

    /// Schedules every vehicle of `solution` and writes the pickup time onto
    /// each assigned passenger. Returns one report per vehicle in fleet order.
    #[instrument(skip_all, fields(vehicles = solution.vehicles().len()))]
    pub fn apply(
        &self,
        solution: &mut Solution,
        problem: &RideSharingProblem,
        target: DateTime,
        now: DateTime,
    ) -> Result<Vec<RouteDetails>, SolverError> {
        let mut reports = Vec::with_capacity(solution.vehicles().len());
        for vehicle in solution.vehicles_mut().iter_mut() {
            let details =
                self.schedule(vehicle, problem.destination(), problem.metric(), target, now)?;
            for stop in &details.stops {
                let StopKind::Pickup { passenger_id } = stop.kind else {
                    continue;
                };
                if let Some(p) = vehicle
                    .passengers_mut()
                    .iter_mut()
                    .find(|p| p.id() == passenger_id)
                {
                    p.set_pickup_time(stop.arrival_time);
                }
                if let Some(ScheduleWarning::PickupInPast { scheduled, now }) = stop.warning {
                    warn!(
                        vehicle = details.vehicle_id,
                        passenger = passenger_id,
                        %scheduled,
                        %now,
                        "pickup time is already in the past"
                    );
                }
            }
            reports.push(details);
        }
        Ok(reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::Haversine;
    use crate::models::Passenger;
    use jiff::civil::date;

    fn route() -> (Vehicle, Coordinate) {
        let mut v = Vehicle::new(0, Coordinate::new(0.0, 0.0), 3, "Dana");
        v.push_passenger(Passenger::new(1, Coordinate::new(0.0, 0.05), "A"));
        v.push_passenger(Passenger::new(2, Coordinate::new(0.05, 0.05), "B"));
        v.push_passenger(Passenger::new(3, Coordinate::new(0.05, 0.1), "C"));
        (v, Coordinate::new(0.1, 0.1))
    }

    #[test]
    fn test_travel_minutes() {
        assert!((travel_minutes(15.0, 30.0) - 30.0).abs() < 1e-12);
        assert_eq!(travel_minutes(0.0, 30.0), 0.0);
    }

    #[test]
    fn test_parse_target_time() {
        let day = date(2024, 1, 2);
        assert_eq!(
            parse_target_time("08:15:30", day).unwrap(),
            day.at(8, 15, 30, 0)
        );
        assert_eq!(parse_target_time(" 17:45 ", day).unwrap(), day.at(17, 45, 0, 0));
        for bad in ["", "25:00", "9am", "09:00 tomorrow", "12:60"] {
            assert!(
                matches!(
                    parse_target_time(bad, day),
                    Err(SolverError::InvalidTargetTime { .. })
                ),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_invalid_speed() {
        assert!(PickupScheduler::new(-5.0).is_err());
        assert!(PickupScheduler::new(f64::NAN).is_err());
        assert_eq!(PickupScheduler::new(45.0).unwrap().speed_kmh(), 45.0);
    }

    #[test]
    fn test_times_strictly_increase_to_target() {
        let (v, dest) = route();
        let target = date(2024, 1, 2).at(9, 0, 0, 0);
        let now = date(2024, 1, 2).at(6, 0, 0, 0);
        let d = PickupScheduler::default()
            .schedule(&v, Some(dest), &Haversine, target, now)
            .unwrap();
        let times: Vec<DateTime> = d.stops.iter().map(|s| s.arrival_time.unwrap()).collect();
        assert_eq!(*times.last().unwrap(), target);
        for w in times.windows(2) {
            assert!(w[0] < w[1]);
        }
    }

    #[test]
    fn test_forward_sum_reproduces_target() {
        let (v, dest) = route();
        let target = date(2024, 1, 2).at(9, 0, 0, 0);
        let now = date(2024, 1, 2).at(0, 0, 0, 0);
        let d = PickupScheduler::default()
            .schedule(&v, Some(dest), &Haversine, target, now)
            .unwrap();
        let first_pickup = d.stops[1].arrival_time.unwrap();
        let forward_minutes: f64 = d.stops[2..].iter().map(|s| s.time_from_previous).sum();
        let reached = first_pickup
            .checked_add(SignedDuration::from_secs_f64(forward_minutes * 60.0))
            .unwrap();
        let error = reached.duration_since(target).as_secs_f64().abs();
        assert!(error < 1e-3, "drift of {error}s");
    }

    #[test]
    fn test_past_pickups_are_flagged() {
        let (v, dest) = route();
        let target = date(2024, 1, 2).at(9, 0, 0, 0);
        // "now" is one second before the deadline; every earlier stop is late.
        let now = date(2024, 1, 2).at(8, 59, 59, 0);
        let d = PickupScheduler::default()
            .schedule(&v, Some(dest), &Haversine, target, now)
            .unwrap();
        assert!(d.has_warnings());
        let flagged = d.stops.iter().filter(|s| s.warning.is_some()).count();
        assert_eq!(flagged, d.stops.len() - 1);
        assert!(d.stops.last().unwrap().warning.is_none());
    }

    #[test]
    fn test_without_destination_last_pickup_hits_target() {
        let (v, _) = route();
        let target = date(2024, 1, 2).at(9, 0, 0, 0);
        let d = PickupScheduler::default()
            .schedule(&v, None, &Haversine, target, target)
            .unwrap();
        assert_eq!(d.stops.last().unwrap().kind, StopKind::Pickup { passenger_id: 3 });
        assert_eq!(d.stops.last().unwrap().arrival_time, Some(target));
    }

    #[derive(Debug)]
    struct Broken(f64);

    impl TravelMetric for Broken {
        fn distance(&self, _: Coordinate, _: Coordinate) -> f64 {
            self.0
        }
    }

    #[test]
    fn test_unusable_metric_is_an_error() {
        let (v, dest) = route();
        let target = date(2024, 1, 2).at(9, 0, 0, 0);
        for leg in [f64::NAN, f64::INFINITY, -1.0] {
            let result =
                PickupScheduler::default().schedule(&v, Some(dest), &Broken(leg), target, target);
            assert!(
                matches!(result, Err(SolverError::InvalidTravelTime { .. })),
                "leg of {leg} km"
            );
        }
    }

    #[test]
    fn test_lead_beyond_calendar_is_an_error() {
        let (v, dest) = route();
        let target = date(2024, 1, 2).at(9, 0, 0, 0);
        let result =
            PickupScheduler::default().schedule(&v, Some(dest), &Broken(1e15), target, target);
        assert!(matches!(result, Err(SolverError::TimeArithmetic(_))));
    }

    #[test]
    fn test_apply_writes_pickup_times() {
        let (v, dest) = route();
        let passengers = v.passengers().to_vec();
        let problem = RideSharingProblem::new(vec![v.clone()], passengers)
            .unwrap()
            .with_destination(dest)
            .unwrap();
        let mut sol = Solution::new(vec![v]);
        let target = date(2024, 1, 2).at(9, 0, 0, 0);
        let reports = PickupScheduler::default()
            .apply(&mut sol, &problem, target, date(2024, 1, 2).at(5, 0, 0, 0))
            .unwrap();
        assert_eq!(reports.len(), 1);
        for p in sol.vehicles()[0].passengers() {
            let t = p.pickup_time().expect("scheduled");
            assert!(t < target);
        }
    }
}
