//! Greedy nearest-vehicle assignment.
//!
//! Repeatedly picks the unassigned passenger closest to the start location of
//! any vehicle that still has a free seat, and appends it to that vehicle's
//! route. Ties go to the vehicle found first in fleet order.
//!
//! # Complexity
//!
//! O(n² × m) where n = passengers and m = vehicles.

use crate::distance::TravelMetric;
use crate::models::{Passenger, Solution};
use crate::problem::RideSharingProblem;

/// Builds a solution with the greedy nearest-vehicle heuristic.
///
/// Stops when every passenger is placed or no seat is left; leftover
/// passengers stay unassigned.
///
/// # Examples
///
/// ```
/// use u_carpool::models::{Coordinate, Passenger, Vehicle};
/// use u_carpool::problem::RideSharingProblem;
/// use u_carpool::constructive::greedy_assignment;
///
/// let vehicles = vec![
///     Vehicle::new(0, Coordinate::new(0.0, 0.0), 1, "West"),
///     Vehicle::new(1, Coordinate::new(0.0, 1.0), 1, "East"),
/// ];
/// let passengers = vec![
///     Passenger::new(10, Coordinate::new(0.0, 0.9), "near east"),
///     Passenger::new(11, Coordinate::new(0.0, 0.1), "near west"),
/// ];
/// let problem = RideSharingProblem::new(vehicles, passengers).unwrap();
///
/// let solution = greedy_assignment(&problem);
/// assert_eq!(solution.vehicles()[0].passenger_ids(), vec![11]);
/// assert_eq!(solution.vehicles()[1].passenger_ids(), vec![10]);
/// ```
pub fn greedy_assignment(problem: &RideSharingProblem) -> Solution {
    let mut solution = Solution::from_fleet(problem.vehicles());
    greedy_fill(&mut solution, problem.passengers().to_vec(), problem.metric());
    solution
}

/// Appends passengers from `pool` to vehicles of `solution` that have free
/// seats, nearest pair first. Returns the passengers that found no seat.
pub fn greedy_fill(
    solution: &mut Solution,
    mut pool: Vec<Passenger>,
    metric: &dyn TravelMetric,
) -> Vec<Passenger> {
    loop {
        if pool.is_empty() {
            break;
        }

        let mut best: Option<(usize, usize, f64)> = None;
        for (vi, vehicle) in solution.vehicles().iter().enumerate() {
            if vehicle.remaining_capacity() == 0 {
                continue;
            }
            for (pi, passenger) in pool.iter().enumerate() {
                let d = metric.distance(vehicle.location(), passenger.location());
                if best.map_or(true, |(_, _, bd)| d < bd) {
                    best = Some((vi, pi, d));
                }
            }
        }

        match best {
            Some((vi, pi, _)) => {
                let passenger = pool.remove(pi);
                solution.vehicles_mut()[vi].push_passenger(passenger);
            }
            None => break,
        }
    }
    pool
}
