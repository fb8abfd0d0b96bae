//! Intra-route 2-opt improvement.
//!
//! # Algorithm
//!
//! For each pair of passenger positions `i < j` in a vehicle's route,
//! reverse the segment `[i..=j]` and keep the reversal if it strictly
//! shortens the route (start → passengers → destination). Repeat passes
//! until a pass finds no improving reversal or the pass cap is reached
//! (first-improvement strategy).
//!
//! The route is re-measured in full for each candidate, so asymmetric
//! injected metrics are handled exactly. Routes are bounded by seat
//! capacity, which keeps this cheap.
//!
//! # Complexity
//!
//! O(n³) per pass where n = passengers on the route.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use rayon::prelude::*;

use super::path_cost;
use crate::models::{Coordinate, Solution, Vehicle};
use crate::problem::RideSharingProblem;

const EPSILON: f64 = 1e-10;

/// Applies 2-opt to one vehicle's route in place.
///
/// Returns `true` if the route changed. Totals on the vehicle are not
/// refreshed.
///
/// # Examples
///
/// ```
/// use u_carpool::models::{Coordinate, Passenger, Vehicle};
/// use u_carpool::problem::RideSharingProblem;
/// use u_carpool::local_search::two_opt_improve;
///
/// let start = Vehicle::new(0, Coordinate::new(0.0, 0.0), 3, "Dana");
/// let passengers = vec![
///     Passenger::new(1, Coordinate::new(0.0, 0.01), "a"),
///     Passenger::new(2, Coordinate::new(0.0, 0.02), "b"),
///     Passenger::new(3, Coordinate::new(0.0, 0.03), "c"),
/// ];
/// let problem = RideSharingProblem::new(vec![start], passengers.clone()).unwrap();
///
/// let mut v = problem.vehicles()[0].clone();
/// for id in [3, 1, 2] {
///     v.push_passenger(passengers[id - 1].clone());
/// }
/// let before = problem.route_distance(&v);
/// assert!(two_opt_improve(&mut v, &problem, 100));
/// assert!(problem.route_distance(&v) < before);
/// ```
pub fn two_opt_improve(
    vehicle: &mut Vehicle,
    problem: &RideSharingProblem,
    max_passes: usize,
) -> bool {
    let n = vehicle.len();
    if n < 2 {
        return false;
    }

    let start = vehicle.location();
    let destination = problem.destination();
    let metric = problem.metric();
    let mut order: Vec<usize> = (0..n).collect();
    let mut locs: Vec<Coordinate> = vehicle.passengers().iter().map(|p| p.location()).collect();
    let mut current = path_cost(metric, start, &locs, destination);
    let mut changed = false;

    for _ in 0..max_passes {
        let mut improved = false;
        for i in 0..n - 1 {
            for j in i + 1..n {
                locs[i..=j].reverse();
                let candidate = path_cost(metric, start, &locs, destination);
                if candidate < current - EPSILON {
                    order[i..=j].reverse();
                    current = candidate;
                    improved = true;
                } else {
                    locs[i..=j].reverse();
                }
            }
        }
        if !improved {
            break;
        }
        changed = true;
    }

    if changed {
        let mut slots: Vec<_> = std::mem::take(vehicle.passengers_mut())
            .into_iter()
            .map(Some)
            .collect();
        let reordered = order
            .iter()
            .filter_map(|&idx| slots[idx].take())
            .collect();
        *vehicle.passengers_mut() = reordered;
    }
    changed
}

/// Applies 2-opt to every route of `solution`, one worker per vehicle.
///
/// Returns the number of routes that changed.
pub fn improve_all_routes(
    solution: &mut Solution,
    problem: &RideSharingProblem,
    max_passes: usize,
) -> usize {
    solution
        .vehicles_mut()
        .par_iter_mut()
        .map(|v| usize::from(two_opt_improve(v, problem, max_passes)))
        .sum()
}
