//! Even-distribution assignment.
//!
//! Deals passengers to vehicles round-robin in fleet order, skipping full
//! vehicles, without looking at distance. Produces balanced seat usage as a
//! structurally different seed from the greedy heuristic.

use crate::models::Solution;
use crate::problem::RideSharingProblem;

/// Builds a solution by round-robin dealing.
///
/// # Examples
///
/// ```
/// use u_carpool::models::{Coordinate, Passenger, Vehicle};
/// use u_carpool::problem::RideSharingProblem;
/// use u_carpool::constructive::even_distribution;
///
/// let vehicles = vec![
///     Vehicle::new(0, Coordinate::new(0.0, 0.0), 1, "a"),
///     Vehicle::new(1, Coordinate::new(0.0, 0.0), 3, "b"),
/// ];
/// let passengers = (0..3)
///     .map(|i| Passenger::new(i, Coordinate::new(0.0, 0.01), "p"))
///     .collect();
/// let problem = RideSharingProblem::new(vehicles, passengers).unwrap();
///
/// let solution = even_distribution(&problem);
/// assert_eq!(solution.vehicles()[0].passenger_ids(), vec![0]);
/// assert_eq!(solution.vehicles()[1].passenger_ids(), vec![1, 2]);
/// ```
pub fn even_distribution(problem: &RideSharingProblem) -> Solution {
    let mut solution = Solution::from_fleet(problem.vehicles());
    let n_vehicles = solution.vehicles().len();
    let mut cursor = 0;

    for passenger in problem.passengers() {
        let slot = (0..n_vehicles)
            .map(|offset| (cursor + offset) % n_vehicles)
            .find(|&i| solution.vehicles()[i].remaining_capacity() > 0);

        let Some(vi) = slot else {
            break;
        };
        solution.vehicles_mut()[vi].push_passenger(passenger.clone());
        cursor = (vi + 1) % n_vehicles;
    }

    solution
}
