//! Exact route totals.

use crate::models::Solution;
use crate::problem::RideSharingProblem;

/// Recomputes distance and time on every vehicle from its current route and
/// returns the fleet distance in km.
///
/// Time is distance at the problem's average speed, in minutes. Empty
/// routes get zero totals.
///
/// # Examples
///
/// ```
/// use u_carpool::models::{Coordinate, Passenger, Solution, Vehicle};
/// use u_carpool::problem::RideSharingProblem;
/// use u_carpool::local_search::calculate_exact_metrics;
///
/// let vehicles = vec![Vehicle::new(0, Coordinate::new(0.0, 0.0), 2, "Dana")];
/// let passengers = vec![Passenger::new(1, Coordinate::new(0.0, 0.1), "Ada")];
/// let problem = RideSharingProblem::new(vehicles, passengers).unwrap();
///
/// let mut sol = Solution::from_fleet(problem.vehicles());
/// sol.vehicles_mut()[0].push_passenger(problem.passengers()[0].clone());
/// let total = calculate_exact_metrics(&mut sol, &problem);
/// assert!((total - 11.12).abs() < 0.01);
/// assert!((sol.vehicles()[0].total_time() - total * 2.0).abs() < 1e-9);
/// ```
pub fn calculate_exact_metrics(solution: &mut Solution, problem: &RideSharingProblem) -> f64 {
    let mut total = 0.0;
    for vehicle in solution.vehicles_mut().iter_mut() {
        let distance = problem.route_distance(vehicle);
        let time = problem.route_time(vehicle);
        vehicle.set_totals(distance, time);
        total += distance;
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinate, Passenger, Vehicle};

    #[test]
    fn test_totals_with_destination_and_empty_route() {
        let vehicles = vec![
            Vehicle::new(0, Coordinate::new(0.0, 0.0), 2, "a"),
            Vehicle::new(1, Coordinate::new(1.0, 1.0), 2, "b"),
        ];
        let passengers = vec![
            Passenger::new(1, Coordinate::new(0.0, 0.05), "x"),
            Passenger::new(2, Coordinate::new(0.0, 0.1), "y"),
        ];
        let problem = RideSharingProblem::new(vehicles, passengers)
            .unwrap()
            .with_destination(Coordinate::new(0.0, 0.2))
            .unwrap()
            .with_average_speed(60.0)
            .unwrap();

        let mut sol = Solution::from_fleet(problem.vehicles());
        for p in problem.passengers() {
            sol.vehicles_mut()[0].push_passenger(p.clone());
        }
        sol.vehicles_mut()[1].set_totals(5.0, 5.0);

        let total = calculate_exact_metrics(&mut sol, &problem);
        let v0 = &sol.vehicles()[0];
        assert!((v0.total_distance() - problem.route_distance(v0)).abs() < 1e-12);
        // 60 km/h: minutes equal km.
        assert!((v0.total_time() - v0.total_distance()).abs() < 1e-9);
        assert_eq!(sol.vehicles()[1].total_distance(), 0.0);
        assert_eq!(sol.vehicles()[1].total_time(), 0.0);
        assert!((total - v0.total_distance()).abs() < 1e-12);
        assert!((sol.total_distance() - total).abs() < 1e-12);
    }
}
