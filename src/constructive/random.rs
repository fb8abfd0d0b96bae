//! Randomized assignment for population diversity.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::Solution;
use crate::problem::RideSharingProblem;

/// Builds a random solution.
///
/// The passenger pool is shuffled; each vehicle in fleet order then draws a
/// random number of passengers in `0..=min(capacity, remaining)` from the
/// front of the pool. Passengers left in the pool stay unassigned.
///
/// # Examples
///
/// ```
/// use u_carpool::models::{Coordinate, Passenger, Vehicle};
/// use u_carpool::problem::RideSharingProblem;
/// use u_carpool::constructive::random_assignment;
/// use u_carpool::random::create_rng;
///
/// let vehicles = vec![Vehicle::new(0, Coordinate::new(0.0, 0.0), 2, "a")];
/// let passengers = (0..4)
///     .map(|i| Passenger::new(i, Coordinate::new(0.0, 0.01 * i as f64), "p"))
///     .collect();
/// let problem = RideSharingProblem::new(vehicles, passengers).unwrap();
///
/// let mut rng = create_rng(42);
/// let solution = random_assignment(&problem, &mut rng);
/// assert!(solution.vehicles()[0].len() <= 2);
/// ```
pub fn random_assignment<R: Rng>(problem: &RideSharingProblem, rng: &mut R) -> Solution {
    let mut solution = Solution::from_fleet(problem.vehicles());
    let mut pool = problem.passengers().to_vec();
    pool.shuffle(rng);
    let mut pool = pool.into_iter();

    for vehicle in solution.vehicles_mut().iter_mut() {
        let remaining = pool.len();
        if remaining == 0 {
            break;
        }
        let upper = vehicle.capacity().min(remaining);
        let take = rng.random_range(0..=upper);
        for passenger in pool.by_ref().take(take) {
            vehicle.push_passenger(passenger);
        }
    }

    solution
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinate, Passenger, Vehicle};
    use crate::random::create_rng;

    fn problem(capacities: &[usize], n: usize) -> RideSharingProblem {
        let vehicles = capacities
            .iter()
            .enumerate()
            .map(|(i, &c)| Vehicle::new(i, Coordinate::new(0.0, 0.0), c, format!("d{i}")))
            .collect();
        let passengers = (0..n)
            .map(|i| Passenger::new(i, Coordinate::new(0.0, 0.01 * i as f64), format!("p{i}")))
            .collect();
        RideSharingProblem::new(vehicles, passengers).unwrap()
    }

    #[test]
    fn test_random_respects_capacity_and_uniqueness() {
        let p = problem(&[2, 3, 1], 8);
        let mut rng = create_rng(7);
        for _ in 0..50 {
            let sol = random_assignment(&p, &mut rng);
            for v in sol.vehicles() {
                assert!(!v.is_over_capacity());
            }
            assert_eq!(sol.assigned_ids().len(), sol.num_assigned());
        }
    }

    #[test]
    fn test_random_is_reproducible() {
        let p = problem(&[3, 3], 6);
        let a = random_assignment(&p, &mut create_rng(11));
        let b = random_assignment(&p, &mut create_rng(11));
        assert_eq!(a.assignment_map(), b.assignment_map());
    }

    #[test]
    fn test_random_produces_variety() {
        let p = problem(&[3, 3], 6);
        let mut rng = create_rng(3);
        let first = random_assignment(&p, &mut rng).assignment_map();
        let differs = (0..20).any(|_| random_assignment(&p, &mut rng).assignment_map() != first);
        assert!(differs);
    }
}
