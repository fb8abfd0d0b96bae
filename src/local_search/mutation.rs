//! Mutation operators on whole solutions.
//!
//! Each operator perturbs one [`Solution`] in place and reports whether it
//! changed anything. None of them checks capacity except
//! [`move_between_vehicles`], which prefers a target with a free seat; the
//! fitness penalty handles the rest.

use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;

use super::two_opt::two_opt_improve;
use crate::models::Solution;
use crate::problem::RideSharingProblem;

/// Mutation variants, chosen uniformly by [`mutate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mutation {
    /// Exchange one passenger between two vehicles.
    Swap,
    /// Shuffle a window of one vehicle's visiting order.
    Reorder,
    /// Move one passenger to another vehicle.
    Move,
    /// Run 2-opt on one vehicle.
    TwoOpt,
}

impl Mutation {
    const ALL: [Mutation; 4] = [
        Mutation::Swap,
        Mutation::Reorder,
        Mutation::Move,
        Mutation::TwoOpt,
    ];

    /// Draws a variant uniformly.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// Applies one uniformly chosen mutation. Returns the variant and whether the
/// solution changed.
///
/// # Examples
///
/// ```
/// use u_carpool::models::{Coordinate, Passenger, Vehicle};
/// use u_carpool::problem::RideSharingProblem;
/// use u_carpool::constructive::greedy_assignment;
/// use u_carpool::local_search::mutate;
/// use u_carpool::random::create_rng;
///
/// let vehicles = vec![
///     Vehicle::new(0, Coordinate::new(0.0, 0.0), 3, "a"),
///     Vehicle::new(1, Coordinate::new(0.0, 0.1), 3, "b"),
/// ];
/// let passengers = (1..=4)
///     .map(|i| Passenger::new(i, Coordinate::new(0.0, 0.02 * i as f64), "p"))
///     .collect();
/// let problem = RideSharingProblem::new(vehicles, passengers).unwrap();
///
/// let mut sol = greedy_assignment(&problem);
/// let mut rng = create_rng(7);
/// mutate(&mut sol, &problem, &mut rng, 100);
/// assert_eq!(sol.assigned_ids().len(), 4);
/// ```
pub fn mutate<R: Rng>(
    solution: &mut Solution,
    problem: &RideSharingProblem,
    rng: &mut R,
    two_opt_max_iterations: usize,
) -> (Mutation, bool) {
    let kind = Mutation::random(rng);
    let changed = match kind {
        Mutation::Swap => swap_between_vehicles(solution, rng),
        Mutation::Reorder => reorder_within_vehicle(solution, rng),
        Mutation::Move => move_between_vehicles(solution, rng),
        Mutation::TwoOpt => {
            two_opt_random_vehicle(solution, problem, rng, two_opt_max_iterations)
        }
    };
    (kind, changed)
}

fn non_empty(solution: &Solution) -> Vec<usize> {
    solution
        .vehicles()
        .iter()
        .enumerate()
        .filter(|(_, v)| !v.is_empty())
        .map(|(i, _)| i)
        .collect()
}

/// Swaps one random passenger of vehicle `a` with one of vehicle `b`, for two
/// distinct non-empty vehicles. Positions in each route are kept.
pub fn swap_between_vehicles<R: Rng>(solution: &mut Solution, rng: &mut R) -> bool {
    let candidates = non_empty(solution);
    if candidates.len() < 2 {
        return false;
    }
    let mut picked = candidates.choose_multiple(rng, 2);
    let (Some(&a), Some(&b)) = (picked.next(), picked.next()) else {
        return false;
    };

    let vehicles = solution.vehicles_mut();
    let ia = rng.random_range(0..vehicles[a].len());
    let ib = rng.random_range(0..vehicles[b].len());

    let pa = vehicles[a].remove_passenger(ia);
    let pb = vehicles[b].remove_passenger(ib);
    vehicles[a].insert_passenger(ia, pb);
    vehicles[b].insert_passenger(ib, pa);
    true
}

/// Shuffles a random contiguous window of one vehicle's route.
pub fn reorder_within_vehicle<R: Rng>(solution: &mut Solution, rng: &mut R) -> bool {
    let candidates: Vec<usize> = non_empty(solution)
        .into_iter()
        .filter(|&i| solution.vehicles()[i].len() >= 2)
        .collect();
    let Some(&vi) = candidates.as_slice().choose(rng) else {
        return false;
    };

    let route = solution.vehicles_mut()[vi].passengers_mut();
    let n = route.len();
    let i = rng.random_range(0..n - 1);
    let j = rng.random_range(i + 1..n);
    let before: Vec<usize> = route[i..=j].iter().map(|p| p.id()).collect();
    route[i..=j].shuffle(rng);
    route[i..=j].iter().map(|p| p.id()).ne(before)
}

/// Moves a random passenger to a random position of another vehicle.
///
/// Targets with a free seat are preferred; when the whole fleet is full any
/// other vehicle may receive the passenger.
pub fn move_between_vehicles<R: Rng>(solution: &mut Solution, rng: &mut R) -> bool {
    if solution.vehicles().len() < 2 {
        return false;
    }
    let Some(&from) = non_empty(solution).as_slice().choose(rng) else {
        return false;
    };

    let others: Vec<usize> = (0..solution.vehicles().len()).filter(|&i| i != from).collect();
    let open: Vec<usize> = others
        .iter()
        .copied()
        .filter(|&i| solution.vehicles()[i].remaining_capacity() > 0)
        .collect();
    let pool = if open.is_empty() { &others } else { &open };
    let Some(&to) = pool.choose(rng) else {
        return false;
    };

    let vehicles = solution.vehicles_mut();
    let idx = rng.random_range(0..vehicles[from].len());
    let passenger = vehicles[from].remove_passenger(idx);
    let pos = rng.random_range(0..=vehicles[to].len());
    vehicles[to].insert_passenger(pos, passenger);
    true
}

/// Runs 2-opt on one randomly chosen vehicle with at least two passengers.
pub fn two_opt_random_vehicle<R: Rng>(
    solution: &mut Solution,
    problem: &RideSharingProblem,
    rng: &mut R,
    max_iterations: usize,
) -> bool {
    let candidates: Vec<usize> = non_empty(solution)
        .into_iter()
        .filter(|&i| solution.vehicles()[i].len() >= 2)
        .collect();
    let Some(&vi) = candidates.as_slice().choose(rng) else {
        return false;
    };
    two_opt_improve(&mut solution.vehicles_mut()[vi], problem, max_iterations)
}
