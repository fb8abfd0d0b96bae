//! Route-level crossover.
//!
//! # Algorithm
//!
//! A child inherits whole per-driver routes over the union of both parents'
//! drivers. Parent 1 donates every driver it defines; parent 2 donates only
//! the drivers parent 1 lacks. Conflicts are reconciled by
//! first-assignment-wins:
//!
//! 1. Routes inherited from parent 1 are placed first, in visiting order.
//! 2. Routes inherited from parent 2 drop passengers already placed.
//! 3. Passengers that either parent assigned but the child lost are appended
//!    by greedy nearest-vehicle fill into free seats.
//!
//! No passenger ends on two routes, and a route never grows beyond the load
//! it had in its parent unless a free seat exists. `crossover(S, S)` has the
//! same vehicle-to-passenger content as `S`.

use std::collections::HashSet;

use rand::Rng;

use crate::constructive::greedy_fill;
use crate::models::{Passenger, Solution, Vehicle};
use crate::problem::RideSharingProblem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Donor {
    First,
    Second,
}

/// Produces one child from two parents.
///
/// The result is deterministic in the parents; `rng` is accepted so every
/// genetic operator shares one signature.
///
/// # Examples
///
/// ```
/// use u_carpool::models::{Coordinate, Passenger, Vehicle};
/// use u_carpool::problem::RideSharingProblem;
/// use u_carpool::constructive::greedy_assignment;
/// use u_carpool::ga::crossover;
/// use u_carpool::random::create_rng;
///
/// let vehicles = vec![Vehicle::new(0, Coordinate::new(0.0, 0.0), 2, "Dana")];
/// let passengers = vec![
///     Passenger::new(1, Coordinate::new(0.0, 0.01), "Ada"),
///     Passenger::new(2, Coordinate::new(0.0, 0.02), "Bo"),
/// ];
/// let problem = RideSharingProblem::new(vehicles, passengers).unwrap();
///
/// let parent = greedy_assignment(&problem);
/// let child = crossover(&parent, &parent, &problem, &mut create_rng(1));
/// assert_eq!(child.assignment_map(), parent.assignment_map());
/// ```
pub fn crossover<R: Rng>(
    parent1: &Solution,
    parent2: &Solution,
    problem: &RideSharingProblem,
    _rng: &mut R,
) -> Solution {
    // Driver union, parent 1 order first.
    let mut plan: Vec<(&Vehicle, Donor)> =
        parent1.vehicles().iter().map(|v| (v, Donor::First)).collect();
    for v in parent2.vehicles() {
        if parent1.vehicle(v.id()).is_none() {
            plan.push((v, Donor::Second));
        }
    }

    let mut vehicles: Vec<Vehicle> = plan
        .iter()
        .map(|(v, _)| {
            let mut shell = (*v).clone();
            shell.clear_route();
            shell
        })
        .collect();

    let mut placed: HashSet<usize> = HashSet::new();
    for pass in [Donor::First, Donor::Second] {
        for (slot, (donor, side)) in plan.iter().enumerate() {
            if *side != pass {
                continue;
            }
            for p in donor.passengers() {
                if placed.insert(p.id()) {
                    vehicles[slot].push_passenger(p.clone());
                }
            }
        }
    }

    let mut child = Solution::new(vehicles);

    let lost: Vec<Passenger> = parent1
        .vehicles()
        .iter()
        .chain(parent2.vehicles())
        .flat_map(|v| v.passengers())
        .filter(|p| placed.insert(p.id()))
        .cloned()
        .collect();
    if !lost.is_empty() {
        greedy_fill(&mut child, lost, problem.metric());
    }
    child
}
