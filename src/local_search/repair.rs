//! Capacity repair and cheapest insertion of unassigned passengers.
//!
//! # Algorithm
//!
//! Overloaded vehicles repeatedly shed the passenger whose removal saves the
//! most route distance. Each shed passenger is reinserted at the cheapest
//! position of any vehicle with a free seat, or dropped when the fleet is
//! full. Insertion and removal costs are route deltas measured with the
//! problem metric, so an empty vehicle pays for its whole new route.
//!
//! # Reference
//!
//! Or, I. (1976). "Traveling Salesman-Type Combinatorial Problems and Their
//! Relation to the Logistics of Blood Banking". PhD thesis.

use super::path_cost;
use crate::models::{Coordinate, Passenger, Solution, Vehicle};
use crate::problem::RideSharingProblem;

/// A candidate insertion position.
#[derive(Debug, Clone, Copy)]
struct Insertion {
    vehicle: usize,
    position: usize,
    delta: f64,
}

/// Restores `len ≤ capacity` on every vehicle.
///
/// Returns the passengers that could not be placed anywhere.
///
/// # Examples
///
/// ```
/// use u_carpool::models::{Coordinate, Passenger, Solution, Vehicle};
/// use u_carpool::problem::RideSharingProblem;
/// use u_carpool::local_search::repair_capacity;
///
/// let vehicles = vec![
///     Vehicle::new(0, Coordinate::new(0.0, 0.0), 1, "a"),
///     Vehicle::new(1, Coordinate::new(0.0, 0.1), 1, "b"),
/// ];
/// let passengers = vec![
///     Passenger::new(1, Coordinate::new(0.0, 0.01), "near a"),
///     Passenger::new(2, Coordinate::new(0.0, 0.09), "near b"),
/// ];
/// let problem = RideSharingProblem::new(vehicles, passengers.clone()).unwrap();
///
/// let mut sol = Solution::from_fleet(problem.vehicles());
/// sol.vehicles_mut()[0].push_passenger(passengers[0].clone());
/// sol.vehicles_mut()[0].push_passenger(passengers[1].clone());
///
/// let dropped = repair_capacity(&mut sol, &problem);
/// assert!(dropped.is_empty());
/// assert_eq!(sol.vehicles()[0].passenger_ids(), vec![1]);
/// assert_eq!(sol.vehicles()[1].passenger_ids(), vec![2]);
/// ```
pub fn repair_capacity(solution: &mut Solution, problem: &RideSharingProblem) -> Vec<Passenger> {
    let mut displaced = Vec::new();
    for vehicle in solution.vehicles_mut().iter_mut() {
        while vehicle.is_over_capacity() {
            let pos = best_removal(vehicle, problem);
            displaced.push(vehicle.remove_passenger(pos));
        }
    }

    let mut dropped = Vec::new();
    for passenger in displaced {
        match best_insertion(solution, problem, passenger.location()) {
            Some(ins) => solution.vehicles_mut()[ins.vehicle].insert_passenger(ins.position, passenger),
            None => dropped.push(passenger),
        }
    }
    dropped
}

/// Inserts every available passenger that is on no route into the cheapest
/// free seat. Returns how many were placed.
pub fn fill_unassigned(solution: &mut Solution, problem: &RideSharingProblem) -> usize {
    let assigned = solution.assigned_ids();
    let mut placed = 0;
    for passenger in problem.passengers() {
        if assigned.contains(&passenger.id()) {
            continue;
        }
        let Some(ins) = best_insertion(solution, problem, passenger.location()) else {
            break;
        };
        solution.vehicles_mut()[ins.vehicle].insert_passenger(ins.position, passenger.clone());
        placed += 1;
    }
    placed
}

fn locations(vehicle: &Vehicle) -> Vec<Coordinate> {
    vehicle.passengers().iter().map(|p| p.location()).collect()
}

/// Position whose removal shortens the route the most.
fn best_removal(vehicle: &Vehicle, problem: &RideSharingProblem) -> usize {
    let locs = locations(vehicle);
    let full = path_cost(problem.metric(), vehicle.location(), &locs, problem.destination());
    let mut best = (0, f64::NEG_INFINITY);
    for pos in 0..locs.len() {
        let mut without = locs.clone();
        without.remove(pos);
        let saving = full - path_cost(problem.metric(), vehicle.location(), &without, problem.destination());
        if saving > best.1 {
            best = (pos, saving);
        }
    }
    best.0
}

/// Cheapest position for a new stop at `location` among vehicles with a
/// free seat.
fn best_insertion(
    solution: &Solution,
    problem: &RideSharingProblem,
    location: Coordinate,
) -> Option<Insertion> {
    let mut best: Option<Insertion> = None;
    for (vi, vehicle) in solution.vehicles().iter().enumerate() {
        if vehicle.remaining_capacity() == 0 {
            continue;
        }
        let locs = locations(vehicle);
        let base = path_cost(problem.metric(), vehicle.location(), &locs, problem.destination());
        for pos in 0..=locs.len() {
            let mut with = locs.clone();
            with.insert(pos, location);
            let delta =
                path_cost(problem.metric(), vehicle.location(), &with, problem.destination()) - base;
            if best.map_or(true, |b| delta < b.delta) {
                best = Some(Insertion {
                    vehicle: vi,
                    position: pos,
                    delta,
                });
            }
        }
    }
    best
}
