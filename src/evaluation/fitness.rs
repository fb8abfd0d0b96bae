//! Fitness evaluation for candidate solutions (lower is better).

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::Solution;
use crate::problem::RideSharingProblem;

/// Flat penalty per vehicle carrying more passengers than seats.
pub const CAPACITY_VIOLATION_PENALTY: f64 = 1000.0;

/// Penalty per available passenger left off every route.
pub const UNASSIGNED_PASSENGER_PENALTY: f64 = 100.0;

/// Weights of the non-distance fitness terms.
///
/// The defaults rank a capacity violation above a single unassigned
/// passenger, so overflowing a vehicle only wins once more than
/// `capacity_violation / unassigned_passenger` passengers would otherwise be
/// dropped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PenaltyWeights {
    /// Added once per over-capacity vehicle.
    pub capacity_violation: f64,
    /// Added once per unassigned available passenger.
    pub unassigned_passenger: f64,
    /// Added once per vehicle with a non-empty route.
    pub per_vehicle_used: f64,
}

impl Default for PenaltyWeights {
    fn default() -> Self {
        Self {
            capacity_violation: CAPACITY_VIOLATION_PENALTY,
            unassigned_passenger: UNASSIGNED_PASSENGER_PENALTY,
            per_vehicle_used: 0.0,
        }
    }
}

/// Additive decomposition of a fitness score.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FitnessBreakdown {
    /// Sum of route distances (km).
    pub distance: f64,
    /// Vehicle usage cost.
    pub vehicle_cost: f64,
    /// Capacity penalty contribution.
    pub capacity_penalty: f64,
    /// Unassigned-passenger penalty contribution.
    pub unassigned_penalty: f64,
    /// Number of over-capacity vehicles.
    pub over_capacity_vehicles: usize,
    /// Number of unassigned available passengers.
    pub unassigned_passengers: usize,
}

impl FitnessBreakdown {
    /// The scalar fitness.
    pub fn total(&self) -> f64 {
        self.distance + self.vehicle_cost + self.capacity_penalty + self.unassigned_penalty
    }
}

/// Scores solutions of one problem instance.
///
/// Scores are additive and not normalized, so they only compare solutions
/// drawn from the same vehicle and passenger set.
///
/// # Examples
///
/// ```
/// use u_carpool::models::{Coordinate, Passenger, Solution, Vehicle};
/// use u_carpool::problem::RideSharingProblem;
/// use u_carpool::evaluation::{FitnessEvaluator, PenaltyWeights};
///
/// let vehicles = vec![Vehicle::new(0, Coordinate::new(0.0, 0.0), 1, "Dana")];
/// let passengers = vec![
///     Passenger::new(1, Coordinate::new(0.0, 0.01), "Ada"),
///     Passenger::new(2, Coordinate::new(0.0, 0.02), "Bo"),
/// ];
/// let problem = RideSharingProblem::new(vehicles, passengers).unwrap();
/// let evaluator = FitnessEvaluator::new(&problem, PenaltyWeights::default());
///
/// let empty = Solution::from_fleet(problem.vehicles());
/// assert_eq!(evaluator.evaluate(&empty), 200.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FitnessEvaluator<'a> {
    problem: &'a RideSharingProblem,
    weights: PenaltyWeights,
}

impl<'a> FitnessEvaluator<'a> {
    /// Creates an evaluator for `problem`.
    pub fn new(problem: &'a RideSharingProblem, weights: PenaltyWeights) -> Self {
        Self { problem, weights }
    }

    /// Penalty weights in use.
    pub fn weights(&self) -> &PenaltyWeights {
        &self.weights
    }

    /// Decomposes the fitness of `solution` into its terms.
    pub fn breakdown(&self, solution: &Solution) -> FitnessBreakdown {
        let mut b = FitnessBreakdown::default();

        for vehicle in solution.vehicles() {
            b.distance += self.problem.route_distance(vehicle);
            if !vehicle.is_empty() {
                b.vehicle_cost += self.weights.per_vehicle_used;
            }
            if vehicle.is_over_capacity() {
                b.over_capacity_vehicles += 1;
            }
        }

        let assigned = solution.assigned_ids();
        b.unassigned_passengers = self
            .problem
            .passengers()
            .iter()
            .filter(|p| !assigned.contains(&p.id()))
            .count();

        b.capacity_penalty = b.over_capacity_vehicles as f64 * self.weights.capacity_violation;
        b.unassigned_penalty = b.unassigned_passengers as f64 * self.weights.unassigned_passenger;
        b
    }

    /// Fitness of `solution`.
    pub fn evaluate(&self, solution: &Solution) -> f64 {
        self.breakdown(solution).total()
    }

    /// Scores `solution` and stores the score on it.
    pub fn evaluate_in_place(&self, solution: &mut Solution) -> f64 {
        let fitness = self.evaluate(solution);
        solution.set_fitness(fitness);
        fitness
    }

    /// Scores every member of a population in parallel.
    ///
    /// Each worker owns a distinct `Solution`; nothing is shared mutably.
    pub fn evaluate_population(&self, population: &mut [Solution]) {
        population.par_iter_mut().for_each(|s| {
            self.evaluate_in_place(s);
        });
    }
}
