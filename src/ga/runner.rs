//! Generational loop of the ride-sharing GA.
//!
//! # Algorithm
//!
//! 1. Seed: greedy, even and prior solutions, topped up with random ones.
//! 2. Evaluate and sort ascending by fitness.
//! 3. Copy the top `⌈population × elite_percentage⌉` unchanged.
//! 4. Refill with children: two tournament parents, route-level crossover,
//!    mutation with probability `mutation_rate`.
//! 5. Track the best-ever solution; stop on the generation cap, after
//!    `stagnation_limit` generations without improvement, once the best
//!    fitness drops below `target_fitness`, or on cancellation.
//! 6. Finalize the incumbent: capacity repair, free-seat fill, 2-opt on
//!    every route, exact metrics, re-score.
//!
//! Cancellation is polled between generations only, so the population is
//! never left partially evaluated.

use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use super::cancellation::Cancellation;
use super::config::GaConfig;
use super::crossover::crossover;
use super::selection::tournament_select;
use crate::constructive::{even_distribution, greedy_assignment, random_assignment};
use crate::error::SolverError;
use crate::evaluation::{validate, FitnessEvaluator};
use crate::local_search::{
    calculate_exact_metrics, fill_unassigned, improve_all_routes, mutate, repair_capacity,
};
use crate::models::Solution;
use crate::problem::RideSharingProblem;
use crate::random::{create_rng, os_rng};

const IMPROVEMENT_EPSILON: f64 = 1e-9;

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// `max_generations` reached.
    MaxGenerations,
    /// `stagnation_limit` generations without improvement.
    Stagnation,
    /// Best fitness dropped below `target_fitness`.
    TargetReached,
    /// The cancellation token fired.
    Cancelled,
    /// Nothing to assign.
    NoPassengers,
}

/// Outcome of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaResult {
    /// Finalized best solution with exact metrics.
    pub best: Solution,
    /// Fitness of `best` after finalization.
    pub best_fitness: f64,
    /// Generations evolved after seeding.
    pub generations: usize,
    /// Termination cause.
    pub stop_reason: StopReason,
    /// Best-ever fitness after seeding and after each generation.
    pub history: Vec<f64>,
}

/// Genetic algorithm for assigning passengers to vehicles.
///
/// Each call owns its population; concurrent runs over separate problems
/// share nothing.
///
/// # Examples
///
/// ```
/// use u_carpool::models::{Coordinate, Passenger, Vehicle};
/// use u_carpool::problem::RideSharingProblem;
/// use u_carpool::ga::{GaConfig, RideSharingAlgorithm};
///
/// let vehicles = vec![
///     Vehicle::new(0, Coordinate::new(37.50, 127.00), 3, "Dana"),
///     Vehicle::new(1, Coordinate::new(37.55, 127.05), 2, "Eli"),
/// ];
/// let passengers = (1..=4)
///     .map(|i| Passenger::new(i, Coordinate::new(37.50 + 0.002 * i as f64, 127.0), "p"))
///     .collect();
/// let problem = RideSharingProblem::new(vehicles, passengers).unwrap();
///
/// let config = GaConfig::default()
///     .with_population_size(20)
///     .with_max_generations(30)
///     .with_seed(42);
/// let result = RideSharingAlgorithm::run(&problem, &config).unwrap();
/// assert_eq!(result.best.num_assigned(), 4);
/// assert!(result.best.vehicles().iter().all(|v| !v.is_over_capacity()));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RideSharingAlgorithm;

impl RideSharingAlgorithm {
    /// Runs with an RNG built from `config.seed`, or seeded from the OS.
    pub fn run(problem: &RideSharingProblem, config: &GaConfig) -> Result<GaResult, SolverError> {
        let mut rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => os_rng(),
        };
        Self::run_with_rng(problem, config, &mut rng)
    }

    /// Runs with a caller-supplied RNG.
    pub fn run_with_rng<R: Rng>(
        problem: &RideSharingProblem,
        config: &GaConfig,
        rng: &mut R,
    ) -> Result<GaResult, SolverError> {
        Self::run_with_cancel(problem, config, Vec::new(), &Cancellation::new(), rng)
    }

    /// Runs with previous solutions joining the initial population.
    ///
    /// Prior solutions are rebuilt against the current fleet: routes of
    /// unknown vehicles, unknown or unavailable passengers and repeated
    /// passengers are dropped.
    pub fn run_seeded<R: Rng>(
        problem: &RideSharingProblem,
        config: &GaConfig,
        prior: Vec<Solution>,
        rng: &mut R,
    ) -> Result<GaResult, SolverError> {
        Self::run_with_cancel(problem, config, prior, &Cancellation::new(), rng)
    }

    /// Full-control entry point: prior solutions plus a cancellation token
    /// polled before every generation.
    ///
    /// # Errors
    ///
    /// [`SolverError::InvalidConfig`] if `config` fails validation.
    #[instrument(skip_all)]
    pub fn run_with_cancel<R: Rng>(
        problem: &RideSharingProblem,
        config: &GaConfig,
        prior: Vec<Solution>,
        cancel: &Cancellation,
        rng: &mut R,
    ) -> Result<GaResult, SolverError> {
        config.validate()?;
        let evaluator = FitnessEvaluator::new(problem, config.penalties);

        info!(
            vehicles = problem.vehicles().len(),
            passengers = problem.passengers().len(),
            population = config.population_size,
            "starting ride-sharing optimization"
        );

        if problem.passengers().is_empty() {
            let mut best = Solution::from_fleet(problem.vehicles());
            calculate_exact_metrics(&mut best, problem);
            let best_fitness = evaluator.evaluate_in_place(&mut best);
            info!("no passengers to assign");
            return Ok(GaResult {
                best,
                best_fitness,
                generations: 0,
                stop_reason: StopReason::NoPassengers,
                history: Vec::new(),
            });
        }

        let mut population = initial_population(problem, config, prior, rng);
        evaluator.evaluate_population(&mut population);
        sort_by_fitness(&mut population);

        let mut best = population[0].clone();
        let mut history = vec![best.fitness()];
        let mut stagnant = 0;
        let mut generations = 0;

        let stop_reason = loop {
            if best.fitness() < config.target_fitness {
                break StopReason::TargetReached;
            }
            if stagnant >= config.stagnation_limit {
                break StopReason::Stagnation;
            }
            if generations >= config.max_generations {
                break StopReason::MaxGenerations;
            }
            if cancel.is_cancelled() {
                break StopReason::Cancelled;
            }

            population = next_generation(&population, problem, config, &evaluator, rng);
            sort_by_fitness(&mut population);
            generations += 1;

            if population[0].fitness() < best.fitness() - IMPROVEMENT_EPSILON {
                best = population[0].clone();
                stagnant = 0;
                debug!(generation = generations, fitness = best.fitness(), "new best");
            } else {
                stagnant += 1;
            }
            history.push(best.fitness());
        };

        let best = finalize(best, problem, config, &evaluator);
        let best_fitness = best.fitness();
        info!(
            generations,
            best_fitness,
            ?stop_reason,
            assigned = best.num_assigned(),
            "optimization finished"
        );

        Ok(GaResult {
            best,
            best_fitness,
            generations,
            stop_reason,
            history,
        })
    }
}

fn sort_by_fitness(population: &mut [Solution]) {
    population.sort_by(|a, b| a.fitness().total_cmp(&b.fitness()));
}

fn initial_population<R: Rng>(
    problem: &RideSharingProblem,
    config: &GaConfig,
    prior: Vec<Solution>,
    rng: &mut R,
) -> Vec<Solution> {
    let mut population = Vec::with_capacity(config.population_size);
    population.push(greedy_assignment(problem));
    population.push(even_distribution(problem));
    let adopted = prior.len();
    population.extend(prior.iter().map(|s| adopt(s, problem)));
    while population.len() < config.population_size {
        population.push(random_assignment(problem, rng));
    }
    population.truncate(config.population_size);
    debug!(size = population.len(), adopted, "seeded population");
    population
}

/// Rebuilds a prior solution on the current fleet and passenger set.
fn adopt(prior: &Solution, problem: &RideSharingProblem) -> Solution {
    let mut solution = Solution::from_fleet(problem.vehicles());
    let mut placed = HashSet::new();
    for vehicle in solution.vehicles_mut().iter_mut() {
        let Some(old) = prior.vehicle(vehicle.id()) else {
            continue;
        };
        for p in old.passengers() {
            if let Some(known) = problem.passenger(p.id()) {
                if placed.insert(p.id()) {
                    vehicle.push_passenger(known.clone());
                }
            }
        }
    }
    solution
}

fn next_generation<R: Rng>(
    population: &[Solution],
    problem: &RideSharingProblem,
    config: &GaConfig,
    evaluator: &FitnessEvaluator<'_>,
    rng: &mut R,
) -> Vec<Solution> {
    let elite = config.elite_count();
    let mut next = Vec::with_capacity(config.population_size);
    next.extend_from_slice(&population[..elite.min(population.len())]);

    while next.len() < config.population_size {
        let (Some(a), Some(b)) = (
            tournament_select(population, config.tournament_size, rng),
            tournament_select(population, config.tournament_size, rng),
        ) else {
            break;
        };
        let mut child = crossover(&population[a], &population[b], problem, rng);
        if rng.random_bool(config.mutation_rate) {
            mutate(&mut child, problem, rng, config.two_opt_max_iterations);
        }
        next.push(child);
    }

    let offset = elite.min(next.len());
    evaluator.evaluate_population(&mut next[offset..]);
    next
}

fn finalize(
    mut best: Solution,
    problem: &RideSharingProblem,
    config: &GaConfig,
    evaluator: &FitnessEvaluator<'_>,
) -> Solution {
    let dropped = repair_capacity(&mut best, problem);
    if !dropped.is_empty() {
        debug!(dropped = dropped.len(), "capacity repair left passengers without a seat");
    }
    let filled = fill_unassigned(&mut best, problem);
    let reordered = improve_all_routes(&mut best, problem, config.two_opt_max_iterations);
    debug!(filled, reordered, "finalized incumbent");

    calculate_exact_metrics(&mut best, problem);
    evaluator.evaluate_in_place(&mut best);

    let report = validate(&best, problem);
    if !report.is_valid() {
        warn!(
            unassigned = report.unassigned(),
            over_capacity = report.capacity_violations(),
            "final solution carries violations"
        );
    }
    best
}
