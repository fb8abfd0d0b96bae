//! Evolutionary engine parameters.

use serde::{Deserialize, Serialize};

use crate::error::SolverError;
use crate::evaluation::PenaltyWeights;

/// Parameters of a [`RideSharingAlgorithm`](super::RideSharingAlgorithm) run.
///
/// # Examples
///
/// ```
/// use u_carpool::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(40)
///     .with_max_generations(200)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.elite_count(), 8);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfig {
    /// Candidates per generation.
    pub population_size: usize,
    /// Generation cap.
    pub max_generations: usize,
    /// Share of the population copied unchanged into the next generation.
    pub elite_percentage: f64,
    /// Probability that a child is mutated.
    pub mutation_rate: f64,
    /// Candidates sampled per tournament.
    pub tournament_size: usize,
    /// Generations without improvement before stopping.
    pub stagnation_limit: usize,
    /// Stop once the best fitness falls below this value.
    pub target_fitness: f64,
    /// Pass cap for every 2-opt invocation.
    pub two_opt_max_iterations: usize,
    /// RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Fitness penalty weights.
    pub penalties: PenaltyWeights,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 1000,
            elite_percentage: 0.2,
            mutation_rate: 0.01,
            tournament_size: 3,
            stagnation_limit: 20,
            target_fitness: 0.1,
            two_opt_max_iterations: 100,
            seed: None,
            penalties: PenaltyWeights::default(),
        }
    }
}

impl GaConfig {
    /// Sets the number of candidates per generation.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Sets the generation cap.
    pub fn with_max_generations(mut self, generations: usize) -> Self {
        self.max_generations = generations;
        self
    }

    /// Sets the share of the population kept as elites, in `[0, 1]`.
    pub fn with_elite_percentage(mut self, percentage: f64) -> Self {
        self.elite_percentage = percentage;
        self
    }

    /// Sets the per-child mutation probability, in `[0, 1]`.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets how many candidates each tournament samples.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets how many generations may pass without improvement.
    pub fn with_stagnation_limit(mut self, generations: usize) -> Self {
        self.stagnation_limit = generations;
        self
    }

    /// Sets the fitness below which the run stops early.
    pub fn with_target_fitness(mut self, target: f64) -> Self {
        self.target_fitness = target;
        self
    }

    /// Sets the pass cap for 2-opt.
    pub fn with_two_opt_max_iterations(mut self, passes: usize) -> Self {
        self.two_opt_max_iterations = passes;
        self
    }

    /// Fixes the RNG seed for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the fitness penalty weights.
    pub fn with_penalties(mut self, penalties: PenaltyWeights) -> Self {
        self.penalties = penalties;
        self
    }

    /// Number of elites: `⌈population_size × elite_percentage⌉`, capped at
    /// the population size.
    pub fn elite_count(&self) -> usize {
        let n = (self.population_size as f64 * self.elite_percentage).ceil() as usize;
        n.min(self.population_size)
    }

    /// Checks parameter ranges.
    ///
    /// # Errors
    ///
    /// [`SolverError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<(), SolverError> {
        let fail = |reason: &str| {
            Err(SolverError::InvalidConfig {
                reason: reason.to_string(),
            })
        };
        if self.population_size < 2 {
            return fail("population_size must be at least 2");
        }
        if !(0.0..=1.0).contains(&self.elite_percentage) {
            return fail("elite_percentage must be in [0, 1]");
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return fail("mutation_rate must be in [0, 1]");
        }
        if self.tournament_size == 0 {
            return fail("tournament_size must be positive");
        }
        if self.target_fitness.is_nan() {
            return fail("target_fitness must be a number");
        }
        let p = &self.penalties;
        if [p.capacity_violation, p.unassigned_passenger, p.per_vehicle_used]
            .iter()
            .any(|w| !w.is_finite() || *w < 0.0)
        {
            return fail("penalty weights must be finite and non-negative");
        }
        Ok(())
    }
}
