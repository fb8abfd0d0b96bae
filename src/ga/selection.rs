//! Tournament selection.

use rand::Rng;

use crate::models::Solution;

/// Samples `k` candidates with replacement and returns the index of the one
/// with the lowest fitness.
///
/// `k = 0` is treated as 1. Returns `None` for an empty population.
///
/// # Examples
///
/// ```
/// use u_carpool::ga::tournament_select;
/// use u_carpool::models::Solution;
/// use u_carpool::random::create_rng;
///
/// let mut pop = vec![Solution::new(vec![]), Solution::new(vec![])];
/// pop[0].set_fitness(5.0);
/// pop[1].set_fitness(1.0);
///
/// // A tournament larger than the population almost surely sees index 1.
/// let mut rng = create_rng(3);
/// assert_eq!(tournament_select(&pop, 64, &mut rng), Some(1));
/// ```
pub fn tournament_select<R: Rng>(population: &[Solution], k: usize, rng: &mut R) -> Option<usize> {
    if population.is_empty() {
        return None;
    }
    let mut best = rng.random_range(0..population.len());
    for _ in 1..k {
        let idx = rng.random_range(0..population.len());
        if population[idx].fitness() < population[best].fitness() {
            best = idx;
        }
    }
    Some(best)
}
