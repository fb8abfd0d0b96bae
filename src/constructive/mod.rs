//! Seeding strategies that build initial ride-sharing solutions.
//!
//! - [`greedy_assignment`] — Nearest passenger/vehicle pair first, O(n²m)
//! - [`even_distribution`] — Round-robin dealing across vehicles, O(nm)
//! - [`random_assignment`] — Random subset per vehicle from a shuffled pool, O(n)
//!
//! Every strategy returns a [`Solution`](crate::models::Solution) whose
//! vehicles are fresh copies of the fleet, and places each passenger at most
//! once.

mod even;
mod greedy;
mod random;

pub use even::even_distribution;
pub use greedy::{greedy_assignment, greedy_fill};
pub use random::random_assignment;
