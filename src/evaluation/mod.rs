//! Solution scoring and constraint validation.
//!
//! - [`FitnessEvaluator`] — Distance plus capacity and unassigned penalties
//! - [`validate`] — Human-readable constraint report for a returned solution

mod fitness;
mod validation;

pub use fitness::{
    FitnessBreakdown, FitnessEvaluator, PenaltyWeights, CAPACITY_VIOLATION_PENALTY,
    UNASSIGNED_PASSENGER_PENALTY,
};
pub use validation::validate;
