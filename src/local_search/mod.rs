//! Local search and mutation operators for ride-sharing solutions.
//!
//! - [`two_opt`] — Intra-route 2-opt segment reversal
//! - [`mutation`] — Random swap, move and reorder perturbations
//! - [`repair`] — Capacity repair and cheapest insertion
//! - [`metrics`] — Exact per-vehicle distance and time totals

mod metrics;
mod mutation;
mod repair;
mod two_opt;

pub use metrics::calculate_exact_metrics;
pub use mutation::{
    move_between_vehicles, mutate, reorder_within_vehicle, swap_between_vehicles,
    two_opt_random_vehicle, Mutation,
};
pub use repair::{fill_unassigned, repair_capacity};
pub use two_opt::{improve_all_routes, two_opt_improve};

use crate::distance::TravelMetric;
use crate::models::Coordinate;

/// Length of `start → stops → destination`; zero when `stops` is empty.
pub(crate) fn path_cost(
    metric: &dyn TravelMetric,
    start: Coordinate,
    stops: &[Coordinate],
    destination: Option<Coordinate>,
) -> f64 {
    let (Some(&first), Some(&last)) = (stops.first(), stops.last()) else {
        return 0.0;
    };
    let mut total = metric.distance(start, first);
    for w in stops.windows(2) {
        total += metric.distance(w[0], w[1]);
    }
    if let Some(dest) = destination {
        total += metric.distance(last, dest);
    }
    total
}
