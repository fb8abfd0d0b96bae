//! # u-carpool
//!
//! Ride-sharing assignment optimization: places passengers into
//! capacity-limited vehicles headed for one destination, minimizing total
//! distance, and turns each route into a pickup schedule that meets a fixed
//! arrival time.
//!
//! ## Modules
//!
//! - [`models`] — Domain types (Coordinate, Passenger, Vehicle, Solution, RouteDetails)
//! - [`problem`] — Validated problem instance with destination and travel metric
//! - [`distance`] — Haversine metric and injectable distance matrix
//! - [`constructive`] — Seeding heuristics (greedy, even, random)
//! - [`evaluation`] — Penalized fitness and constraint validation
//! - [`local_search`] — 2-opt, mutation operators, capacity repair, exact metrics
//! - [`ga`] — Genetic algorithm with route-level crossover
//! - [`schedule`] — Backward pickup-time propagation from a target arrival
//! - [`random`] — Seedable RNG construction
//! - [`error`] — Input error taxonomy
//!
//! ## Quick start
//!
//! ```
//! use jiff::civil::date;
//! use u_carpool::ga::{GaConfig, RideSharingAlgorithm};
//! use u_carpool::models::{Coordinate, Passenger, Vehicle};
//! use u_carpool::problem::RideSharingProblem;
//! use u_carpool::schedule::{parse_target_time, PickupScheduler};
//!
//! let vehicles = vec![Vehicle::new(0, Coordinate::new(37.50, 127.00), 3, "Dana")];
//! let passengers = vec![
//!     Passenger::new(1, Coordinate::new(37.51, 127.00), "Ada"),
//!     Passenger::new(2, Coordinate::new(37.52, 127.01), "Bo"),
//! ];
//! let problem = RideSharingProblem::new(vehicles, passengers)?
//!     .with_destination(Coordinate::new(37.56, 126.98))?;
//!
//! let config = GaConfig::default().with_population_size(10).with_seed(1);
//! let mut result = RideSharingAlgorithm::run(&problem, &config)?;
//!
//! let day = date(2026, 3, 2);
//! let target = parse_target_time("09:00", day)?;
//! let now = day.at(6, 0, 0, 0);
//! let routes = PickupScheduler::default().apply(&mut result.best, &problem, target, now)?;
//! assert!(routes.iter().all(|r| !r.has_warnings()));
//! # Ok::<(), u_carpool::error::SolverError>(())
//! ```

pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod ga;
pub mod local_search;
pub mod models;
pub mod problem;
pub mod random;
pub mod schedule;

pub use error::SolverError;
