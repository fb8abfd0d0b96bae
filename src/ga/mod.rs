//! Genetic algorithm for ride-sharing assignment.
//!
//! - [`GaConfig`] — Population, elitism, mutation and stopping parameters
//! - [`tournament_select`] — k-tournament parent selection
//! - [`crossover`] — Route-level recombination with first-assignment-wins reconciliation
//! - [`RideSharingAlgorithm`] — Generational loop, finalization and [`GaResult`]
//! - [`Cancellation`] — Flag and deadline polled between generations

mod cancellation;
mod config;
mod crossover;
mod runner;
mod selection;

pub use cancellation::Cancellation;
pub use config::GaConfig;
pub use crossover::crossover;
pub use runner::{GaResult, RideSharingAlgorithm, StopReason};
pub use selection::tournament_select;
