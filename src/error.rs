//! Error taxonomy for invalid solver input.
//!
//! Only malformed input fails. Partial assignment, capacity overflow in the
//! returned solution and pickups scheduled in the past are reported through
//! [`ValidationReport`](crate::models::ValidationReport) and
//! [`ScheduleWarning`](crate::models::ScheduleWarning) instead.

use thiserror::Error;

/// Errors raised before any generation runs.
#[derive(Error, Debug)]
pub enum SolverError {
    /// No vehicles were supplied.
    #[error("fleet is empty: at least one vehicle is required")]
    EmptyFleet,

    /// A vehicle has zero seats.
    #[error("vehicle {vehicle_id} has non-positive capacity")]
    InvalidCapacity {
        /// Offending vehicle.
        vehicle_id: usize,
    },

    /// A coordinate is non-finite or out of range.
    #[error("invalid coordinate for {what}: ({latitude}, {longitude})")]
    InvalidCoordinate {
        /// Which record carries the coordinate.
        what: String,
        /// Latitude in degrees.
        latitude: f64,
        /// Longitude in degrees.
        longitude: f64,
    },

    /// Two vehicles share an id.
    #[error("duplicate vehicle id {id}")]
    DuplicateVehicle {
        /// Repeated id.
        id: usize,
    },

    /// Two passengers share an id.
    #[error("duplicate passenger id {id}")]
    DuplicatePassenger {
        /// Repeated id.
        id: usize,
    },

    /// The target arrival time could not be parsed.
    #[error("malformed target time {input:?}: expected HH:MM or HH:MM:SS")]
    InvalidTargetTime {
        /// Raw input.
        input: String,
    },

    /// Average speed must be positive and finite.
    #[error("invalid average speed {speed} km/h")]
    InvalidSpeed {
        /// Rejected speed.
        speed: f64,
    },

    /// GA parameters are out of range.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// What is wrong.
        reason: String,
    },

    /// A distance matrix has the wrong shape or an unusable entry.
    #[error("invalid distance matrix: {reason}")]
    InvalidMatrix {
        /// What is wrong.
        reason: String,
    },

    /// A travel time is not a finite, non-negative duration.
    #[error("invalid travel time of {minutes} minutes")]
    InvalidTravelTime {
        /// Rejected lead time.
        minutes: f64,
    },

    /// Pickup time arithmetic left the representable range.
    #[error("pickup time out of range")]
    TimeArithmetic(#[from] jiff::Error),
}
