//! Domain model types for ride-sharing assignment.
//!
//! Coordinates, passengers, vehicles carrying an ordered passenger route,
//! solutions owning deep copies of the fleet, and derived route reports.

mod coordinate;
mod passenger;
mod route;
mod solution;
mod vehicle;

pub use coordinate::Coordinate;
pub use passenger::Passenger;
pub use route::{RouteDetails, ScheduleWarning, StopDetail, StopKind};
pub use solution::{Solution, ValidationReport, Violation, ViolationType};
pub use vehicle::Vehicle;
