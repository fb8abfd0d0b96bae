//! Pickup-time scheduling against a fixed arrival deadline.

mod pickup;

pub use pickup::{
    backward_times, parse_target_time, travel_minutes, PickupScheduler, DEFAULT_AVERAGE_SPEED_KMH,
};
