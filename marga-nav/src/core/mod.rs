//! Core abstractions shared by the navigator and device bindings.
//!
//! - [`driver`]: [`Clock`], [`Sensing`] and [`Actuation`] traits to implement
//!   for a simulator or real robot
//! - [`types`]: Sensor snapshots and wheel identifiers

pub mod driver;
pub mod types;

pub use driver::{Actuation, Clock, Sensing};
pub use types::{ProximityChannel, SensorFrame, WheelSide, WheelSpeeds};
