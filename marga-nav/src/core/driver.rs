//! Collaborator traits implemented by a simulator or hardware binding.

use std::time::Duration;

use super::types::{ProximityChannel, WheelSide};

/// Time-step driver.
pub trait Clock {
    /// Block until `duration` has elapsed on the driver's clock.
    ///
    /// Returns `false` when the driver is shutting down; the caller must not
    /// read sensors after that.
    fn advance(&mut self, duration: Duration) -> bool;
}

/// Sensor readings, fresh as of the current tick.
pub trait Sensing {
    /// Read one proximity channel (raw units, larger is closer)
    fn read_proximity(&self, channel: ProximityChannel) -> f64;

    /// Read the light sensor
    fn read_light(&self) -> f64;
}

/// Wheel motors in velocity-control mode.
pub trait Actuation {
    /// Set wheel velocity in rad/s
    fn set_wheel_velocity(&mut self, side: WheelSide, value: f64);
}
