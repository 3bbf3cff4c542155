//! Sensor snapshots and actuator identifiers.

use serde::{Deserialize, Serialize};

use super::driver::Sensing;

/// Proximity channels read by the navigator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProximityChannel {
    Front,
    Left,
    Right,
    LeftCorner,
    RightCorner,
}

impl ProximityChannel {
    /// All channels, in the order they are sampled each tick.
    pub const ALL: [ProximityChannel; 5] = [
        ProximityChannel::Front,
        ProximityChannel::Left,
        ProximityChannel::Right,
        ProximityChannel::LeftCorner,
        ProximityChannel::RightCorner,
    ];
}

/// Wheel of the differential drive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WheelSide {
    Left,
    Right,
}

/// One tick's worth of sensor readings.
///
/// Proximity values are raw sensor units (larger is closer).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorFrame {
    #[serde(default)]
    pub front: f64,
    #[serde(default)]
    pub left: f64,
    #[serde(default)]
    pub right: f64,
    #[serde(default)]
    pub left_corner: f64,
    #[serde(default)]
    pub right_corner: f64,
    #[serde(default)]
    pub light: f64,
}

impl SensorFrame {
    /// Sample every channel the navigator uses.
    pub fn capture<S: Sensing + ?Sized>(sensors: &S) -> Self {
        Self {
            front: sensors.read_proximity(ProximityChannel::Front),
            left: sensors.read_proximity(ProximityChannel::Left),
            right: sensors.read_proximity(ProximityChannel::Right),
            left_corner: sensors.read_proximity(ProximityChannel::LeftCorner),
            right_corner: sensors.read_proximity(ProximityChannel::RightCorner),
            light: sensors.read_light(),
        }
    }

    /// Reading for a single proximity channel.
    pub fn proximity(&self, channel: ProximityChannel) -> f64 {
        match channel {
            ProximityChannel::Front => self.front,
            ProximityChannel::Left => self.left,
            ProximityChannel::Right => self.right,
            ProximityChannel::LeftCorner => self.left_corner,
            ProximityChannel::RightCorner => self.right_corner,
        }
    }
}

/// Commanded wheel velocities in rad/s.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WheelSpeeds {
    pub left: f64,
    pub right: f64,
}

impl WheelSpeeds {
    pub const STOP: WheelSpeeds = WheelSpeeds {
        left: 0.0,
        right: 0.0,
    };

    pub fn new(left: f64, right: f64) -> Self {
        Self { left, right }
    }
}
