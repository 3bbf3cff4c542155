//! Wall classification from proximity readings.

use crate::config::SensingConfig;
use crate::core::SensorFrame;

/// Proximity cutoffs. A reading strictly above its cutoff is a wall.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallThresholds {
    /// Front, left and left-corner sensors
    pub proximity: f64,
    /// Right and right-corner sensors
    pub right: f64,
}

impl Default for WallThresholds {
    fn default() -> Self {
        Self::from(&SensingConfig::default())
    }
}

impl From<&SensingConfig> for WallThresholds {
    fn from(config: &SensingConfig) -> Self {
        Self {
            proximity: config.proximity_threshold,
            right: config.right_sensor_threshold,
        }
    }
}

/// Walls around the robot at the current tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WallConfig {
    pub front_wall: bool,
    pub left_wall: bool,
    pub right_wall: bool,
    pub left_corner: bool,
    pub right_corner: bool,
}

impl WallConfig {
    /// Threshold a sensor frame.
    pub fn classify(frame: &SensorFrame, thresholds: &WallThresholds) -> Self {
        Self {
            front_wall: frame.front > thresholds.proximity,
            left_wall: frame.left > thresholds.proximity,
            right_wall: frame.right > thresholds.right,
            left_corner: frame.left_corner > thresholds.proximity,
            right_corner: frame.right_corner > thresholds.right,
        }
    }

    /// Blocked ahead and on both sides, confirmed by the right-corner sensor.
    ///
    /// The left-corner sensor is not part of the check.
    pub fn is_dead_end(&self) -> bool {
        self.front_wall && self.left_wall && self.right_wall && self.right_corner
    }
}
