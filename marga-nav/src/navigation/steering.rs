//! Left-wall-following steering policy.

use crate::config::{MargaConfig, NavigationConfig, RobotConfig};
use crate::core::WheelSpeeds;

use super::classifier::WallConfig;

/// Configuration for the steering policy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SteeringConfig {
    /// Full wheel speed (rad/s)
    pub max_speed: f64,
    /// The slow wheel runs at `max_speed / veer_divisor` when veering
    pub veer_divisor: f64,
}

impl Default for SteeringConfig {
    fn default() -> Self {
        Self::new(&RobotConfig::default(), &NavigationConfig::default())
    }
}

impl From<&MargaConfig> for SteeringConfig {
    fn from(config: &MargaConfig) -> Self {
        Self::new(&config.robot, &config.navigation)
    }
}

impl SteeringConfig {
    pub fn new(robot: &RobotConfig, navigation: &NavigationConfig) -> Self {
        Self {
            max_speed: robot.max_speed,
            veer_divisor: navigation.veer_divisor,
        }
    }

    /// Compute wheel speeds for the current walls.
    ///
    /// - front wall: pivot right in place
    /// - left wall: straight ahead
    /// - no left wall: veer left to find it again
    ///
    /// A sensed left corner overrides the last two.
    pub fn steer(&self, walls: &WallConfig) -> WheelSpeeds {
        let max = self.max_speed;
        let slow = max / self.veer_divisor;

        if walls.front_wall {
            return WheelSpeeds::new(max, -max);
        }

        let base = if walls.left_wall {
            WheelSpeeds::new(max, max)
        } else {
            WheelSpeeds::new(slow, max)
        };

        if walls.left_corner {
            WheelSpeeds::new(max, slow)
        } else {
            base
        }
    }
}
