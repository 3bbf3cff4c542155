//! Configuration loading for MargaNav

use crate::error::{MargaError, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Main configuration structure
#[derive(Clone, Debug, Default, Deserialize)]
pub struct MargaConfig {
    #[serde(default)]
    pub robot: RobotConfig,
    #[serde(default)]
    pub sensing: SensingConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
}

/// Robot drive parameters
#[derive(Clone, Debug, Deserialize)]
pub struct RobotConfig {
    /// Maximum wheel speed in rad/s (default: 6.28)
    #[serde(default = "default_max_speed")]
    pub max_speed: f64,

    /// Base control tick in milliseconds (default: 64)
    #[serde(default = "default_time_step_ms")]
    pub time_step_ms: u64,
}

/// Proximity sensor calibration
#[derive(Clone, Debug, Deserialize)]
pub struct SensingConfig {
    /// Wall cutoff for front, left and left-corner sensors (default: 80)
    #[serde(default = "default_proximity_threshold")]
    pub proximity_threshold: f64,

    /// Wall cutoff for right and right-corner sensors (default: 68).
    /// These read lower at the same distance.
    #[serde(default = "default_right_sensor_threshold")]
    pub right_sensor_threshold: f64,
}

/// Dead-end search and steering parameters
#[derive(Clone, Debug, Deserialize)]
pub struct NavigationConfig {
    /// Dead ends recorded before a pass is complete (default: 16)
    #[serde(default = "default_max_dead_ends")]
    pub max_dead_ends: u32,

    /// Cooldown after entering a dead end, in base ticks (default: 10)
    #[serde(default = "default_cooldown_steps")]
    pub cooldown_steps: u32,

    /// Slow-wheel divisor when veering (default: 8)
    #[serde(default = "default_veer_divisor")]
    pub veer_divisor: f64,

    /// Command zero velocity when the driver terminates the loop (default: true)
    #[serde(default = "default_stop_on_shutdown")]
    pub stop_on_shutdown: bool,

    /// Optional cap on executed ticks
    #[serde(default)]
    pub max_ticks: Option<u64>,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            max_speed: default_max_speed(),
            time_step_ms: default_time_step_ms(),
        }
    }
}

impl Default for SensingConfig {
    fn default() -> Self {
        Self {
            proximity_threshold: default_proximity_threshold(),
            right_sensor_threshold: default_right_sensor_threshold(),
        }
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            max_dead_ends: default_max_dead_ends(),
            cooldown_steps: default_cooldown_steps(),
            veer_divisor: default_veer_divisor(),
            stop_on_shutdown: default_stop_on_shutdown(),
            max_ticks: None,
        }
    }
}

// Default value functions
fn default_max_speed() -> f64 {
    6.28
}
fn default_time_step_ms() -> u64 {
    64
}
fn default_proximity_threshold() -> f64 {
    80.0
}
fn default_right_sensor_threshold() -> f64 {
    68.0
}
fn default_max_dead_ends() -> u32 {
    16
}
fn default_cooldown_steps() -> u32 {
    10
}
fn default_veer_divisor() -> f64 {
    8.0
}
fn default_stop_on_shutdown() -> bool {
    true
}

impl MargaConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| MargaError::Config(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: MargaConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the control loop cannot run with.
    pub fn validate(&self) -> Result<()> {
        if !self.robot.max_speed.is_finite() || self.robot.max_speed <= 0.0 {
            return Err(MargaError::Config(format!(
                "max_speed must be positive, got {}",
                self.robot.max_speed
            )));
        }
        if self.robot.time_step_ms == 0 {
            return Err(MargaError::Config("time_step_ms must be non-zero".into()));
        }
        if !self.sensing.proximity_threshold.is_finite()
            || !self.sensing.right_sensor_threshold.is_finite()
        {
            return Err(MargaError::Config(
                "proximity thresholds must be finite".into(),
            ));
        }
        if self.navigation.max_dead_ends == 0 {
            return Err(MargaError::Config("max_dead_ends must be non-zero".into()));
        }
        if self.navigation.cooldown_steps == 0 {
            return Err(MargaError::Config(
                "cooldown_steps must be non-zero".into(),
            ));
        }
        let divisor = self.navigation.veer_divisor;
        if !divisor.is_finite() || divisor < 1.0 {
            return Err(MargaError::Config(format!(
                "veer_divisor must be at least 1, got {}",
                divisor
            )));
        }
        Ok(())
    }

    /// Base control tick
    pub fn time_step(&self) -> Duration {
        Duration::from_millis(self.robot.time_step_ms)
    }

    /// Settle delay applied after entering a dead end
    pub fn cooldown(&self) -> Duration {
        self.time_step() * self.navigation.cooldown_steps
    }
}
