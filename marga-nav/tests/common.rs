//! Test utilities for MargaNav.
//!
//! Builders for synthetic maze traces and a replay-backed navigator.

#![allow(dead_code)]

use marga_nav::core::SensorFrame;
use marga_nav::devices::{RecordingMotors, ReplayClock, ReplayDevice, ReplaySensors, Trace};
use marga_nav::{MargaConfig, Navigator, NavigatorConfig};

pub type ReplayNavigator = Navigator<ReplayClock, ReplaySensors, RecordingMotors>;

/// Ticks of corridor between dead ends; longer than the cooldown.
pub const CORRIDOR_TICKS: u32 = 12;

/// Ticks a dead end stays in view.
pub const DEAD_END_TICKS: u32 = 3;

/// Straight corridor with a wall on the left.
pub fn corridor() -> SensorFrame {
    SensorFrame {
        left: 120.0,
        ..SensorFrame::default()
    }
}

/// Walls ahead, left, right and right corner.
pub fn dead_end(light: f64) -> SensorFrame {
    SensorFrame {
        front: 120.0,
        left: 120.0,
        right: 90.0,
        right_corner: 90.0,
        light,
        ..SensorFrame::default()
    }
}

/// A trace visiting one dead end per light reading, in order.
pub fn maze_trace(lights: &[f64]) -> Trace {
    let mut trace = Trace::new();
    for &light in lights {
        trace
            .push(corridor(), CORRIDOR_TICKS)
            .push(dead_end(light), DEAD_END_TICKS);
    }
    trace.push(corridor(), CORRIDOR_TICKS);
    trace
}

/// Config with the given pass capacity and defaults otherwise.
pub fn config(max_dead_ends: u32) -> MargaConfig {
    let mut config = MargaConfig::default();
    config.navigation.max_dead_ends = max_dead_ends;
    config
}

/// Navigator wired to a replay of `trace`.
pub fn replay(trace: &Trace, config: &MargaConfig) -> (ReplayDevice, ReplayNavigator) {
    let device = ReplayDevice::new(trace, config.time_step());
    let navigator = Navigator::new(
        NavigatorConfig::from(config),
        device.clock(),
        device.sensors(),
        device.motors(),
    );
    (device, navigator)
}
