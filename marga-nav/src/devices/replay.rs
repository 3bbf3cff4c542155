//! Replay device: plays a recorded trace through the collaborator traits.
//!
//! The device hands out one handle per trait. All handles share a cursor, so
//! advancing the clock changes what the sensors read and every motor command
//! is recorded in one place.
//!
//! Time model: after `n` whole ticks have elapsed the sensors read the frame
//! covering tick `n - 1`. The clock reports shutdown once the elapsed time
//! runs past the end of the trace.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

use crate::core::{Actuation, Clock, ProximityChannel, SensorFrame, Sensing, WheelSide};

use super::trace::Trace;

struct ReplayInner {
    frames: Vec<SensorFrame>,
    /// Exclusive end tick of each frame
    ends: Vec<u64>,
    total_ticks: u64,
    time_step: Duration,
    elapsed: Duration,
    commands: Vec<(WheelSide, f64)>,
}

impl ReplayInner {
    fn elapsed_ticks(&self) -> u64 {
        (self.elapsed.as_nanos() / self.time_step.as_nanos()) as u64
    }

    fn current(&self) -> SensorFrame {
        let tick = self.elapsed_ticks().saturating_sub(1);
        let idx = self
            .ends
            .partition_point(|&end| end <= tick)
            .min(self.frames.len().saturating_sub(1));
        self.frames.get(idx).copied().unwrap_or_default()
    }
}

/// Trace-driven device.
#[derive(Clone)]
pub struct ReplayDevice {
    inner: Arc<Mutex<ReplayInner>>,
}

impl ReplayDevice {
    /// Create a device replaying `trace` with the given base tick.
    ///
    /// `time_step` must be non-zero.
    pub fn new(trace: &Trace, time_step: Duration) -> Self {
        let mut ends = Vec::with_capacity(trace.frames().len());
        let mut end = 0u64;
        for frame in trace.frames() {
            end += frame.hold_ticks as u64;
            ends.push(end);
        }

        Self {
            inner: Arc::new(Mutex::new(ReplayInner {
                frames: trace.frames().iter().map(|f| f.sensors()).collect(),
                ends,
                total_ticks: end,
                time_step: time_step.max(Duration::from_nanos(1)),
                elapsed: Duration::ZERO,
                commands: Vec::new(),
            })),
        }
    }

    pub fn clock(&self) -> ReplayClock {
        ReplayClock {
            inner: Arc::clone(&self.inner),
        }
    }

    pub fn sensors(&self) -> ReplaySensors {
        ReplaySensors {
            inner: Arc::clone(&self.inner),
        }
    }

    pub fn motors(&self) -> RecordingMotors {
        RecordingMotors {
            inner: Arc::clone(&self.inner),
        }
    }

    /// Simulated time since start
    pub fn elapsed(&self) -> Duration {
        self.inner.lock().elapsed
    }

    /// Whole base ticks since start, cooldowns included
    pub fn elapsed_ticks(&self) -> u64 {
        self.inner.lock().elapsed_ticks()
    }

    /// Frame the sensors currently read
    pub fn current_frame(&self) -> SensorFrame {
        self.inner.lock().current()
    }

    /// All motor commands so far, in order
    pub fn commands(&self) -> Vec<(WheelSide, f64)> {
        self.inner.lock().commands.clone()
    }

    /// Latest command for one wheel
    pub fn last_command(&self, side: WheelSide) -> Option<f64> {
        self.inner
            .lock()
            .commands
            .iter()
            .rev()
            .find(|(s, _)| *s == side)
            .map(|(_, v)| *v)
    }
}

/// Clock handle of a [`ReplayDevice`].
pub struct ReplayClock {
    inner: Arc<Mutex<ReplayInner>>,
}

impl Clock for ReplayClock {
    fn advance(&mut self, duration: Duration) -> bool {
        let mut inner = self.inner.lock();
        inner.elapsed += duration;
        let running = inner.elapsed_ticks() <= inner.total_ticks;
        if !running {
            tracing::debug!("Replay finished at {:?}", inner.elapsed);
        }
        running
    }
}

/// Sensor handle of a [`ReplayDevice`].
pub struct ReplaySensors {
    inner: Arc<Mutex<ReplayInner>>,
}

impl Sensing for ReplaySensors {
    fn read_proximity(&self, channel: ProximityChannel) -> f64 {
        self.inner.lock().current().proximity(channel)
    }

    fn read_light(&self) -> f64 {
        self.inner.lock().current().light
    }
}

/// Motor handle of a [`ReplayDevice`]; records every command.
pub struct RecordingMotors {
    inner: Arc<Mutex<ReplayInner>>,
}

impl Actuation for RecordingMotors {
    fn set_wheel_velocity(&mut self, side: WheelSide, value: f64) {
        self.inner.lock().commands.push((side, value));
    }
}
