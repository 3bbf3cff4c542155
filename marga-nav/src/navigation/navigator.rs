//! The reactive control loop.
//!
//! Each tick: advance the clock, sample the sensors, classify walls, update
//! the dead-end state and command the wheels.

use std::time::Duration;

use crate::config::MargaConfig;
use crate::core::{Actuation, Clock, SensorFrame, Sensing, WheelSide, WheelSpeeds};

use super::classifier::{WallConfig, WallThresholds};
use super::state::{DeadEndEvent, ExplorationState, NavPhase};
use super::steering::SteeringConfig;

/// Configuration for the navigator.
#[derive(Clone, Debug)]
pub struct NavigatorConfig {
    /// Wall detection cutoffs
    pub thresholds: WallThresholds,
    /// Steering speeds
    pub steering: SteeringConfig,
    /// Dead ends per pass
    pub max_dead_ends: u32,
    /// Base control tick
    pub time_step: Duration,
    /// Settle delay after entering a dead end
    pub cooldown: Duration,
    /// Zero the wheels when the driver terminates the loop
    pub stop_on_shutdown: bool,
    /// Stop after this many ticks, as if the driver terminated
    pub max_ticks: Option<u64>,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self::from(&MargaConfig::default())
    }
}

impl From<&MargaConfig> for NavigatorConfig {
    fn from(config: &MargaConfig) -> Self {
        Self {
            thresholds: WallThresholds::from(&config.sensing),
            steering: SteeringConfig::from(config),
            max_dead_ends: config.navigation.max_dead_ends,
            time_step: config.time_step(),
            cooldown: config.cooldown(),
            stop_on_shutdown: config.navigation.stop_on_shutdown,
            max_ticks: config.navigation.max_ticks,
        }
    }
}

/// Result of a single tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Keep going
    Continue,
    /// Reached the brightest dead end; wheels are stopped
    Stopped,
    /// The driver ended the loop
    Terminated,
}

/// Counters for a run.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RunSummary {
    /// Ticks executed (cooldowns not included)
    pub ticks: u64,
    /// Dead ends recorded in pass 1
    pub recorded: u32,
    /// Dead ends entered in pass 2, including the final one
    pub revisited: u32,
    /// Brightest pass 1 dead end
    pub max_light_intensity: f64,
}

/// How a run ended.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NavOutcome {
    /// Stopped at a dead end at least as bright as the pass 1 maximum
    Stopped { light: f64, summary: RunSummary },
    /// The driver terminated the loop first
    Terminated { phase: NavPhase, summary: RunSummary },
}

impl NavOutcome {
    pub fn summary(&self) -> &RunSummary {
        match self {
            NavOutcome::Stopped { summary, .. } | NavOutcome::Terminated { summary, .. } => summary,
        }
    }
}

/// Wall-following navigator over injected clock, sensors and motors.
pub struct Navigator<C, S, A> {
    config: NavigatorConfig,
    clock: C,
    sensors: S,
    motors: A,
    state: ExplorationState,
    summary: RunSummary,
    started: bool,
    /// Set once the loop has ended
    finished: Option<TickOutcome>,
    stop_light: Option<f64>,
    last_walls: Option<WallConfig>,
}

impl<C: Clock, S: Sensing, A: Actuation> Navigator<C, S, A> {
    /// Create a navigator. Nothing is commanded until the first step.
    pub fn new(config: NavigatorConfig, clock: C, sensors: S, motors: A) -> Self {
        let state = ExplorationState::new(config.max_dead_ends);
        Self {
            config,
            clock,
            sensors,
            motors,
            state,
            summary: RunSummary::default(),
            started: false,
            finished: None,
            stop_light: None,
            last_walls: None,
        }
    }

    /// Current search state.
    pub fn state(&self) -> &ExplorationState {
        &self.state
    }

    /// Walls classified on the most recent tick.
    pub fn last_walls(&self) -> Option<WallConfig> {
        self.last_walls
    }

    pub fn phase(&self) -> NavPhase {
        self.state.phase()
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            max_light_intensity: self.state.max_light_intensity(),
            ..self.summary
        }
    }

    /// Release the collaborators.
    pub fn into_parts(self) -> (C, S, A) {
        (self.clock, self.sensors, self.motors)
    }

    /// Run until stopped at the brightest dead end or terminated.
    pub fn run(&mut self) -> NavOutcome {
        tracing::info!(
            "Navigator starting: {} dead ends per pass, tick {:?}, cooldown {:?}",
            self.config.max_dead_ends,
            self.config.time_step,
            self.config.cooldown
        );

        let outcome = loop {
            match self.step() {
                TickOutcome::Continue => continue,
                TickOutcome::Stopped => {
                    break NavOutcome::Stopped {
                        light: self.stop_light.unwrap_or_default(),
                        summary: self.summary(),
                    };
                }
                TickOutcome::Terminated => {
                    break NavOutcome::Terminated {
                        phase: self.phase(),
                        summary: self.summary(),
                    };
                }
            }
        };

        let summary = outcome.summary();
        tracing::info!(
            "Navigator finished after {} ticks: {} dead ends recorded, {} revisited, max light {:.6}",
            summary.ticks,
            summary.recorded,
            summary.revisited,
            summary.max_light_intensity
        );
        outcome
    }

    /// Execute one control tick.
    ///
    /// After the loop has ended this returns the final outcome again without
    /// touching the collaborators.
    pub fn step(&mut self) -> TickOutcome {
        if let Some(outcome) = self.finished {
            return outcome;
        }

        if !self.started {
            // Motors start in velocity mode at rest
            self.command(WheelSpeeds::STOP);
            self.started = true;
        }

        if let Some(max_ticks) = self.config.max_ticks
            && self.summary.ticks >= max_ticks
        {
            tracing::info!("Tick limit {} reached", max_ticks);
            return self.shutdown();
        }

        if !self.clock.advance(self.config.time_step) {
            return self.shutdown();
        }
        self.summary.ticks += 1;

        let frame = SensorFrame::capture(&self.sensors);
        let walls = WallConfig::classify(&frame, &self.config.thresholds);
        self.last_walls = Some(walls);

        let event = self.state.update(walls.is_dead_end(), frame.light);
        match event {
            DeadEndEvent::Recorded { .. } => self.summary.recorded += 1,
            DeadEndEvent::Revisited { .. } => self.summary.revisited += 1,
            DeadEndEvent::Brightest { light } => {
                self.summary.revisited += 1;
                self.stop_light = Some(light);
                self.command(WheelSpeeds::STOP);
                self.finished = Some(TickOutcome::Stopped);
                return TickOutcome::Stopped;
            }
            DeadEndEvent::None => {}
        }

        // Let the robot settle so the same dead end is not seen again
        if event.needs_cooldown() && !self.clock.advance(self.config.cooldown) {
            return self.shutdown();
        }

        self.state.complete_pass();

        let speeds = self.config.steering.steer(&walls);
        tracing::debug!(
            "tick {}: walls={:?} speeds=({:.3}, {:.3})",
            self.summary.ticks,
            walls,
            speeds.left,
            speeds.right
        );
        self.command(speeds);

        TickOutcome::Continue
    }

    fn command(&mut self, speeds: WheelSpeeds) {
        self.motors.set_wheel_velocity(WheelSide::Left, speeds.left);
        self.motors.set_wheel_velocity(WheelSide::Right, speeds.right);
    }

    fn shutdown(&mut self) -> TickOutcome {
        tracing::info!(
            "Driver terminated during {:?} after {} ticks",
            self.state.phase(),
            self.summary.ticks
        );
        if self.config.stop_on_shutdown {
            self.command(WheelSpeeds::STOP);
        }
        self.finished = Some(TickOutcome::Terminated);
        TickOutcome::Terminated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ProximityChannel;
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;

    /// Clock that allows a fixed number of advances.
    struct CountdownClock {
        remaining: usize,
        advanced: Vec<Duration>,
    }

    impl Clock for CountdownClock {
        fn advance(&mut self, duration: Duration) -> bool {
            self.advanced.push(duration);
            if self.remaining == 0 {
                return false;
            }
            self.remaining -= 1;
            true
        }
    }

    /// Sensors that replay one frame per capture.
    struct QueueSensors {
        frames: RefCell<VecDeque<SensorFrame>>,
        current: Cell<SensorFrame>,
    }

    impl QueueSensors {
        fn new(frames: Vec<SensorFrame>) -> Self {
            Self {
                frames: RefCell::new(frames.into()),
                current: Cell::new(SensorFrame::default()),
            }
        }
    }

    impl Sensing for QueueSensors {
        fn read_proximity(&self, channel: ProximityChannel) -> f64 {
            // Front is sampled first each tick
            if channel == ProximityChannel::Front
                && let Some(next) = self.frames.borrow_mut().pop_front()
            {
                self.current.set(next);
            }
            self.current.get().proximity(channel)
        }

        fn read_light(&self) -> f64 {
            self.current.get().light
        }
    }

    #[derive(Default)]
    struct VecMotors {
        commands: Vec<(WheelSide, f64)>,
    }

    impl Actuation for VecMotors {
        fn set_wheel_velocity(&mut self, side: WheelSide, value: f64) {
            self.commands.push((side, value));
        }
    }

    fn dead_end(light: f64) -> SensorFrame {
        SensorFrame {
            front: 100.0,
            left: 100.0,
            right: 100.0,
            left_corner: 0.0,
            right_corner: 100.0,
            light,
        }
    }

    fn corridor() -> SensorFrame {
        SensorFrame {
            left: 100.0,
            ..SensorFrame::default()
        }
    }

    fn navigator(
        ticks: usize,
        frames: Vec<SensorFrame>,
        max_dead_ends: u32,
    ) -> Navigator<CountdownClock, QueueSensors, VecMotors> {
        let config = NavigatorConfig {
            max_dead_ends,
            ..NavigatorConfig::default()
        };
        Navigator::new(
            config,
            CountdownClock {
                remaining: ticks,
                advanced: Vec::new(),
            },
            QueueSensors::new(frames),
            VecMotors::default(),
        )
    }

    #[test]
    fn test_first_step_zeroes_motors() {
        let mut nav = navigator(1, vec![corridor()], 16);
        assert_eq!(nav.step(), TickOutcome::Continue);

        let (_, _, motors) = nav.into_parts();
        assert_eq!(
            motors.commands[..2],
            [(WheelSide::Left, 0.0), (WheelSide::Right, 0.0)]
        );
        assert_eq!(
            motors.commands[2..],
            [(WheelSide::Left, 6.28), (WheelSide::Right, 6.28)]
        );
    }

    #[test]
    fn test_dead_end_applies_cooldown() {
        let mut nav = navigator(10, vec![dead_end(0.5), corridor()], 16);
        nav.step();
        assert!(nav.state().in_dead_end());
        assert_eq!(nav.state().dead_end_count(), 1);

        nav.step();
        assert!(!nav.state().in_dead_end());

        let (clock, _, _) = nav.into_parts();
        let step = Duration::from_millis(64);
        assert_eq!(clock.advanced, vec![step, step * 10, step]);
    }

    #[test]
    fn test_termination_zeroes_motors() {
        let mut nav = navigator(1, vec![corridor()], 16);
        assert_eq!(nav.step(), TickOutcome::Continue);
        assert_eq!(nav.step(), TickOutcome::Terminated);
        // Stays finished without touching collaborators
        assert_eq!(nav.step(), TickOutcome::Terminated);

        let (clock, _, motors) = nav.into_parts();
        assert_eq!(clock.advanced.len(), 2);
        assert_eq!(motors.commands.len(), 6);
        assert_eq!(
            motors.commands[4..],
            [(WheelSide::Left, 0.0), (WheelSide::Right, 0.0)]
        );
    }

    #[test]
    fn test_termination_without_stop() {
        let config = NavigatorConfig {
            stop_on_shutdown: false,
            ..NavigatorConfig::default()
        };
        let mut nav = Navigator::new(
            config,
            CountdownClock {
                remaining: 1,
                advanced: Vec::new(),
            },
            QueueSensors::new(vec![corridor()]),
            VecMotors::default(),
        );
        nav.step();
        assert_eq!(nav.step(), TickOutcome::Terminated);

        let (_, _, motors) = nav.into_parts();
        assert_eq!(
            motors.commands.last(),
            Some(&(WheelSide::Right, 6.28))
        );
    }

    #[test]
    fn test_terminated_during_cooldown() {
        let mut nav = navigator(1, vec![dead_end(0.5)], 16);
        assert_eq!(nav.step(), TickOutcome::Terminated);
        assert_eq!(nav.summary().recorded, 1);
    }

    #[test]
    fn test_tick_limit() {
        let config = NavigatorConfig {
            max_ticks: Some(3),
            ..NavigatorConfig::default()
        };
        let mut nav = Navigator::new(
            config,
            CountdownClock {
                remaining: 100,
                advanced: Vec::new(),
            },
            QueueSensors::new(vec![corridor(); 10]),
            VecMotors::default(),
        );

        let outcome = nav.run();
        assert_eq!(
            outcome,
            NavOutcome::Terminated {
                phase: NavPhase::Exploring,
                summary: RunSummary {
                    ticks: 3,
                    ..RunSummary::default()
                },
            }
        );
    }

    #[test]
    fn test_run_to_brightest() {
        let frames = vec![
            dead_end(0.2),
            corridor(),
            dead_end(0.6),
            corridor(),
            // Pass 2
            dead_end(0.2),
            corridor(),
            dead_end(0.6),
        ];
        let mut nav = navigator(100, frames, 2);

        match nav.run() {
            NavOutcome::Stopped { light, summary } => {
                assert_eq!(light, 0.6);
                assert_eq!(summary.recorded, 2);
                assert_eq!(summary.revisited, 2);
                assert_eq!(summary.max_light_intensity, 0.6);
                assert_eq!(summary.ticks, 7);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        assert_eq!(nav.phase(), NavPhase::Stopped);
    }
}
