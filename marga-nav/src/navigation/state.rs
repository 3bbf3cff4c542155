//! Dead-end tracking and the two-pass search state machine.
//!
//! Pass 1 follows the left wall and records the light level at each new dead
//! end. Once `max_dead_ends` have been recorded the search switches to pass 2,
//! which follows the same walls and stops at the first dead end at least as
//! bright as the pass 1 maximum.

/// Phase of the two-pass search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavPhase {
    /// Pass 1: recording dead-end brightness
    Exploring,
    /// Pass 2: looking for the brightest dead end again
    Revisiting,
    /// Stopped at the brightest dead end
    Stopped,
}

/// What happened to the dead-end state on one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DeadEndEvent {
    /// Nothing new: not in a dead end, still inside the last one, or the pass
    /// is out of capacity
    None,
    /// Entered a dead end during pass 1
    Recorded {
        light: f64,
        /// Dead ends recorded so far in this pass
        count: u32,
    },
    /// Entered a dead end during pass 2 that is dimmer than the maximum
    Revisited { light: f64 },
    /// Entered a dead end during pass 2 at or above the maximum
    Brightest { light: f64 },
}

impl DeadEndEvent {
    /// Whether a new dead end was entered and the cooldown applies.
    pub fn needs_cooldown(&self) -> bool {
        matches!(
            self,
            DeadEndEvent::Recorded { .. } | DeadEndEvent::Revisited { .. }
        )
    }
}

/// Search state carried across ticks.
#[derive(Clone, Debug)]
pub struct ExplorationState {
    max_dead_ends: u32,
    /// Dead ends processed in the current pass
    dead_end_count: u32,
    /// Still inside the most recently processed dead end
    in_dead_end: bool,
    /// Brightest pass 1 dead end
    max_light_intensity: f64,
    second_pass: bool,
    stopped: bool,
}

impl ExplorationState {
    /// Create a fresh pass 1 state.
    pub fn new(max_dead_ends: u32) -> Self {
        Self {
            max_dead_ends,
            dead_end_count: 0,
            in_dead_end: false,
            max_light_intensity: 0.0,
            second_pass: false,
            stopped: false,
        }
    }

    pub fn phase(&self) -> NavPhase {
        if self.stopped {
            NavPhase::Stopped
        } else if self.second_pass {
            NavPhase::Revisiting
        } else {
            NavPhase::Exploring
        }
    }

    pub fn dead_end_count(&self) -> u32 {
        self.dead_end_count
    }

    pub fn in_dead_end(&self) -> bool {
        self.in_dead_end
    }

    pub fn max_light_intensity(&self) -> f64 {
        self.max_light_intensity
    }

    pub fn second_pass(&self) -> bool {
        self.second_pass
    }

    pub fn max_dead_ends(&self) -> u32 {
        self.max_dead_ends
    }

    /// Feed one tick's dead-end predicate and light reading.
    ///
    /// Only the entry tick of a dead end is processed; the latch is released
    /// on the first tick the predicate is false.
    pub fn update(&mut self, is_dead_end: bool, light: f64) -> DeadEndEvent {
        if self.stopped {
            return DeadEndEvent::None;
        }

        if !is_dead_end {
            if self.in_dead_end {
                tracing::debug!("Left dead end");
            }
            self.in_dead_end = false;
            return DeadEndEvent::None;
        }

        if self.in_dead_end || self.dead_end_count >= self.max_dead_ends {
            return DeadEndEvent::None;
        }

        let event = if self.second_pass {
            tracing::info!("Revisiting dead-end. Light intensity: {:.6}", light);
            if light >= self.max_light_intensity {
                tracing::info!(
                    "Stopping at dead end with light intensity: {:.6}",
                    light
                );
                self.stopped = true;
                return DeadEndEvent::Brightest { light };
            }
            DeadEndEvent::Revisited { light }
        } else {
            tracing::info!("Dead-end detected! Light intensity: {:.6}", light);
            if light > self.max_light_intensity {
                self.max_light_intensity = light;
            }
            self.dead_end_count += 1;
            DeadEndEvent::Recorded {
                light,
                count: self.dead_end_count,
            }
        };

        self.in_dead_end = true;
        event
    }

    /// Switch to pass 2 once pass 1 is full.
    ///
    /// Returns `true` on the tick the switch happens. The count is reset here
    /// and nowhere else.
    pub fn complete_pass(&mut self) -> bool {
        if self.second_pass || self.dead_end_count < self.max_dead_ends {
            return false;
        }

        tracing::info!(
            "Completed first pass. Maximum light intensity: {:.6}",
            self.max_light_intensity
        );
        tracing::info!(
            "Starting second pass to revisit dead ends and sense maximum light intensity"
        );
        self.dead_end_count = 0;
        self.second_pass = true;
        true
    }
}
