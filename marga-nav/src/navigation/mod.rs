//! Maze navigation.
//!
//! This module provides the reactive two-pass dead-end search:
//! - Wall classification from proximity readings
//! - Left-wall-following steering
//! - Dead-end de-duplication and the pass state machine
//! - The tick loop tying them to the injected collaborators

mod classifier;
mod navigator;
mod state;
mod steering;

pub use classifier::{WallConfig, WallThresholds};
pub use navigator::{NavOutcome, Navigator, NavigatorConfig, RunSummary, TickOutcome};
pub use state::{DeadEndEvent, ExplorationState, NavPhase};
pub use steering::SteeringConfig;
