//! MargaNav - Maze navigator for a differential-drive robot
//!
//! Follows the left wall using five infrared proximity sensors and finds the
//! brightest dead end with a single light sensor in two passes:
//!
//! 1. Explore, recording the light level at each new dead end
//! 2. Revisit, stopping at the first dead end at least as bright as the
//!    brightest one seen in pass 1
//!
//! The simulator or hardware plugs in through the [`core::Clock`],
//! [`core::Sensing`] and [`core::Actuation`] traits.

pub mod config;
pub mod core;
pub mod devices;
pub mod error;
pub mod navigation;

// Re-export commonly used types
pub use config::MargaConfig;
pub use error::{MargaError, Result};
pub use navigation::{NavOutcome, NavPhase, Navigator, NavigatorConfig};
