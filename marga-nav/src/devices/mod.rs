//! Device bindings.
//!
//! - [`replay`]: Plays a recorded [`Trace`] through the collaborator traits,
//!   for hardware-free runs and tests

pub mod replay;
pub mod trace;

pub use replay::{RecordingMotors, ReplayClock, ReplayDevice, ReplaySensors};
pub use trace::{Trace, TraceFrame};
