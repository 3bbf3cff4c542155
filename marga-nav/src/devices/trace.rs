//! Recorded sensor traces.
//!
//! A trace is a list of sensor frames, each held for a number of base ticks.
//!
//! ```toml
//! [[frame]]
//! left = 120.0
//! hold_ticks = 20
//!
//! [[frame]]
//! front = 120.0
//! left = 120.0
//! right = 90.0
//! right_corner = 90.0
//! light = 0.7
//! ```

use serde::Deserialize;
use std::path::Path;

use crate::core::SensorFrame;
use crate::error::{MargaError, Result};

/// One trace entry.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TraceFrame {
    #[serde(default)]
    pub front: f64,
    #[serde(default)]
    pub left: f64,
    #[serde(default)]
    pub right: f64,
    #[serde(default)]
    pub left_corner: f64,
    #[serde(default)]
    pub right_corner: f64,
    #[serde(default)]
    pub light: f64,
    /// Base ticks this frame stays current (default: 1)
    #[serde(default = "default_hold_ticks")]
    pub hold_ticks: u32,
}

fn default_hold_ticks() -> u32 {
    1
}

impl TraceFrame {
    pub fn new(frame: SensorFrame, hold_ticks: u32) -> Self {
        Self {
            front: frame.front,
            left: frame.left,
            right: frame.right,
            left_corner: frame.left_corner,
            right_corner: frame.right_corner,
            light: frame.light,
            hold_ticks,
        }
    }

    pub fn sensors(&self) -> SensorFrame {
        SensorFrame {
            front: self.front,
            left: self.left,
            right: self.right,
            left_corner: self.left_corner,
            right_corner: self.right_corner,
            light: self.light,
        }
    }
}

/// A validated sensor trace.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Trace {
    #[serde(rename = "frame", default)]
    frames: Vec<TraceFrame>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a frame held for `hold_ticks` ticks.
    pub fn push(&mut self, frame: SensorFrame, hold_ticks: u32) -> &mut Self {
        self.frames.push(TraceFrame::new(frame, hold_ticks));
        self
    }

    /// Build a trace from frames, validating them.
    pub fn from_frames(frames: Vec<TraceFrame>) -> Result<Self> {
        let trace = Self { frames };
        trace.validate()?;
        Ok(trace)
    }

    /// Load a trace from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| MargaError::Trace(format!("Failed to read trace file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parse and validate a trace from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let trace: Trace =
            toml::from_str(content).map_err(|e| MargaError::Trace(e.to_string()))?;
        trace.validate()?;
        Ok(trace)
    }

    pub fn validate(&self) -> Result<()> {
        if self.frames.is_empty() {
            return Err(MargaError::Trace("trace has no frames".into()));
        }
        for (i, frame) in self.frames.iter().enumerate() {
            if frame.hold_ticks == 0 {
                return Err(MargaError::Trace(format!("frame {} has hold_ticks = 0", i)));
            }
            let s = frame.sensors();
            let values = [
                s.front,
                s.left,
                s.right,
                s.left_corner,
                s.right_corner,
                s.light,
            ];
            if values.iter().any(|v| !v.is_finite()) {
                return Err(MargaError::Trace(format!(
                    "frame {} has a non-finite reading",
                    i
                )));
            }
        }
        Ok(())
    }

    pub fn frames(&self) -> &[TraceFrame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Total length in base ticks.
    pub fn total_ticks(&self) -> u64 {
        self.frames.iter().map(|f| f.hold_ticks as u64).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
        [[frame]]
        left = 120.0
        hold_ticks = 20

        [[frame]]
        front = 120.0
        left = 120.0
        right = 90.0
        right_corner = 90.0
        light = 0.7
    "#;

    #[test]
    fn test_parse_sample() {
        let trace = Trace::from_toml(SAMPLE).unwrap();
        assert_eq!(trace.frames().len(), 2);
        assert_eq!(trace.total_ticks(), 21);

        let dead_end = trace.frames()[1].sensors();
        assert_eq!(dead_end.light, 0.7);
        assert_eq!(dead_end.left_corner, 0.0);
        assert_eq!(trace.frames()[1].hold_ticks, 1);
    }

    #[test]
    fn test_builder() {
        let mut trace = Trace::new();
        trace
            .push(SensorFrame::default(), 3)
            .push(SensorFrame::default(), 2);
        assert_eq!(trace.total_ticks(), 5);
        assert!(trace.validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_trace() {
        assert!(matches!(Trace::from_toml(""), Err(MargaError::Trace(_))));
        assert!(Trace::from_frames(Vec::new()).is_err());
    }

    #[test]
    fn test_rejects_zero_hold() {
        let err = Trace::from_toml("[[frame]]\nhold_ticks = 0").unwrap_err();
        assert!(matches!(err, MargaError::Trace(_)));
    }

    #[test]
    fn test_rejects_non_finite() {
        let frame = TraceFrame::new(
            SensorFrame {
                light: f64::NAN,
                ..SensorFrame::default()
            },
            1,
        );
        assert!(Trace::from_frames(vec![frame]).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", SAMPLE).unwrap();

        let trace = Trace::load(file.path()).unwrap();
        assert_eq!(trace.total_ticks(), 21);
    }
}
