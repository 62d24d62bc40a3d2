//! Line-trace error functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};

// Internal
use crate::DriveCtrlError;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Strategy for computing the signed tracking error from the two sensor
/// readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TraceMode {
    /// Follow the line centred between both sensors.
    Balance,
    /// Follow the line's edge with the left sensor only.
    LeftOnly,
    /// Follow the line's edge with the right sensor only.
    RightOnly,
    /// Steer on the raw difference of left over right.
    LeftMinusRight,
    /// Steer on the raw difference of right over left.
    RightMinusLeft,
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Compute the signed tracking error for the given mode.
///
/// Positive error steers the robot right. Callers must only invoke this when
/// both sensors produced a reading; an absent reading means the poll's error
/// update is skipped entirely, it is never treated as zero.
pub fn trace_error(mode: TraceMode, left: f64, right: f64, target: f64) -> f64 {
    match mode {
        TraceMode::Balance => (target - left) - (target - right),
        TraceMode::LeftOnly => target - left,
        TraceMode::RightOnly => target - right,
        TraceMode::LeftMinusRight => left - right,
        TraceMode::RightMinusLeft => right - left,
    }
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl std::str::FromStr for TraceMode {
    type Err = DriveCtrlError;

    /// Parse a configuration-text mode name.
    ///
    /// Unknown names are a configuration error rather than a silent
    /// fallback to zero correction.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "balance" => Ok(TraceMode::Balance),
            "left_only" => Ok(TraceMode::LeftOnly),
            "right_only" => Ok(TraceMode::RightOnly),
            "left_minus_right" => Ok(TraceMode::LeftMinusRight),
            "right_minus_left" => Ok(TraceMode::RightMinusLeft),
            other => Err(DriveCtrlError::Configuration(format!(
                "Unknown trace mode '{}'",
                other
            ))),
        }
    }
}
