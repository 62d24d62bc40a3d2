//! Robot tuning parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};

// Internal
use crate::DriveCtrlError;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Tuning parameters for the robot.
///
/// Set once at construction and read-only thereafter. Can be loaded from a
/// TOML parameter file through `util::params`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RobotConfig {
    /// Speed used for straight translations and arc turns.
    ///
    /// Units: degrees/second
    pub base_speed: f64,

    /// Speed used while tracing a line.
    ///
    /// Units: degrees/second
    pub trace_speed: f64,

    /// Ceiling on any commanded wheel speed magnitude.
    ///
    /// Units: degrees/second
    pub max_speed: f64,

    /// Wheel degrees turned per degree of robot rotation in a pivot turn.
    pub turning_const: f64,

    /// Enables per-call and per-poll diagnostic logging.
    pub debug_mode: bool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            base_speed: 1000.0,
            trace_speed: 700.0,
            max_speed: 1200.0,
            turning_const: 2.2,
            debug_mode: false,
        }
    }
}

impl RobotConfig {
    /// Check the parameters for degenerate values.
    pub fn validate(&self) -> Result<(), DriveCtrlError> {
        if self.base_speed <= 0.0 {
            return Err(DriveCtrlError::Configuration(format!(
                "base_speed must be positive, got {}",
                self.base_speed
            )));
        }
        if self.trace_speed <= 0.0 {
            return Err(DriveCtrlError::Configuration(format!(
                "trace_speed must be positive, got {}",
                self.trace_speed
            )));
        }
        if self.max_speed <= 0.0 {
            return Err(DriveCtrlError::Configuration(format!(
                "max_speed must be positive, got {}",
                self.max_speed
            )));
        }
        if self.turning_const <= 0.0 {
            return Err(DriveCtrlError::Configuration(format!(
                "turning_const must be positive, got {}",
                self.turning_const
            )));
        }
        if self.base_speed > self.max_speed || self.trace_speed > self.max_speed {
            return Err(DriveCtrlError::Configuration(
                "base_speed and trace_speed must not exceed max_speed".into(),
            ));
        }

        Ok(())
    }
}
