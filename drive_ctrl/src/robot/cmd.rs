//! Per-call motion commands

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Serialize;

// Internal
use crate::control::TraceMode;
use crate::hw::StopAction;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the line-tracing primitives.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LineTraceCmd {
    /// Proportional gain
    pub k_p: f64,

    /// Derivative gain
    pub k_d: f64,

    /// Error strategy used to follow the line.
    pub mode: TraceMode,

    /// Target reflectance value the error is measured against.
    pub target: f64,

    /// Ramp-in time at the start of the trace.
    pub ease_duration_ms: f64,

    /// Fixed polling period of the control loop.
    pub polling_ms: f64,

    /// Terminal motor behaviour.
    pub stop: StopAction,
}

/// Parameters for an arc turn.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ArcCmd {
    /// Turn amount in degrees, positive for right.
    pub angle_deg: f64,

    /// Arc radius adjustment: 0 is a pivot turn, larger is a wider arc.
    pub radius_factor: f64,

    /// Terminal motor behaviour.
    pub stop: StopAction,
}

/// Parameters for a timed translation.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MoveCmd {
    /// Move backwards.
    pub reverse: bool,

    /// Ramp speed up at the start.
    pub ease_in: bool,

    /// Ramp speed down at the end.
    pub ease_out: bool,

    /// Configured ramp time for each eased side.
    pub ease_duration_ms: f64,

    /// Fixed polling period of the control loop.
    pub polling_ms: f64,

    /// Keep a straight path via wheel-angle drift correction.
    pub correction: bool,

    /// Terminal motor behaviour.
    pub stop: StopAction,
}

/// Parameters for the wall-seeking docking move.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SeekCmd {
    /// Time the motors must stay below the stall threshold before the wall
    /// hit is accepted.
    pub debounce_ms: f64,

    /// Speed magnitude below which a motor counts as stalled.
    pub stall_threshold_deg_s: f64,

    /// Ramp speed up at the start.
    pub ease_in: bool,

    /// Configured ramp-in time.
    pub ease_duration_ms: f64,

    /// Fixed polling period of the control loop.
    pub polling_ms: f64,

    /// Keep a straight path via wheel-angle drift correction.
    pub correction: bool,

    /// Terminal motor behaviour.
    pub stop: StopAction,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl LineTraceCmd {
    /// Trace command with the given gains and default mode, target, easing
    /// and polling.
    pub fn new(k_p: f64, k_d: f64) -> Self {
        Self {
            k_p,
            k_d,
            mode: TraceMode::Balance,
            target: 50.0,
            ease_duration_ms: 400.0,
            polling_ms: 5.0,
            stop: StopAction::Hold,
        }
    }
}

impl ArcCmd {
    /// Pivot turn through the given angle.
    pub fn new(angle_deg: f64) -> Self {
        Self {
            angle_deg,
            radius_factor: 0.0,
            stop: StopAction::Hold,
        }
    }
}

impl Default for MoveCmd {
    fn default() -> Self {
        Self {
            reverse: false,
            ease_in: false,
            ease_out: false,
            ease_duration_ms: 400.0,
            polling_ms: 10.0,
            correction: true,
            stop: StopAction::Hold,
        }
    }
}

impl Default for SeekCmd {
    fn default() -> Self {
        Self {
            debounce_ms: 100.0,
            stall_threshold_deg_s: 100.0,
            ease_in: false,
            ease_duration_ms: 400.0,
            polling_ms: 10.0,
            correction: true,
            stop: StopAction::Hold,
        }
    }
}
