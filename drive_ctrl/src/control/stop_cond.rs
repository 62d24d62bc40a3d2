//! Control-loop termination conditions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Serialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Snapshot of one polling cycle, fed to [`StopCondition::met`].
///
/// Fields a given condition does not inspect may be left at their defaults.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct PollSample {
    /// Time since the motion began.
    pub elapsed_ms: f64,

    /// Left line sensor reading, `None` if the sensor produced none.
    pub left_reflect: Option<f64>,

    /// Right line sensor reading, `None` if the sensor produced none.
    pub right_reflect: Option<f64>,

    /// Left drive motor measured speed.
    pub left_speed_deg_s: f64,

    /// Right drive motor measured speed.
    pub right_speed_deg_s: f64,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Decides when a control loop ends.
///
/// Conditions compose: `AnyOf` terminates as soon as any member does, which
/// is how a sensor condition gains a safety timeout.
#[derive(Debug, Clone, Serialize)]
pub enum StopCondition {
    /// Terminal once the elapsed time reaches the bound.
    Elapsed { duration_ms: f64 },

    /// Terminal the instant either sensor reading drops below the
    /// threshold. An absent reading cannot confirm a junction and never
    /// terminates the loop.
    Junction { threshold: f64 },

    /// Terminal when neither motor's speed magnitude has exceeded the
    /// threshold for `debounce_ms` continuously.
    Stall {
        threshold_deg_s: f64,
        debounce_ms: f64,
        /// Elapsed time of the last poll where a motor was still moving.
        last_motion_ms: Option<f64>,
    },

    /// Terminal as soon as any member condition is.
    AnyOf(Vec<StopCondition>),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl StopCondition {
    /// Junction reflectance threshold on the sensor's native scale.
    pub const JUNCTION_THRESHOLD: f64 = 20.0;

    /// Timed condition.
    pub fn elapsed(duration_ms: f64) -> Self {
        StopCondition::Elapsed { duration_ms }
    }

    /// Junction condition with the default threshold.
    pub fn junction() -> Self {
        StopCondition::Junction {
            threshold: Self::JUNCTION_THRESHOLD,
        }
    }

    /// Stall-debounce condition.
    pub fn stall(threshold_deg_s: f64, debounce_ms: f64) -> Self {
        StopCondition::Stall {
            threshold_deg_s,
            debounce_ms,
            last_motion_ms: None,
        }
    }

    /// Evaluate the condition against this poll's snapshot.
    ///
    /// Stateful conditions update their internal tracking on every call, so
    /// call exactly once per polling cycle.
    pub fn met(&mut self, sample: &PollSample) -> bool {
        match self {
            StopCondition::Elapsed { duration_ms } => sample.elapsed_ms >= *duration_ms,

            StopCondition::Junction { threshold } => {
                let below = |reading: Option<f64>| match reading {
                    Some(value) => value < *threshold,
                    None => false,
                };
                below(sample.left_reflect) || below(sample.right_reflect)
            }

            StopCondition::Stall {
                threshold_deg_s,
                debounce_ms,
                last_motion_ms,
            } => {
                let moving = sample.left_speed_deg_s.abs() > *threshold_deg_s
                    || sample.right_speed_deg_s.abs() > *threshold_deg_s;

                if moving {
                    *last_motion_ms = Some(sample.elapsed_ms);
                    false
                } else {
                    // Until motion is first seen the window runs from the
                    // start of the motion
                    let last = last_motion_ms.unwrap_or(0.0);
                    sample.elapsed_ms - last > *debounce_ms
                }
            }

            // Evaluate every member so stateful conditions keep tracking
            // even after another member fires
            StopCondition::AnyOf(conditions) => conditions
                .iter_mut()
                .map(|c| c.met(sample))
                .fold(false, |acc, met| acc || met),
        }
    }
}
