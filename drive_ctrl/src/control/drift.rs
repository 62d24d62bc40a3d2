//! Straight-line drift correction

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Serialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Corrector keeping the two wheels' cumulative rotation in lock-step while
/// no line is being tracked.
///
/// The correction is computed from the accumulated wheel-angle mismatch
/// since the motion began: the leading wheel is slowed and the trailing
/// wheel sped up by the same amount, cancelling friction and load
/// asymmetry.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DriftCorrector {
    gain: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl DriftCorrector {
    /// Correction strength used by the drive primitives.
    pub const DEFAULT_GAIN: f64 = 0.5;

    pub fn new(gain: f64) -> Self {
        Self { gain }
    }

    /// Differential speed adjustment for the given accumulated wheel angles.
    ///
    /// The returned value is added to the left wheel's commanded speed and
    /// subtracted from the right's: a right-wheel lead of `n` degrees yields
    /// a slowdown of `gain * n` on the right and an equal speedup on the
    /// left.
    pub fn correction(&self, left_angle_deg: f64, right_angle_deg: f64) -> f64 {
        self.gain * (right_angle_deg - left_angle_deg)
    }
}

impl Default for DriftCorrector {
    fn default() -> Self {
        Self::new(Self::DEFAULT_GAIN)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_right_lead_slows_right() {
        let corrector = DriftCorrector::default();

        // Right wheel 40 degrees ahead: correction is +20, which the caller
        // adds to the left speed and subtracts from the right
        assert_eq!(corrector.correction(0.0, 40.0), 20.0);
    }

    #[test]
    fn test_left_lead_slows_left() {
        let corrector = DriftCorrector::default();
        assert_eq!(corrector.correction(40.0, 0.0), -20.0);
    }

    #[test]
    fn test_in_step_wheels_need_no_correction() {
        let corrector = DriftCorrector::default();
        assert_eq!(corrector.correction(123.0, 123.0), 0.0);
    }

    #[test]
    fn test_correction_scales_with_gain() {
        let corrector = DriftCorrector::new(1.5);
        assert_eq!(corrector.correction(0.0, 10.0), 15.0);
    }
}
