//! Proportional-derivative controller

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Serialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A PD controller.
///
/// Holds only the gains; the previous error lives in the caller's
/// [`super::ControlSession`] so the controller itself is a pure function of
/// its inputs. The control law assumes a roughly constant sample interval,
/// which the fixed-period polling loops provide.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PdController {
    /// Proportional gain
    k_p: f64,

    /// Derivative gain
    k_d: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl PdController {
    /// Create a new controller with the given gains.
    pub fn new(k_p: f64, k_d: f64) -> Self {
        Self { k_p, k_d }
    }

    /// Get the turn correction for the given error and previous error.
    pub fn output(&self, error: f64, prev_error: f64) -> f64 {
        self.k_p * error + self.k_d * (error - prev_error)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_output_is_linear_in_kp() {
        let single = PdController::new(1.0, 0.0);
        let double = PdController::new(2.0, 0.0);

        assert_eq!(double.output(3.0, 0.0), 2.0 * single.output(3.0, 0.0));
        assert_eq!(double.output(-7.5, 0.0), 2.0 * single.output(-7.5, 0.0));
    }

    #[test]
    fn test_output_is_linear_in_kd() {
        let single = PdController::new(0.0, 0.3);
        let double = PdController::new(0.0, 0.6);

        assert_eq!(double.output(4.0, 1.0), 2.0 * single.output(4.0, 1.0));
    }

    #[test]
    fn test_derivative_uses_error_difference() {
        let pd = PdController::new(1.0, 0.5);

        // error 10, previous 4: 1*10 + 0.5*(10 - 4) = 13
        assert_eq!(pd.output(10.0, 4.0), 13.0);

        // A constant error contributes no derivative term
        assert_eq!(pd.output(10.0, 10.0), 10.0);
    }
}
