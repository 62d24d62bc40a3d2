//! Speed easing profile

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Serialize;

// Internal
use util::maths::{clamp, lin_map};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Linear ramp-in/ramp-out speed scale profile.
///
/// The factor rises 0 to 1 over the first `ramp_in_ms` of a motion and falls
/// 1 to 0 over the last `ramp_out_ms`. A non-positive ramp disables easing
/// on that side (factor 1 throughout), so there is no division by a zero
/// duration.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EaseProfile {
    ramp_in_ms: f64,
    ramp_out_ms: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl EaseProfile {
    /// Build the profile for a motion.
    ///
    /// `total_ms` is the motion duration, or `None` for motions without a
    /// time bound (which can only ease in). When both ends ease on a finite
    /// motion the effective ramp on each side is limited to half the total
    /// so the ramps never overlap; a single-ended ramp is limited to the
    /// total itself.
    pub fn new(ease_in: bool, ease_out: bool, configured_ms: f64, total_ms: Option<f64>) -> Self {
        let configured_ms = configured_ms.max(0.0);

        let (ramp_in_ms, ramp_out_ms) = match total_ms {
            Some(total) => {
                let limit = if ease_in && ease_out {
                    total / 2.0
                } else {
                    total
                };
                let ramp = configured_ms.min(limit);
                (
                    if ease_in { ramp } else { 0.0 },
                    if ease_out { ramp } else { 0.0 },
                )
            }
            None => (if ease_in { configured_ms } else { 0.0 }, 0.0),
        };

        Self {
            ramp_in_ms,
            ramp_out_ms,
        }
    }

    /// A profile with easing disabled (factor 1 throughout).
    pub fn disabled() -> Self {
        Self {
            ramp_in_ms: 0.0,
            ramp_out_ms: 0.0,
        }
    }

    /// Get the speed scale factor for the given point in the motion.
    ///
    /// Always in `[0, 1]`.
    pub fn factor(&self, elapsed_ms: f64, total_ms: Option<f64>) -> f64 {
        if self.ramp_in_ms > 0.0 && elapsed_ms < self.ramp_in_ms {
            let f = lin_map((0.0, self.ramp_in_ms), (0.0, 1.0), elapsed_ms);
            return clamp(&f, &0.0, &1.0);
        }

        if let Some(total) = total_ms {
            let remaining = total - elapsed_ms;
            if self.ramp_out_ms > 0.0 && remaining < self.ramp_out_ms {
                let f = lin_map((0.0, self.ramp_out_ms), (0.0, 1.0), remaining);
                return clamp(&f, &0.0, &1.0);
            }
        }

        1.0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_disabled_profile_is_unity() {
        let profile = EaseProfile::disabled();
        for elapsed in &[0.0, 10.0, 500.0, 1e6] {
            assert_eq!(profile.factor(*elapsed, Some(1000.0)), 1.0);
        }
    }

    #[test]
    fn test_non_positive_ramp_is_unity() {
        let profile = EaseProfile::new(true, true, 0.0, Some(1000.0));
        assert_eq!(profile.factor(0.0, Some(1000.0)), 1.0);

        let profile = EaseProfile::new(true, false, -50.0, Some(1000.0));
        assert_eq!(profile.factor(0.0, Some(1000.0)), 1.0);
    }

    #[test]
    fn test_ramp_in_monotonic_and_bounded() {
        let profile = EaseProfile::new(true, false, 400.0, Some(2000.0));

        let mut prev = -1.0;
        for i in 0..=50 {
            let f = profile.factor(i as f64 * 10.0, Some(2000.0));
            assert!(f >= prev);
            assert!((0.0..=1.0).contains(&f));
            prev = f;
        }
        assert_eq!(profile.factor(400.0, Some(2000.0)), 1.0);
    }

    #[test]
    fn test_ramp_out_monotonic_and_bounded() {
        let profile = EaseProfile::new(false, true, 400.0, Some(2000.0));

        assert_eq!(profile.factor(1000.0, Some(2000.0)), 1.0);

        let mut prev = 2.0;
        for i in 0..=40 {
            let f = profile.factor(1600.0 + i as f64 * 10.0, Some(2000.0));
            assert!(f <= prev);
            assert!((0.0..=1.0).contains(&f));
            prev = f;
        }
    }

    #[test]
    fn test_both_ends_ramps_do_not_overlap() {
        // Configured ramp longer than half the motion: each side is limited
        // to total / 2
        let profile = EaseProfile::new(true, true, 400.0, Some(600.0));

        assert_eq!(profile.factor(300.0, Some(600.0)), 1.0);
        assert!(profile.factor(100.0, Some(600.0)) < 1.0);
        assert!(profile.factor(500.0, Some(600.0)) < 1.0);
    }

    #[test]
    fn test_unbounded_motion_ramps_in_only() {
        let profile = EaseProfile::new(true, true, 400.0, None);

        assert!(profile.factor(200.0, None) < 1.0);
        assert_eq!(profile.factor(10_000.0, None), 1.0);
    }
}
