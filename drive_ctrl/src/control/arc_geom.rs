//! Arc/rotation geometry conversion

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Serialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Per-wheel targets for an arc turn.
///
/// Angles are signed rotation targets, speeds are magnitudes; the caller
/// applies the angle's sign to the speed when commanding the motor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ArcTargets {
    pub left_angle_deg: f64,
    pub right_angle_deg: f64,
    pub left_speed_deg_s: f64,
    pub right_speed_deg_s: f64,
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Convert a turn angle and radius factor into per-wheel targets.
///
/// A positive `angle_deg` turns right. `radius_factor` 0 is a pivot turn;
/// larger values widen the arc by offsetting both wheel targets forwards.
/// Speeds are normalised so the wheel with the larger magnitude target runs
/// at `base_speed_deg_s` and the other is scaled down by the ratio of
/// magnitudes, preserving the arc shape while both wheels complete
/// together.
pub fn arc_targets(
    angle_deg: f64,
    radius_factor: f64,
    turning_const: f64,
    base_speed_deg_s: f64,
) -> ArcTargets {
    let left_angle_deg = angle_deg * turning_const + radius_factor;
    let right_angle_deg = -angle_deg * turning_const + radius_factor;

    let abs_left = left_angle_deg.abs();
    let abs_right = right_angle_deg.abs();
    let larger = abs_left.max(abs_right);

    let (left_speed_deg_s, right_speed_deg_s) = if larger == 0.0 {
        // Degenerate zero-length turn, nothing to drive
        (0.0, 0.0)
    } else {
        (
            base_speed_deg_s * abs_left / larger,
            base_speed_deg_s * abs_right / larger,
        )
    };

    ArcTargets {
        left_angle_deg,
        right_angle_deg,
        left_speed_deg_s,
        right_speed_deg_s,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_pivot_turn_targets() {
        // 90 degree right pivot with turning constant 2.2
        let targets = arc_targets(90.0, 0.0, 2.2, 1000.0);

        assert!((targets.left_angle_deg - 198.0).abs() < 1e-9);
        assert!((targets.right_angle_deg + 198.0).abs() < 1e-9);

        // Equal magnitude targets run at equal speed
        assert_eq!(targets.left_speed_deg_s, 1000.0);
        assert_eq!(targets.right_speed_deg_s, 1000.0);
    }

    #[test]
    fn test_wide_arc_scales_inner_wheel() {
        let targets = arc_targets(90.0, 198.0, 2.2, 1000.0);

        assert!((targets.left_angle_deg - 396.0).abs() < 1e-9);
        assert!(targets.right_angle_deg.abs() < 1e-9);

        // Outer wheel at base speed, inner wheel scaled by the magnitude
        // ratio. The targets carry rounding from the turning-constant
        // product, so compare with a tolerance
        assert!((targets.left_speed_deg_s - 1000.0).abs() < 1e-9);
        assert!(targets.right_speed_deg_s.abs() < 1e-9);
    }

    #[test]
    fn test_left_turn_mirrors_right_turn() {
        let right = arc_targets(45.0, 100.0, 2.2, 1000.0);
        let left = arc_targets(-45.0, 100.0, 2.2, 1000.0);

        assert_eq!(right.left_angle_deg, left.right_angle_deg);
        assert_eq!(right.right_angle_deg, left.left_angle_deg);
        assert_eq!(right.left_speed_deg_s, left.right_speed_deg_s);
    }

    #[test]
    fn test_zero_turn_is_degenerate() {
        let targets = arc_targets(0.0, 0.0, 2.2, 1000.0);
        assert_eq!(targets.left_speed_deg_s, 0.0);
        assert_eq!(targets.right_speed_deg_s, 0.0);
    }

    #[test]
    fn test_speed_ratio_preserves_arc_shape() {
        let targets = arc_targets(60.0, 300.0, 2.2, 1000.0);

        // The speed ratio must equal the target magnitude ratio so both
        // wheels finish together
        let angle_ratio = targets.right_angle_deg.abs() / targets.left_angle_deg.abs();
        let speed_ratio = targets.right_speed_deg_s / targets.left_speed_deg_s;
        assert!((angle_ratio - speed_ratio).abs() < 1e-9);
    }
}
