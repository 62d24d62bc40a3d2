//! Arc turn primitive

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::debug;

// Internal
use super::{ArcCmd, Robot};
use crate::control::arc_targets;
use crate::hw::{Clock, MotorHandle, SensorHandle};
use crate::DriveCtrlError;

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<M, S, C> Robot<M, S, C>
where
    M: MotorHandle,
    S: SensorHandle,
    C: Clock,
{
    /// Turn along an arc using differential wheel rotation.
    ///
    /// The wheel targets and speed ratio come from the geometry converter;
    /// the left wheel is commanded non-blocking and the right blocking so
    /// both motions run concurrently and complete together. The stop action
    /// is applied to each wheel by its own rotation command.
    pub fn turn_arc(&mut self, cmd: &ArcCmd) -> Result<(), DriveCtrlError> {
        if self.config.debug_mode {
            debug!(
                "Turning arc with angle {} and radius factor {}",
                cmd.angle_deg, cmd.radius_factor
            );
        }

        let targets = arc_targets(
            cmd.angle_deg,
            cmd.radius_factor,
            self.config.turning_const,
            self.config.base_speed,
        );

        let left_speed = if targets.left_angle_deg >= 0.0 {
            targets.left_speed_deg_s
        } else {
            -targets.left_speed_deg_s
        };
        let right_speed = if targets.right_angle_deg >= 0.0 {
            targets.right_speed_deg_s
        } else {
            -targets.right_speed_deg_s
        };

        if let Err(e) = self.devices.left_motor.run_to_angle(
            left_speed,
            targets.left_angle_deg.abs(),
            cmd.stop,
            false,
        ) {
            return Err(self.halt_on_fault(cmd.stop, e));
        }
        if let Err(e) = self.devices.right_motor.run_to_angle(
            right_speed,
            targets.right_angle_deg.abs(),
            cmd.stop,
            true,
        ) {
            return Err(self.halt_on_fault(cmd.stop, e));
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::super::test_rig::rig;
    use super::*;
    use crate::hw::mock::MotorCmd;
    use crate::hw::StopAction;

    #[test]
    fn test_pivot_turn_commands() {
        let mut rig = rig();

        // 90 degree right pivot with the default turning constant 2.2. The
        // commanded angle carries rounding from the turning-constant
        // product, so compare it with a tolerance
        rig.robot.turn_arc(&ArcCmd::new(90.0)).unwrap();

        match rig.left_motor.last_command() {
            Some(MotorCmd::RunToAngle {
                speed_deg_s,
                angle_deg,
                stop,
                wait,
            }) => {
                assert_eq!(speed_deg_s, 1000.0);
                assert!((angle_deg - 198.0).abs() < 1e-9);
                assert_eq!(stop, StopAction::Hold);
                assert!(!wait);
            }
            other => panic!("unexpected command {:?}", other),
        }
        match rig.right_motor.last_command() {
            Some(MotorCmd::RunToAngle {
                speed_deg_s,
                angle_deg,
                stop,
                wait,
            }) => {
                assert_eq!(speed_deg_s, -1000.0);
                assert!((angle_deg - 198.0).abs() < 1e-9);
                assert_eq!(stop, StopAction::Hold);
                assert!(wait);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_wide_arc_scales_inner_wheel_speed() {
        let mut rig = rig();

        let mut cmd = ArcCmd::new(90.0);
        cmd.radius_factor = 396.0;
        cmd.stop = StopAction::Coast;

        rig.robot.turn_arc(&cmd).unwrap();

        // left target 594, right target 198: inner wheel runs at a third of
        // base speed
        assert_eq!(
            rig.left_motor.last_command(),
            Some(MotorCmd::RunToAngle {
                speed_deg_s: 1000.0,
                angle_deg: 594.0,
                stop: StopAction::Coast,
                wait: false,
            })
        );
        match rig.right_motor.last_command() {
            Some(MotorCmd::RunToAngle {
                speed_deg_s,
                angle_deg,
                wait,
                ..
            }) => {
                assert!((speed_deg_s - 1000.0 / 3.0).abs() < 1e-9);
                assert!((angle_deg - 198.0).abs() < 1e-9);
                assert!(wait);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_faulted_turn_stops_other_wheel() {
        let mut rig = rig();

        rig.right_motor.fail_on_run();

        let result = rig.robot.turn_arc(&ArcCmd::new(45.0));

        assert!(matches!(result, Err(DriveCtrlError::Hw(_))));
        // The left wheel, already running, was brought to a stop
        assert_eq!(rig.left_motor.last_command(), Some(MotorCmd::Hold));
    }
}
