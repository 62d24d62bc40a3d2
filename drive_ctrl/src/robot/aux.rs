//! Auxiliary motor primitives

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::debug;

// Internal
use super::Robot;
use crate::hw::{Clock, MotorHandle, SensorHandle, StopAction};
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
    /// Rotate an auxiliary motor through the given angle, blocking until the
    /// target is reached and holding there.
    ///
    /// Negative angles rotate in reverse. The selector picks auxiliary motor
    /// 1 or 2; selecting a motor that was not provided at construction is an
    /// error.
    pub fn move_aux_angle(&mut self, selector: u8, angle_deg: f64) -> Result<(), DriveCtrlError> {
        if self.config.debug_mode {
            debug!("Moving aux motor {} through {} degrees", selector, angle_deg);
        }

        let speed = if angle_deg >= 0.0 {
            self.config.base_speed
        } else {
            -self.config.base_speed
        };

        let motor = self.devices.aux_motor(selector)?;
        motor.run_to_angle(speed, angle_deg.abs(), StopAction::Hold, true)?;

        Ok(())
    }

    /// Run an auxiliary motor until it has travelled past the given angle,
    /// then brake.
    ///
    /// Used to drive a mechanism against a hard end stop: the motor runs at
    /// base speed and the loop watches the accumulated angle rather than a
    /// fixed time.
    pub fn move_aux_stall(
        &mut self,
        selector: u8,
        stall_threshold_deg: f64,
        polling_ms: f64,
    ) -> Result<(), DriveCtrlError> {
        Self::check_polling(polling_ms)?;
        if stall_threshold_deg <= 0.0 {
            return Err(DriveCtrlError::Configuration(format!(
                "stall_threshold_deg must be positive, got {}",
                stall_threshold_deg
            )));
        }

        if self.config.debug_mode {
            debug!(
                "Running aux motor {} to the {} degree stop",
                selector, stall_threshold_deg
            );
        }

        let base_speed = self.config.base_speed;
        let motor = self.devices.aux_motor(selector)?;

        motor.reset_angle()?;
        motor.run(base_speed)?;

        loop {
            let angle = match motor.angle_deg() {
                Ok(a) => a,
                Err(e) => {
                    // Leave the mechanism loose rather than powered against
                    // the stop
                    let _ = motor.brake();
                    return Err(e.into());
                }
            };

            if angle.abs() >= stall_threshold_deg {
                break;
            }

            self.clock.wait_ms(polling_ms);
        }

        let motor = self.devices.aux_motor(selector)?;
        motor.brake()?;

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::super::test_rig::rig;
    use super::*;
    use crate::hw::mock::MotorCmd;

    #[test]
    fn test_aux_angle_forward() {
        let mut rig = rig();

        rig.robot.move_aux_angle(1, 90.0).unwrap();

        assert_eq!(
            rig.aux_motor_1.last_command(),
            Some(MotorCmd::RunToAngle {
                speed_deg_s: 1000.0,
                angle_deg: 90.0,
                stop: StopAction::Hold,
                wait: true,
            })
        );
    }

    #[test]
    fn test_aux_angle_reverse_negates_speed() {
        let mut rig = rig();

        rig.robot.move_aux_angle(1, -45.0).unwrap();

        assert_eq!(
            rig.aux_motor_1.last_command(),
            Some(MotorCmd::RunToAngle {
                speed_deg_s: -1000.0,
                angle_deg: 45.0,
                stop: StopAction::Hold,
                wait: true,
            })
        );
    }

    #[test]
    fn test_aux_unconfigured_selector() {
        let mut rig = rig();

        // The rig has no second auxiliary motor
        let result = rig.robot.move_aux_angle(2, 90.0);
        assert!(matches!(result, Err(DriveCtrlError::UnconfiguredDevice(2))));
    }

    #[test]
    fn test_aux_invalid_selector() {
        let mut rig = rig();

        let result = rig.robot.move_aux_angle(3, 90.0);
        assert!(matches!(result, Err(DriveCtrlError::InvalidSelector(3))));
    }

    #[test]
    fn test_aux_stall_brakes_past_threshold() {
        let mut rig = rig();

        rig.aux_motor_1.script_angles(&[0.0, 5.0, 12.0]);

        rig.robot.move_aux_stall(1, 10.0, 10.0).unwrap();

        assert_eq!(
            rig.aux_motor_1.commands(),
            vec![
                MotorCmd::ResetAngle,
                MotorCmd::Run(1000.0),
                MotorCmd::Brake,
            ]
        );
        // Two polls below the threshold before the third read crossed it
        assert_eq!(rig.clock.now_ms(), 20.0);
    }

    #[test]
    fn test_aux_stall_rejects_bad_threshold() {
        let mut rig = rig();

        let result = rig.robot.move_aux_stall(1, 0.0, 10.0);
        assert!(matches!(result, Err(DriveCtrlError::Configuration(_))));
    }
}
