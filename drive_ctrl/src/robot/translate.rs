//! Straight translation primitives

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::debug;

// Internal
use super::{MoveCmd, Robot};
use crate::control::{ControlSession, DriftCorrector, EaseProfile, PollSample, StopCondition};
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
    /// Timed straight translation with optional easing and drift
    /// correction.
    pub fn move_time(&mut self, duration_ms: f64, cmd: &MoveCmd) -> Result<(), DriveCtrlError> {
        Self::check_polling(cmd.polling_ms)?;
        if duration_ms < 0.0 {
            return Err(DriveCtrlError::Configuration(format!(
                "duration_ms must not be negative, got {}",
                duration_ms
            )));
        }

        if self.config.debug_mode {
            debug!(
                "Moving for {} ms, reverse={}, ease_in={}, ease_out={}, correction={}",
                duration_ms, cmd.reverse, cmd.ease_in, cmd.ease_out, cmd.correction
            );
        }

        let ease = EaseProfile::new(
            cmd.ease_in,
            cmd.ease_out,
            cmd.ease_duration_ms,
            Some(duration_ms),
        );
        let corrector = DriftCorrector::default();
        let mut condition = StopCondition::elapsed(duration_ms);

        // Drift is accumulated from the start of this motion
        if let Err(e) = self.devices.left_motor.reset_angle() {
            return Err(self.halt_on_fault(cmd.stop, e));
        }
        if let Err(e) = self.devices.right_motor.reset_angle() {
            return Err(self.halt_on_fault(cmd.stop, e));
        }

        let mut session = ControlSession::begin(self.clock.elapsed_ms());

        loop {
            let elapsed_ms = session.elapsed_ms(self.clock.elapsed_ms());
            let sample = PollSample {
                elapsed_ms,
                ..Default::default()
            };

            if condition.met(&sample) {
                break;
            }

            let correction = if cmd.correction {
                let left_angle = match self.devices.left_motor.angle_deg() {
                    Ok(a) => a,
                    Err(e) => return Err(self.halt_on_fault(cmd.stop, e)),
                };
                let right_angle = match self.devices.right_motor.angle_deg() {
                    Ok(a) => a,
                    Err(e) => return Err(self.halt_on_fault(cmd.stop, e)),
                };
                corrector.correction(left_angle, right_angle)
            } else {
                0.0
            };

            session.ease_factor = ease.factor(elapsed_ms, Some(duration_ms));

            let speed_left =
                self.clamp_speed((self.config.base_speed + correction) * session.ease_factor);
            let speed_right =
                self.clamp_speed((self.config.base_speed - correction) * session.ease_factor);

            let (speed_left, speed_right) = if cmd.reverse {
                (-speed_left, -speed_right)
            } else {
                (speed_left, speed_right)
            };

            if let Err(e) = self.devices.left_motor.run(speed_left) {
                return Err(self.halt_on_fault(cmd.stop, e));
            }
            if let Err(e) = self.devices.right_motor.run(speed_right) {
                return Err(self.halt_on_fault(cmd.stop, e));
            }

            self.clock.wait_ms(cmd.polling_ms);
        }

        self.stop_drive(cmd.stop).map_err(Into::into)
    }

    /// Move straight for a number of full wheel rotations.
    ///
    /// Positive rotations move forward, negative backward. Both wheels are
    /// issued the same rotation so they complete together, the first
    /// non-blocking and the second blocking.
    pub fn move_rotations(
        &mut self,
        rotations: f64,
        stop: StopAction,
    ) -> Result<(), DriveCtrlError> {
        if self.config.debug_mode {
            debug!("Moving {} rotations with action {:?}", rotations, stop);
        }

        let angle_deg = (rotations * 360.0).abs();
        let speed = if rotations >= 0.0 {
            self.config.base_speed
        } else {
            -self.config.base_speed
        };

        if let Err(e) = self
            .devices
            .left_motor
            .run_to_angle(speed, angle_deg, stop, false)
        {
            return Err(self.halt_on_fault(stop, e));
        }
        if let Err(e) = self
            .devices
            .right_motor
            .run_to_angle(speed, angle_deg, stop, true)
        {
            return Err(self.halt_on_fault(stop, e));
        }

        Ok(())
    }
}
