//! Wall-seeking docking primitive

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, trace};

// Internal
use super::{Robot, SeekCmd};
use crate::control::{ControlSession, DriftCorrector, EaseProfile, PollSample, StopCondition};
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
    /// Drive forward until a wall is hit, detected by motor stall.
    ///
    /// The robot moves straight with optional ease-in and drift correction.
    /// The loop ends once neither drive motor's measured speed has exceeded
    /// the stall threshold for the debounce duration, at which point the
    /// robot is assumed to be pressed against the wall and the stop action
    /// is applied.
    pub fn bump_align(&mut self, cmd: &SeekCmd) -> Result<(), DriveCtrlError> {
        Self::check_polling(cmd.polling_ms)?;
        if cmd.debounce_ms < 0.0 {
            return Err(DriveCtrlError::Configuration(format!(
                "debounce_ms must not be negative, got {}",
                cmd.debounce_ms
            )));
        }

        if self.config.debug_mode {
            debug!(
                "Bump align with debounce {} ms, ease_in={}, correction={}",
                cmd.debounce_ms, cmd.ease_in, cmd.correction
            );
        }

        let ease = EaseProfile::new(cmd.ease_in, false, cmd.ease_duration_ms, None);
        let corrector = DriftCorrector::default();
        let mut condition = StopCondition::stall(cmd.stall_threshold_deg_s, cmd.debounce_ms);

        if let Err(e) = self.devices.left_motor.reset_angle() {
            return Err(self.halt_on_fault(cmd.stop, e));
        }
        if let Err(e) = self.devices.right_motor.reset_angle() {
            return Err(self.halt_on_fault(cmd.stop, e));
        }

        let mut session = ControlSession::begin(self.clock.elapsed_ms());

        loop {
            let left_speed = match self.devices.left_motor.speed_deg_s() {
                Ok(s) => s,
                Err(e) => return Err(self.halt_on_fault(cmd.stop, e)),
            };
            let right_speed = match self.devices.right_motor.speed_deg_s() {
                Ok(s) => s,
                Err(e) => return Err(self.halt_on_fault(cmd.stop, e)),
            };

            let elapsed_ms = session.elapsed_ms(self.clock.elapsed_ms());
            let sample = PollSample {
                elapsed_ms,
                left_speed_deg_s: left_speed,
                right_speed_deg_s: right_speed,
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

            session.ease_factor = ease.factor(elapsed_ms, None);

            let speed_left =
                self.clamp_speed((self.config.base_speed + correction) * session.ease_factor);
            let speed_right =
                self.clamp_speed((self.config.base_speed - correction) * session.ease_factor);

            if let Err(e) = self.devices.left_motor.run(speed_left) {
                return Err(self.halt_on_fault(cmd.stop, e));
            }
            if let Err(e) = self.devices.right_motor.run(speed_right) {
                return Err(self.halt_on_fault(cmd.stop, e));
            }

            if self.config.debug_mode {
                trace!(
                    "seek: speeds=({:.0}, {:.0}) measured=({:.0}, {:.0})",
                    speed_left,
                    speed_right,
                    left_speed,
                    right_speed
                );
            }

            self.clock.wait_ms(cmd.polling_ms);
        }

        self.stop_drive(cmd.stop).map_err(Into::into)
    }
}
