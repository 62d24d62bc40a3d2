//! Line-tracing primitives

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, trace};

// Internal
use super::{LineTraceCmd, Robot};
use crate::control::{trace_error, ControlSession, EaseProfile, PdController, PollSample, StopCondition};
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
    /// PD line trace for a fixed duration.
    pub fn line_trace_time(
        &mut self,
        duration_ms: f64,
        cmd: &LineTraceCmd,
    ) -> Result<(), DriveCtrlError> {
        if duration_ms < 0.0 {
            return Err(DriveCtrlError::Configuration(format!(
                "duration_ms must not be negative, got {}",
                duration_ms
            )));
        }

        if self.config.debug_mode {
            debug!(
                "Starting line trace for {} ms with mode {:?}",
                duration_ms, cmd.mode
            );
        }

        let ease = EaseProfile::new(true, false, cmd.ease_duration_ms, Some(duration_ms));

        self.line_trace_loop(
            cmd,
            StopCondition::elapsed(duration_ms),
            ease,
            Some(duration_ms),
        )
    }

    /// PD line trace until either sensor reads below the junction
    /// threshold.
    ///
    /// `safety_timeout_ms` bounds an otherwise unbounded loop: when given,
    /// the trace also terminates once that much time has passed without a
    /// junction.
    pub fn line_trace_junction(
        &mut self,
        cmd: &LineTraceCmd,
        safety_timeout_ms: Option<f64>,
    ) -> Result<(), DriveCtrlError> {
        if self.config.debug_mode {
            debug!(
                "Starting line trace until junction with mode {:?}",
                cmd.mode
            );
        }

        let condition = match safety_timeout_ms {
            Some(timeout_ms) => StopCondition::AnyOf(vec![
                StopCondition::junction(),
                StopCondition::elapsed(timeout_ms),
            ]),
            None => StopCondition::junction(),
        };

        let ease = EaseProfile::new(true, false, cmd.ease_duration_ms, None);

        self.line_trace_loop(cmd, condition, ease, None)
    }

    /// Shared trace loop: poll sensors, PD-correct the differential speed,
    /// terminate on `condition`, then apply the stop action.
    fn line_trace_loop(
        &mut self,
        cmd: &LineTraceCmd,
        mut condition: StopCondition,
        ease: EaseProfile,
        total_ms: Option<f64>,
    ) -> Result<(), DriveCtrlError> {
        Self::check_polling(cmd.polling_ms)?;

        let pd = PdController::new(cmd.k_p, cmd.k_d);
        let mut session = ControlSession::begin(self.clock.elapsed_ms());

        loop {
            let left = match self.devices.left_sensor.reflectance() {
                Ok(reading) => reading,
                Err(e) => return Err(self.halt_on_fault(cmd.stop, e)),
            };
            let right = match self.devices.right_sensor.reflectance() {
                Ok(reading) => reading,
                Err(e) => return Err(self.halt_on_fault(cmd.stop, e)),
            };

            let elapsed_ms = session.elapsed_ms(self.clock.elapsed_ms());
            let sample = PollSample {
                elapsed_ms,
                left_reflect: left,
                right_reflect: right,
                ..Default::default()
            };

            if condition.met(&sample) {
                break;
            }

            // An absent reading skips this poll's correction entirely; the
            // previous error is kept for the next derivative
            if let (Some(left_val), Some(right_val)) = (left, right) {
                let error = trace_error(cmd.mode, left_val, right_val, cmd.target);
                let turn = pd.output(error, session.last_error);

                session.ease_factor = ease.factor(elapsed_ms, total_ms);
                let eased_speed = self.config.trace_speed * session.ease_factor;

                let speed_left = self.clamp_speed(eased_speed + turn);
                let speed_right = self.clamp_speed(eased_speed - turn);

                if let Err(e) = self.devices.left_motor.run(speed_left) {
                    return Err(self.halt_on_fault(cmd.stop, e));
                }
                if let Err(e) = self.devices.right_motor.run(speed_right) {
                    return Err(self.halt_on_fault(cmd.stop, e));
                }

                session.last_error = error;

                if self.config.debug_mode {
                    trace!(
                        "trace: l={:.1} r={:.1} err={:.2} turn={:.2} speeds=({:.0}, {:.0})",
                        left_val,
                        right_val,
                        error,
                        turn,
                        speed_left,
                        speed_right
                    );
                }
            }

            self.clock.wait_ms(cmd.polling_ms);
        }

        self.stop_drive(cmd.stop).map_err(Into::into)
    }
}

#[cfg(test)]
mod test {
    use super::super::test_rig::rig;
    use super::*;
    use crate::hw::mock::MotorCmd;
    use crate::hw::StopAction;

    #[test]
    fn test_timed_trace_clamps_saturated_speeds() {
        let mut rig = rig();

        // Left sensor pinned at 0: error = (50-0)-(50-50) = 50 every poll,
        // and a huge gain saturates both wheels
        rig.left_sensor.script(&[Some(0.0); 8]);

        let mut cmd = LineTraceCmd::new(100.0, 0.0);
        cmd.ease_duration_ms = 0.0;

        rig.robot.line_trace_time(20.0, &cmd).unwrap();

        // 4 polls at 5 ms within the 20 ms bound
        assert_eq!(rig.left_motor.run_speeds(), vec![1200.0; 4]);
        assert_eq!(rig.right_motor.run_speeds(), vec![0.0; 4]);
        assert_eq!(rig.left_motor.last_command(), Some(MotorCmd::Hold));
        assert_eq!(rig.right_motor.last_command(), Some(MotorCmd::Hold));
    }

    #[test]
    fn test_trace_on_line_runs_straight_at_trace_speed() {
        let mut rig = rig();

        // Both sensors read 50 (the fallback): zero error in balance mode
        let mut cmd = LineTraceCmd::new(1.0, 0.3);
        cmd.ease_duration_ms = 0.0;

        rig.robot.line_trace_time(20.0, &cmd).unwrap();

        let trace_speed = rig.robot.config().trace_speed;
        assert_eq!(rig.left_motor.run_speeds(), vec![trace_speed; 4]);
        assert_eq!(rig.right_motor.run_speeds(), vec![trace_speed; 4]);
    }

    #[test]
    fn test_junction_trace_stops_on_first_low_poll() {
        let mut rig = rig();

        // Third poll sees the left sensor drop below the threshold
        rig.left_sensor.script(&[Some(50.0), Some(50.0), Some(10.0)]);

        let mut cmd = LineTraceCmd::new(1.0, 0.3);
        cmd.stop = StopAction::Brake;

        rig.robot.line_trace_junction(&cmd, None).unwrap();

        // Exactly two polls commanded before the junction fired
        assert_eq!(rig.left_motor.run_speeds().len(), 2);
        assert_eq!(rig.right_motor.run_speeds().len(), 2);
        assert_eq!(rig.left_motor.last_command(), Some(MotorCmd::Brake));
        assert_eq!(rig.right_motor.last_command(), Some(MotorCmd::Brake));
    }

    #[test]
    fn test_absent_reading_skips_poll() {
        let mut rig = rig();

        // First poll has no left reading: no command may be issued for it
        rig.left_sensor.script(&[None]);

        let mut cmd = LineTraceCmd::new(1.0, 0.3);
        cmd.ease_duration_ms = 0.0;

        rig.robot.line_trace_time(10.0, &cmd).unwrap();

        // Two polls fit in 10 ms at 5 ms, only the second one commanded
        assert_eq!(rig.left_motor.run_speeds().len(), 1);
        assert_eq!(rig.right_motor.run_speeds().len(), 1);
    }

    #[test]
    fn test_junction_trace_safety_timeout() {
        let mut rig = rig();

        // Sensors never see a junction: only the timeout can end the loop
        let cmd = LineTraceCmd::new(1.0, 0.3);
        rig.robot.line_trace_junction(&cmd, Some(50.0)).unwrap();

        assert_eq!(rig.clock.now_ms(), 50.0);
        assert_eq!(rig.left_motor.last_command(), Some(MotorCmd::Hold));
    }

    #[test]
    fn test_motor_fault_propagates_and_other_motor_stops() {
        let mut rig = rig();

        rig.left_motor.fail_on_run();
        rig.left_motor.fail_on_hold();

        let cmd = LineTraceCmd::new(1.0, 0.3);
        let result = rig.robot.line_trace_time(20.0, &cmd);

        assert!(matches!(result, Err(DriveCtrlError::Hw(_))));
        // Best-effort stop still reached the healthy motor
        assert_eq!(rig.right_motor.last_command(), Some(MotorCmd::Hold));
    }

    #[test]
    fn test_sensor_fault_propagates_and_drive_stops() {
        let mut rig = rig();

        rig.right_sensor.fail();

        let cmd = LineTraceCmd::new(1.0, 0.3);
        let result = rig.robot.line_trace_time(20.0, &cmd);

        assert!(matches!(result, Err(DriveCtrlError::Hw(_))));
        // The fault hit before any speed was commanded, and both motors
        // were still brought to the stop action
        assert_eq!(rig.left_motor.commands(), vec![MotorCmd::Hold]);
        assert_eq!(rig.right_motor.commands(), vec![MotorCmd::Hold]);
    }

    #[test]
    fn test_degenerate_polling_rejected() {
        let mut rig = rig();

        let mut cmd = LineTraceCmd::new(1.0, 0.3);
        cmd.polling_ms = 0.0;

        let result = rig.robot.line_trace_time(100.0, &cmd);
        assert!(matches!(result, Err(DriveCtrlError::Configuration(_))));
    }
}
