//! Robot motion primitives
//!
//! The [`Robot`] owns the device set and drives the motion primitives. Each
//! primitive blocks the calling context for its entire duration, running a
//! fixed-period polling loop until its termination condition fires, and
//! applies its stop action exactly once at loop exit regardless of the exit
//! reason. The drive motors are exclusively owned by whichever primitive is
//! currently executing.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod arc;
mod aux;
mod cmd;
mod line_trace;
mod seek;
mod translate;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
use crate::hw::{Clock, DeviceSet, HwError, MotorHandle, SensorHandle, StopAction};
use crate::params::RobotConfig;
use crate::DriveCtrlError;
use util::maths::clamp;

pub use cmd::*;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The motion-control engine for a two-wheeled differential robot.
///
/// Generic over the motor, sensor and clock capabilities so it can drive
/// real hardware, a simulation or the mock rig alike.
pub struct Robot<M, S, C> {
    pub(crate) config: RobotConfig,
    pub(crate) devices: DeviceSet<M, S>,
    pub(crate) clock: C,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<M, S, C> Robot<M, S, C>
where
    M: MotorHandle,
    S: SensorHandle,
    C: Clock,
{
    /// Create a new robot from its tuning parameters and device set.
    pub fn new(
        config: RobotConfig,
        devices: DeviceSet<M, S>,
        clock: C,
    ) -> Result<Self, DriveCtrlError> {
        config.validate()?;

        Ok(Self {
            config,
            devices,
            clock,
        })
    }

    /// The robot's tuning parameters.
    pub fn config(&self) -> &RobotConfig {
        &self.config
    }

    /// Clamp a commanded speed into `[0, max_speed]`.
    ///
    /// Applied to every speed before it is sent to a motor.
    pub(crate) fn clamp_speed(&self, speed_deg_s: f64) -> f64 {
        clamp(&speed_deg_s, &0.0, &self.config.max_speed)
    }

    /// Apply the stop action to both drive motors.
    ///
    /// Both motors are always commanded, even if the first fails, so the
    /// second still reaches a safe state. The first failure is returned.
    pub(crate) fn stop_drive(&mut self, action: StopAction) -> Result<(), HwError> {
        let left = action.apply(&mut self.devices.left_motor);
        let right = action.apply(&mut self.devices.right_motor);
        left.and(right)
    }

    /// Handle a hardware fault mid-primitive: bring the drive to a stop on a
    /// best-effort basis and return the original fault.
    pub(crate) fn halt_on_fault(&mut self, action: StopAction, fault: HwError) -> DriveCtrlError {
        // The stop itself may fail on the faulted motor; that must not mask
        // the original fault
        let _ = self.stop_drive(action);
        fault.into()
    }

    /// Reject degenerate polling rates.
    pub(crate) fn check_polling(polling_ms: f64) -> Result<(), DriveCtrlError> {
        if polling_ms <= 0.0 {
            return Err(DriveCtrlError::Configuration(format!(
                "polling_ms must be positive, got {}",
                polling_ms
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// TEST UTILITIES
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod test_rig {
    use super::*;
    use crate::hw::mock::{MockClock, MockMotor, MockSensor};

    /// A robot wired to the mock rig, with handles kept for inspection.
    pub struct TestRig {
        pub robot: Robot<MockMotor, MockSensor, MockClock>,
        pub left_motor: MockMotor,
        pub right_motor: MockMotor,
        pub aux_motor_1: MockMotor,
        pub left_sensor: MockSensor,
        pub right_sensor: MockSensor,
        pub clock: MockClock,
    }

    /// Build a rig with the default configuration.
    ///
    /// Auxiliary motor 1 is present, auxiliary motor 2 is absent.
    pub fn rig() -> TestRig {
        rig_with(RobotConfig::default())
    }

    pub fn rig_with(config: RobotConfig) -> TestRig {
        let left_motor = MockMotor::new();
        let right_motor = MockMotor::new();
        let aux_motor_1 = MockMotor::new();
        let left_sensor = MockSensor::fixed(Some(50.0));
        let right_sensor = MockSensor::fixed(Some(50.0));
        let clock = MockClock::new();

        let devices = DeviceSet {
            left_motor: left_motor.clone(),
            right_motor: right_motor.clone(),
            aux_motor_1: Some(aux_motor_1.clone()),
            aux_motor_2: None,
            left_sensor: left_sensor.clone(),
            right_sensor: right_sensor.clone(),
            aux_sensor_1: None,
            aux_sensor_2: None,
        };

        let robot = Robot::new(config, devices, clock.clone()).unwrap();

        TestRig {
            robot,
            left_motor,
            right_motor,
            aux_motor_1,
            left_sensor,
            right_sensor,
            clock,
        }
    }
}

#[cfg(test)]
mod test {
    use super::test_rig::rig_with;
    use super::*;
    use crate::hw::mock::{MockClock, MockMotor, MockSensor};

    #[test]
    fn test_construction_validates_config() {
        let mut config = RobotConfig::default();
        config.max_speed = -1.0;

        let devices = DeviceSet {
            left_motor: MockMotor::new(),
            right_motor: MockMotor::new(),
            aux_motor_1: None,
            aux_motor_2: None,
            left_sensor: MockSensor::default(),
            right_sensor: MockSensor::default(),
            aux_sensor_1: None,
            aux_sensor_2: None,
        };

        let result = Robot::new(config, devices, MockClock::new());
        assert!(matches!(result, Err(DriveCtrlError::Configuration(_))));
    }

    #[test]
    fn test_clamp_speed_range() {
        let rig = rig_with(RobotConfig::default());
        let max = rig.robot.config().max_speed;

        assert_eq!(rig.robot.clamp_speed(max + 500.0), max);
        assert_eq!(rig.robot.clamp_speed(-200.0), 0.0);
        assert_eq!(rig.robot.clamp_speed(600.0), 600.0);
    }
}
