//! Hardware capability boundary
//!
//! The engine depends on the hardware only through the traits in this
//! module. Anything able to provide them (real motor drivers, a simulation,
//! the mock rig) can be driven by the motion primitives.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod mock;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};
use std::time::Instant;

// Internal
use crate::DriveCtrlError;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors raised by the hardware layer.
#[derive(Debug, Clone, thiserror::Error)]
pub enum HwError {
    #[error("Motor fault: {0}")]
    MotorFault(String),

    #[error("Sensor fault: {0}")]
    SensorFault(String),
}

/// Terminal motor behaviour applied when a motion ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopAction {
    /// Actively hold the current position.
    Hold,
    /// Cut power and let the motor freewheel.
    Coast,
    /// Actively brake to a standstill.
    Brake,
}

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// Capability contract for a single motor.
///
/// Angles are measured in degrees from the last reset, speeds in
/// degrees/second. All commands are fallible; a failure is fatal for the
/// motion primitive that issued it.
pub trait MotorHandle {
    /// Run the motor at the given speed until the next command.
    fn run(&mut self, speed_deg_s: f64) -> Result<(), HwError>;

    /// Rotate through `angle_deg` degrees at the given speed, applying
    /// `stop` on completion.
    ///
    /// With `wait` set the call blocks until the rotation completes,
    /// otherwise it returns immediately while the motor keeps turning. The
    /// speed sign selects the direction, `angle_deg` is a magnitude.
    fn run_to_angle(
        &mut self,
        speed_deg_s: f64,
        angle_deg: f64,
        stop: StopAction,
        wait: bool,
    ) -> Result<(), HwError>;

    /// Zero the accumulated angle.
    fn reset_angle(&mut self) -> Result<(), HwError>;

    /// Accumulated angle since the last reset.
    fn angle_deg(&mut self) -> Result<f64, HwError>;

    /// Instantaneous measured speed.
    fn speed_deg_s(&mut self) -> Result<f64, HwError>;

    /// Actively hold the current position.
    fn hold(&mut self) -> Result<(), HwError>;

    /// Cut power and coast.
    fn stop(&mut self) -> Result<(), HwError>;

    /// Actively brake.
    fn brake(&mut self) -> Result<(), HwError>;
}

/// Capability contract for a reflectance sensor.
pub trait SensorHandle {
    /// Read the current reflectance value.
    ///
    /// `Ok(None)` means the sensor produced no reading this cycle. This is a
    /// valid degraded input, not an error; callers skip that poll's error
    /// update.
    fn reflectance(&mut self) -> Result<Option<f64>, HwError>;
}

/// Monotonic time source and cooperative delay.
///
/// `wait_ms` is the only suspension point in the engine; the control loops
/// subdivide time into fixed polling slices with it.
pub trait Clock {
    /// Milliseconds elapsed since the clock was created.
    fn elapsed_ms(&self) -> f64;

    /// Block the calling context for the given number of milliseconds.
    fn wait_ms(&mut self, ms: f64);
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The full set of device handles given to the robot at construction.
///
/// The two drive motors and two line sensors are mandatory, the auxiliary
/// entries are optional. Referencing an absent auxiliary motor raises
/// [`DriveCtrlError::UnconfiguredDevice`].
pub struct DeviceSet<M, S> {
    pub left_motor: M,
    pub right_motor: M,
    pub aux_motor_1: Option<M>,
    pub aux_motor_2: Option<M>,

    pub left_sensor: S,
    pub right_sensor: S,
    pub aux_sensor_1: Option<S>,
    pub aux_sensor_2: Option<S>,
}

/// System clock backed by `std::time::Instant` and `thread::sleep`.
pub struct SysClock {
    origin: Instant,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl StopAction {
    /// Apply this action to the given motor.
    pub fn apply<M: MotorHandle>(self, motor: &mut M) -> Result<(), HwError> {
        match self {
            StopAction::Hold => motor.hold(),
            StopAction::Coast => motor.stop(),
            StopAction::Brake => motor.brake(),
        }
    }
}

impl std::str::FromStr for StopAction {
    type Err = DriveCtrlError;

    /// Parse the configuration-text names `"HOLD"`, `"STOP"` and `"BRAKE"`.
    ///
    /// Unknown names are a configuration error rather than a silent
    /// fallback.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HOLD" => Ok(StopAction::Hold),
            "STOP" => Ok(StopAction::Coast),
            "BRAKE" => Ok(StopAction::Brake),
            other => Err(DriveCtrlError::Configuration(format!(
                "Unknown stop action '{}'",
                other
            ))),
        }
    }
}

impl<M, S> DeviceSet<M, S>
where
    M: MotorHandle,
    S: SensorHandle,
{
    /// Get the auxiliary motor for the given selector.
    pub fn aux_motor(&mut self, selector: u8) -> Result<&mut M, DriveCtrlError> {
        match selector {
            1 => self
                .aux_motor_1
                .as_mut()
                .ok_or(DriveCtrlError::UnconfiguredDevice(1)),
            2 => self
                .aux_motor_2
                .as_mut()
                .ok_or(DriveCtrlError::UnconfiguredDevice(2)),
            n => Err(DriveCtrlError::InvalidSelector(n)),
        }
    }
}

impl SysClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SysClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SysClock {
    fn elapsed_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1e3
    }

    fn wait_ms(&mut self, ms: f64) {
        if ms > 0.0 {
            std::thread::sleep(std::time::Duration::from_secs_f64(ms / 1e3));
        }
    }
}
