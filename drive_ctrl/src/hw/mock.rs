//! Mock hardware rig
//!
//! Deterministic stand-ins for the capability traits, driven by simulated
//! time. Sensor and motor readings are scripted per poll so control-loop
//! behaviour can be asserted without real hardware.
//!
//! The mocks share their state behind `Rc<RefCell<_>>` so a test can keep a
//! clone for inspection after handing the rig to the robot. They are
//! single-threaded by design, matching the engine's concurrency model.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use super::{Clock, HwError, MotorHandle, SensorHandle, StopAction};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A motor command recorded by a [`MockMotor`].
#[derive(Debug, Clone, PartialEq)]
pub enum MotorCmd {
    Run(f64),
    RunToAngle {
        speed_deg_s: f64,
        angle_deg: f64,
        stop: StopAction,
        wait: bool,
    },
    ResetAngle,
    Hold,
    Stop,
    Brake,
}

#[derive(Default)]
struct MotorState {
    commands: Vec<MotorCmd>,
    speed_script: VecDeque<f64>,
    angle_script: VecDeque<f64>,
    last_speed: f64,
    last_angle: f64,
    fail_run: bool,
    fail_hold: bool,
}

/// Mock motor recording every command it receives.
///
/// Speed and angle readings come from scripts: each read pops the next
/// scripted value, and once a script is exhausted the last value repeats.
#[derive(Clone, Default)]
pub struct MockMotor {
    state: Rc<RefCell<MotorState>>,
}

#[derive(Default)]
struct SensorState {
    readings: VecDeque<Option<f64>>,
    fallback: Option<f64>,
    fail: bool,
}

/// Mock reflectance sensor with scripted per-poll readings.
#[derive(Clone, Default)]
pub struct MockSensor {
    state: Rc<RefCell<SensorState>>,
}

/// Simulated-time clock.
///
/// `wait_ms` advances simulated time instead of sleeping, so control loops
/// run to completion instantly and deterministically.
#[derive(Clone)]
pub struct MockClock {
    now_ms: Rc<Cell<f64>>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl MockMotor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue successive `speed_deg_s()` readings.
    pub fn script_speeds(&self, speeds: &[f64]) {
        self.state
            .borrow_mut()
            .speed_script
            .extend(speeds.iter().copied());
    }

    /// Queue successive `angle_deg()` readings.
    pub fn script_angles(&self, angles: &[f64]) {
        self.state
            .borrow_mut()
            .angle_script
            .extend(angles.iter().copied());
    }

    /// Make every subsequent `run` command fail.
    pub fn fail_on_run(&self) {
        self.state.borrow_mut().fail_run = true;
    }

    /// Make every subsequent `hold` command fail.
    pub fn fail_on_hold(&self) {
        self.state.borrow_mut().fail_hold = true;
    }

    /// All commands received so far.
    pub fn commands(&self) -> Vec<MotorCmd> {
        self.state.borrow().commands.clone()
    }

    /// The speeds of all `Run` commands received so far.
    pub fn run_speeds(&self) -> Vec<f64> {
        self.state
            .borrow()
            .commands
            .iter()
            .filter_map(|c| match c {
                MotorCmd::Run(s) => Some(*s),
                _ => None,
            })
            .collect()
    }

    /// The most recent command, if any.
    pub fn last_command(&self) -> Option<MotorCmd> {
        self.state.borrow().commands.last().cloned()
    }
}

impl MotorHandle for MockMotor {
    fn run(&mut self, speed_deg_s: f64) -> Result<(), HwError> {
        let mut state = self.state.borrow_mut();
        if state.fail_run {
            return Err(HwError::MotorFault("mock run fault".into()));
        }
        state.commands.push(MotorCmd::Run(speed_deg_s));
        Ok(())
    }

    fn run_to_angle(
        &mut self,
        speed_deg_s: f64,
        angle_deg: f64,
        stop: StopAction,
        wait: bool,
    ) -> Result<(), HwError> {
        let mut state = self.state.borrow_mut();
        if state.fail_run {
            return Err(HwError::MotorFault("mock run_to_angle fault".into()));
        }
        state.commands.push(MotorCmd::RunToAngle {
            speed_deg_s,
            angle_deg,
            stop,
            wait,
        });
        Ok(())
    }

    fn reset_angle(&mut self) -> Result<(), HwError> {
        let mut state = self.state.borrow_mut();
        state.last_angle = 0.0;
        state.commands.push(MotorCmd::ResetAngle);
        Ok(())
    }

    fn angle_deg(&mut self) -> Result<f64, HwError> {
        let mut state = self.state.borrow_mut();
        if let Some(a) = state.angle_script.pop_front() {
            state.last_angle = a;
        }
        Ok(state.last_angle)
    }

    fn speed_deg_s(&mut self) -> Result<f64, HwError> {
        let mut state = self.state.borrow_mut();
        if let Some(s) = state.speed_script.pop_front() {
            state.last_speed = s;
        }
        Ok(state.last_speed)
    }

    fn hold(&mut self) -> Result<(), HwError> {
        let mut state = self.state.borrow_mut();
        if state.fail_hold {
            return Err(HwError::MotorFault("mock hold fault".into()));
        }
        state.commands.push(MotorCmd::Hold);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), HwError> {
        self.state.borrow_mut().commands.push(MotorCmd::Stop);
        Ok(())
    }

    fn brake(&mut self) -> Result<(), HwError> {
        self.state.borrow_mut().commands.push(MotorCmd::Brake);
        Ok(())
    }
}

impl MockSensor {
    /// A sensor which always reports the given value.
    pub fn fixed(value: Option<f64>) -> Self {
        let sensor = Self::default();
        sensor.state.borrow_mut().fallback = value;
        sensor
    }

    /// Queue per-poll readings. Once exhausted the fallback value repeats.
    pub fn script(&self, readings: &[Option<f64>]) {
        self.state
            .borrow_mut()
            .readings
            .extend(readings.iter().copied());
    }

    /// Make every subsequent read fail.
    pub fn fail(&self) {
        self.state.borrow_mut().fail = true;
    }
}

impl SensorHandle for MockSensor {
    fn reflectance(&mut self) -> Result<Option<f64>, HwError> {
        let mut state = self.state.borrow_mut();
        if state.fail {
            return Err(HwError::SensorFault("mock sensor fault".into()));
        }
        match state.readings.pop_front() {
            Some(reading) => Ok(reading),
            None => Ok(state.fallback),
        }
    }
}

impl MockClock {
    pub fn new() -> Self {
        Self {
            now_ms: Rc::new(Cell::new(0.0)),
        }
    }

    /// Current simulated time in milliseconds.
    pub fn now_ms(&self) -> f64 {
        self.now_ms.get()
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MockClock {
    fn elapsed_ms(&self) -> f64 {
        self.now_ms.get()
    }

    fn wait_ms(&mut self, ms: f64) {
        self.now_ms.set(self.now_ms.get() + ms);
    }
}
