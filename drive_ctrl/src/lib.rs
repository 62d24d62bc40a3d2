//! # Drive control library
//!
//! This crate is the motion-control engine for a two-wheeled differential
//! robot. It provides closed-loop driving primitives built on a shared
//! pattern of PD correction, termination conditions and stop-action
//! policies:
//!
//! - PD line tracing for a fixed duration or until a junction is detected
//! - Geometric arc turns
//! - Timed translations with speed easing and straight-line drift correction
//! - Wall-seeking docking via motor-stall debouncing
//! - Auxiliary motor moves (angle target or run-to-angle-threshold)
//!
//! The engine depends on the hardware only through the capability traits in
//! [`hw`] ([`hw::MotorHandle`], [`hw::SensorHandle`], [`hw::Clock`]), never
//! on a specific device family. All primitives run a single-threaded
//! cooperative polling loop with a fixed period, the only suspension point
//! being [`hw::Clock::wait_ms`].

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod control;
pub mod hw;
pub mod params;
pub mod robot;

// ---------------------------------------------------------------------------
// EXPORTS
// ---------------------------------------------------------------------------

pub use hw::{Clock, DeviceSet, HwError, MotorHandle, SensorHandle, StopAction, SysClock};
pub use params::RobotConfig;
pub use robot::Robot;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during drive control operation.
#[derive(Debug, thiserror::Error)]
pub enum DriveCtrlError {
    /// An auxiliary device was referenced but not provided at construction.
    #[error("Auxiliary motor {0} was not provided at construction")]
    UnconfiguredDevice(u8),

    /// An auxiliary motor selector outside the valid set was given.
    #[error("Invalid auxiliary motor selector {0}, expected 1 or 2")]
    InvalidSelector(u8),

    /// A degenerate input was given, either at construction or per-call.
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// A hardware command failed. Fatal for the running motion primitive.
    #[error("Hardware fault: {0}")]
    Hw(#[from] HwError),
}
