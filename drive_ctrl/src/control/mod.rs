//! Control-law building blocks
//!
//! The reusable pieces the motion primitives are composed from: the trace
//! error functions, the PD controller, the easing profile, the drift
//! corrector, the termination conditions and the arc geometry converter.
//! Everything here is pure or holds only explicit per-call state, so each
//! piece is independently testable.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod arc_geom;
mod drift;
mod easing;
mod pd;
mod session;
mod stop_cond;
mod trace;

// ---------------------------------------------------------------------------
// EXPORTS
// ---------------------------------------------------------------------------

pub use arc_geom::{arc_targets, ArcTargets};
pub use drift::DriftCorrector;
pub use easing::EaseProfile;
pub use pd::PdController;
pub use session::ControlSession;
pub use stop_cond::{PollSample, StopCondition};
pub use trace::{trace_error, TraceMode};
