//! Per-call control session state

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Serialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Transient state of one motion primitive call.
///
/// Created when the primitive starts, threaded through its poll steps and
/// discarded when it returns. Keeping this explicit rather than as ambient
/// robot state keeps each primitive reentrant.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ControlSession {
    /// Clock time at which the motion began.
    start_ms: f64,

    /// Error value of the last successful dual-sensor poll.
    ///
    /// Only updated after both sensors produce a reading; on a degraded
    /// poll the derivative keeps using the previous error unchanged.
    pub last_error: f64,

    /// Ease factor applied on the most recent poll.
    pub ease_factor: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ControlSession {
    /// Begin a session at the given clock time.
    pub fn begin(start_ms: f64) -> Self {
        Self {
            start_ms,
            last_error: 0.0,
            ease_factor: 1.0,
        }
    }

    /// Time elapsed within this session.
    pub fn elapsed_ms(&self, now_ms: f64) -> f64 {
        now_ms - self.start_ms
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_elapsed_is_relative_to_start() {
        let session = ControlSession::begin(250.0);
        assert_eq!(session.elapsed_ms(250.0), 0.0);
        assert_eq!(session.elapsed_ms(300.0), 50.0);
    }

    #[test]
    fn test_session_starts_with_zero_error() {
        let session = ControlSession::begin(0.0);
        assert_eq!(session.last_error, 0.0);
        assert_eq!(session.ease_factor, 1.0);
    }
}
