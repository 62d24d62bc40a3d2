//! Host platform utility functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::path::PathBuf;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Name of the environment variable pointing at the software root directory.
pub const SW_ROOT_ENV_VAR: &str = "TRACER_SW_ROOT";

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Get the software root directory from the environment.
///
/// All parameter files and session directories are resolved relative to this
/// root.
pub fn get_tracer_sw_root() -> Result<PathBuf, std::env::VarError> {
    let root = std::env::var(SW_ROOT_ENV_VAR)?;
    Ok(PathBuf::from(root))
}
