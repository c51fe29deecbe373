//! Exit codes for sassfmt, following Ruff's convention
//!
//! These exit codes allow users and CI/CD systems to distinguish between
//! different types of failures.

/// Success - Everything formatted, or all checked files already formatted
pub const SUCCESS: i32 = 0;

/// Changes detected - `--check` found files that are not formatted
pub const CHANGES_DETECTED: i32 = 1;

/// Tool error - Configuration error, file access error, or converter failure
pub const TOOL_ERROR: i32 = 2;

/// Helper functions for consistent exit behavior
pub mod exit {
    use super::{CHANGES_DETECTED, SUCCESS, TOOL_ERROR};

    /// Exit with success code (0)
    pub fn success() -> ! {
        std::process::exit(SUCCESS);
    }

    /// Exit with changes detected code (1)
    pub fn changes_detected() -> ! {
        std::process::exit(CHANGES_DETECTED);
    }

    /// Exit with tool error code (2)
    pub fn tool_error() -> ! {
        std::process::exit(TOOL_ERROR);
    }
}
