//! Exit codes for the `commute` CLI.
//!
//! Exit codes communicate operation outcome without requiring output parsing.

/// Exit codes for commute operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Command completed
    Clean = 0,

    /// Configuration error
    ConfigError = 10,

    /// Route data missing or unreadable; dashboard disabled
    DataUnavailable = 11,

    /// I/O error
    IoError = 13,

    /// Internal/unknown error
    InternalError = 99,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Map an error onto its exit code.
    pub fn for_error(err: &ce_common::Error) -> Self {
        match err.code() {
            10..=19 => ExitCode::ConfigError,
            20..=29 => ExitCode::DataUnavailable,
            60 => ExitCode::IoError,
            _ => ExitCode::InternalError,
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}
