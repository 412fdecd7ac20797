//! Exit codes for the `mab` CLI.
//!
//! Failures map from the stable error codes of [`mab_common::Error`], one
//! exit code per taxonomy bucket, so scripts can branch without parsing
//! output.

use mab_common::{Error, ErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Decision made / command succeeded
    Ok = 0,

    /// Command-line usage error
    Usage = 2,

    /// Configuration error
    ConfigError = 10,

    /// Malformed reward data or bandit context
    DataError = 20,

    /// Quadrature did not converge
    NumericError = 30,

    /// Weights could not be sampled
    SamplingError = 40,

    /// Reward source failed or was cancelled
    RewardSourceError = 50,

    /// I/O or serialization error
    IoError = 60,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn is_success(self) -> bool {
        self == ExitCode::Ok
    }
}

impl From<&Error> for ExitCode {
    fn from(e: &Error) -> Self {
        match e.kind() {
            ErrorKind::Config => ExitCode::ConfigError,
            ErrorKind::Data => ExitCode::DataError,
            ErrorKind::Numeric => ExitCode::NumericError,
            ErrorKind::Sampling => ExitCode::SamplingError,
            ErrorKind::RewardSource => ExitCode::RewardSourceError,
            ErrorKind::Io => ExitCode::IoError,
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}
