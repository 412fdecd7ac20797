//! Error types for arm selection.

use thiserror::Error;

/// Result type alias for mab operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the process boundary.
///
/// Library crates return their own narrow error enums; those convert into
/// this type where a caller needs one error with a stable code.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid epsilon {0}: must be within [0, 1]")]
    InvalidEpsilon(f64),

    #[error("invalid tolerance: {0}")]
    InvalidTolerance(String),

    // Data errors (20-29)
    #[error("invalid reward data: {0}")]
    InvalidReward(String),

    #[error("negative mean reward {mean} for arm {arm}")]
    NegativeMean { arm: usize, mean: f64 },

    #[error("unexpected bandit context: {0}")]
    UnexpectedContext(String),

    // Numeric errors (30-39)
    #[error("integration failed: {0}")]
    Convergence(String),

    // Sampling errors (40-49)
    #[error("sampling failed: {0}")]
    Sampling(String),

    // Reward source errors (50-59)
    #[error("reward source failed: {0}")]
    RewardSource(String),

    #[error("reward service responded with status {status}")]
    RewardStatus { status: u16 },

    #[error("reward fetch cancelled or past its deadline")]
    Cancelled,

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse classification of an [`Error`], following the error taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Data,
    Numeric,
    Sampling,
    RewardSource,
    Io,
}

impl Error {
    /// Returns the error code for this error type.
    /// Used for detailed error reporting in JSON output and exit codes.
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(_) => 10,
            Error::InvalidEpsilon(_) => 11,
            Error::InvalidTolerance(_) => 12,
            Error::InvalidReward(_) => 20,
            Error::NegativeMean { .. } => 21,
            Error::UnexpectedContext(_) => 22,
            Error::Convergence(_) => 30,
            Error::Sampling(_) => 40,
            Error::RewardSource(_) => 50,
            Error::RewardStatus { .. } => 51,
            Error::Cancelled => 52,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }

    /// The taxonomy bucket this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self.code() {
            10..=19 => ErrorKind::Config,
            20..=29 => ErrorKind::Data,
            30..=39 => ErrorKind::Numeric,
            40..=49 => ErrorKind::Sampling,
            50..=59 => ErrorKind::RewardSource,
            _ => ErrorKind::Io,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_fall_in_their_taxonomy_bucket() {
        assert_eq!(Error::InvalidEpsilon(2.0).kind(), ErrorKind::Config);
        assert_eq!(
            Error::NegativeMean { arm: 1, mean: -0.5 }.kind(),
            ErrorKind::Data
        );
        assert_eq!(Error::Convergence("x".into()).kind(), ErrorKind::Numeric);
        assert_eq!(Error::Sampling("x".into()).kind(), ErrorKind::Sampling);
        assert_eq!(
            Error::RewardStatus { status: 503 }.kind(),
            ErrorKind::RewardSource
        );
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert_eq!(Error::from(io).kind(), ErrorKind::Io);
    }

    #[test]
    fn messages_carry_offending_values() {
        let msg = Error::NegativeMean { arm: 3, mean: -1.5 }.to_string();
        assert!(msg.contains("arm 3"));
        assert!(msg.contains("-1.5"));
    }
}
