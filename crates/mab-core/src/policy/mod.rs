//! Selection policies.
//!
//! A policy maps the reward vector to a probability vector of the same length
//! and order. Every policy gives [`Dist::Null`] arms probability exactly 0 and
//! leaves them out of every other arm's computation.

mod epsilon_greedy;
mod proportional;
mod thompson;
mod thompson_mc;

pub use epsilon_greedy::EpsilonGreedy;
pub use proportional::Proportional;
pub use thompson::Thompson;
pub use thompson_mc::ThompsonMc;

use mab_math::{Dist, QuadratureError};
use std::fmt::Debug;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PolicyError {
    #[error("invalid epsilon {0}: must be within [0, 1]")]
    InvalidEpsilon(f64),

    #[error("negative mean reward {mean} for arm {arm}")]
    NegativeMean { arm: usize, mean: f64 },

    #[error("mean reward for arm {arm} is not finite: {mean}")]
    NonFiniteMean { arm: usize, mean: f64 },

    #[error("integration failed for arm {arm}: {source}")]
    Integration {
        arm: usize,
        #[source]
        source: QuadratureError,
    },

    #[error("monte-carlo iteration count must be > 0")]
    ZeroIterations,
}

impl From<PolicyError> for mab_common::Error {
    fn from(e: PolicyError) -> Self {
        match e {
            PolicyError::InvalidEpsilon(eps) => mab_common::Error::InvalidEpsilon(eps),
            PolicyError::NegativeMean { arm, mean } => {
                mab_common::Error::NegativeMean { arm, mean }
            }
            PolicyError::NonFiniteMean { .. } => mab_common::Error::InvalidReward(e.to_string()),
            PolicyError::Integration { .. } => mab_common::Error::Convergence(e.to_string()),
            PolicyError::ZeroIterations => mab_common::Error::Config(e.to_string()),
        }
    }
}

/// Turns a reward vector into selection probabilities.
pub trait Policy: Debug + Send + Sync {
    fn compute_probs(&self, rewards: &[Dist]) -> Result<Vec<f64>, PolicyError>;

    /// Short identifier used in logs.
    fn name(&self) -> &'static str;
}

impl<P: Policy + ?Sized> Policy for Box<P> {
    fn compute_probs(&self, rewards: &[Dist]) -> Result<Vec<f64>, PolicyError> {
        (**self).compute_probs(rewards)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
