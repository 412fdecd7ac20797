use mab_math::{Dist, RewardDistribution};

use super::{Policy, PolicyError};

/// Probability proportional to mean reward.
///
/// Means must be finite and non-negative; anything else is an error. Null arms
/// contribute nothing. When every mean is zero the result is all zeros.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Proportional;

impl Policy for Proportional {
    fn compute_probs(&self, rewards: &[Dist]) -> Result<Vec<f64>, PolicyError> {
        let mut means = Vec::with_capacity(rewards.len());
        for (arm, d) in rewards.iter().enumerate() {
            if d.is_null() {
                means.push(0.0);
                continue;
            }
            let mean = d.mean();
            if !mean.is_finite() {
                return Err(PolicyError::NonFiniteMean { arm, mean });
            }
            if mean < 0.0 {
                return Err(PolicyError::NegativeMean { arm, mean });
            }
            means.push(mean);
        }

        let norm: f64 = means.iter().sum();
        if norm == 0.0 {
            return Ok(vec![0.0; rewards.len()]);
        }
        Ok(means.into_iter().map(|m| m / norm).collect())
    }

    fn name(&self) -> &'static str {
        "proportional"
    }
}
