use mab_math::{Dist, RewardDistribution};
use tracing::debug;

use super::{Policy, PolicyError};

/// Exploit the best mean with probability `1 - ε`, explore uniformly with `ε`.
///
/// Arms tied for the best mean share the exploitation mass equally. Null arms
/// are not counted among the `k` arms explored over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpsilonGreedy {
    epsilon: f64,
}

impl EpsilonGreedy {
    pub fn new(epsilon: f64) -> Result<Self, PolicyError> {
        if !(0.0..=1.0).contains(&epsilon) {
            return Err(PolicyError::InvalidEpsilon(epsilon));
        }
        Ok(Self { epsilon })
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }
}

impl Policy for EpsilonGreedy {
    fn compute_probs(&self, rewards: &[Dist]) -> Result<Vec<f64>, PolicyError> {
        let mut probs = vec![0.0; rewards.len()];

        let live: Vec<(usize, f64)> = rewards
            .iter()
            .enumerate()
            .filter(|(_, d)| !d.is_null())
            .map(|(i, d)| (i, d.mean()))
            .collect();
        if live.is_empty() {
            return Ok(probs);
        }
        if let Some(&(arm, mean)) = live.iter().find(|(_, m)| !m.is_finite()) {
            return Err(PolicyError::NonFiniteMean { arm, mean });
        }

        let best = live
            .iter()
            .map(|&(_, m)| m)
            .fold(f64::NEG_INFINITY, f64::max);
        let n_best = live.iter().filter(|&&(_, m)| m == best).count();
        let explore = self.epsilon / live.len() as f64;
        let exploit = (1.0 - self.epsilon) / n_best as f64;

        for &(i, m) in &live {
            probs[i] = if m == best { exploit + explore } else { explore };
        }
        debug!(epsilon = self.epsilon, best, n_best, arms = live.len(), "epsilon-greedy");
        Ok(probs)
    }

    fn name(&self) -> &'static str {
        "epsilon_greedy"
    }
}
