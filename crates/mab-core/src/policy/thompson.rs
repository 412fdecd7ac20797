use mab_math::{Dist, Integrator, Quadrature, RewardDistribution};
use rayon::prelude::*;
use std::fmt::Debug;
use tracing::debug;

use super::{Policy, PolicyError};

/// Exact Thompson sampling.
///
/// The probability that arm `i` is optimal is
///
/// ```text
/// Pᵢ = ∫ pᵢ(x) · ∏_{j≠i} Fⱼ(x) dx   over support(Dᵢ)
/// ```
///
/// evaluated with the configured [`Integrator`]. Arms are integrated in
/// parallel; each task reads the shared reward vector and writes only its own
/// slot. The raw integrals are then rescaled to sum to 1, absorbing the
/// integration tolerance and the truncation of Normal supports.
///
/// Point arms are not supported: a point has no density, so its integral over
/// `(v, v)` is always 0 and it is never selected.
#[derive(Debug, Clone, Default)]
pub struct Thompson<I = Quadrature> {
    integrator: I,
}

impl Thompson<Quadrature> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<I: Integrator> Thompson<I> {
    pub fn with_integrator(integrator: I) -> Self {
        Self { integrator }
    }

    pub fn integrator(&self) -> &I {
        &self.integrator
    }

    fn arm_probability(&self, rewards: &[Dist], arm: usize) -> Result<f64, PolicyError> {
        let own = &rewards[arm];
        if own.is_null() {
            return Ok(0.0);
        }

        let integrand = |x: f64| {
            let mut p = own.density(x);
            for (j, other) in rewards.iter().enumerate() {
                if j != arm && !other.is_null() {
                    p *= other.cdf(x);
                }
            }
            p
        };

        let (lo, hi) = own.support();
        let prob = self
            .integrator
            .integrate(&integrand, lo, hi)
            .map_err(|source| PolicyError::Integration { arm, source })?;
        debug!(arm, dist = %own, prob, "thompson arm probability");
        Ok(prob)
    }
}

impl<I: Integrator + Debug> Policy for Thompson<I> {
    fn compute_probs(&self, rewards: &[Dist]) -> Result<Vec<f64>, PolicyError> {
        if rewards.is_empty() {
            return Ok(Vec::new());
        }

        let results: Vec<Result<f64, PolicyError>> = (0..rewards.len())
            .into_par_iter()
            .map(|arm| self.arm_probability(rewards, arm))
            .collect();

        // Lowest failing arm wins so the reported error does not depend on
        // thread scheduling.
        let mut probs = results.into_iter().collect::<Result<Vec<f64>, _>>()?;
        normalize(&mut probs);
        Ok(probs)
    }

    fn name(&self) -> &'static str {
        "thompson"
    }
}

/// Rescale to a unit sum. All-zero input stays all zero.
fn normalize(probs: &mut [f64]) {
    let total: f64 = probs.iter().map(|p| p.max(0.0)).sum();
    if total > 0.0 {
        for p in probs.iter_mut() {
            *p = p.max(0.0) / total;
        }
    }
}
