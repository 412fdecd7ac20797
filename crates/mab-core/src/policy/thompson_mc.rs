use mab_math::{Dist, RewardDistribution};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::{Policy, PolicyError};

/// Monte-Carlo Thompson sampling.
///
/// Draws one sample per arm per round and credits the winner; ties split the
/// credit. Converges to [`Thompson`](super::Thompson) but is far too slow for
/// serving, so it is a cross-check only. Seeded per call, so the same rewards
/// always give the same estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThompsonMc {
    iterations: usize,
    seed: u64,
}

impl ThompsonMc {
    pub fn new(iterations: usize, seed: u64) -> Result<Self, PolicyError> {
        if iterations == 0 {
            return Err(PolicyError::ZeroIterations);
        }
        Ok(Self { iterations, seed })
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }
}

impl Policy for ThompsonMc {
    fn compute_probs(&self, rewards: &[Dist]) -> Result<Vec<f64>, PolicyError> {
        let mut counts = vec![0.0; rewards.len()];
        let live: Vec<usize> = (0..rewards.len()).filter(|&i| !rewards[i].is_null()).collect();
        if live.is_empty() {
            return Ok(counts);
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut winners = Vec::with_capacity(live.len());
        for _ in 0..self.iterations {
            let mut best = f64::NEG_INFINITY;
            winners.clear();
            for &i in &live {
                let draw = rewards[i].sample(&mut rng);
                if draw > best {
                    best = draw;
                    winners.clear();
                    winners.push(i);
                } else if draw == best {
                    winners.push(i);
                }
            }
            let share = 1.0 / winners.len() as f64;
            for &w in &winners {
                counts[w] += share;
            }
        }

        let total = self.iterations as f64;
        Ok(counts.into_iter().map(|c| c / total).collect())
    }

    fn name(&self) -> &'static str {
        "thompson_mc"
    }
}
