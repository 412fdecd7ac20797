//! Deterministic weighted sampling keyed by a unit identity.
//!
//! The unit is hashed into one of `buckets` equally likely buckets, and the
//! bucket range is partitioned among arms in proportion to their weights. The
//! mapping is a pure function of `(weights, unit)`: the same unit lands on
//! the same arm in every process, forever.

use sha1::{Digest, Sha1};
use std::fmt::Debug;
use thiserror::Error;
use tracing::warn;

pub const DEFAULT_BUCKETS: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SamplerError {
    #[error("sum(weights) must be positive, got {sum}")]
    NonPositiveSum { sum: f64 },

    #[error("weight for arm {arm} is negative: {weight}")]
    NegativeWeight { arm: usize, weight: f64 },

    #[error("weight for arm {arm} is not finite: {weight}")]
    NonFiniteWeight { arm: usize, weight: f64 },

    #[error("bucket count must be > 0")]
    ZeroBuckets,
}

impl From<SamplerError> for mab_common::Error {
    fn from(e: SamplerError) -> Self {
        match e {
            SamplerError::ZeroBuckets => mab_common::Error::Config(e.to_string()),
            _ => mab_common::Error::Sampling(e.to_string()),
        }
    }
}

/// Picks an arm from a weight vector for a unit.
pub trait Sampler: Debug + Send + Sync {
    fn sample(&self, weights: &[f64], unit: &str) -> Result<usize, SamplerError>;
}

impl<S: Sampler + ?Sized> Sampler for Box<S> {
    fn sample(&self, weights: &[f64], unit: &str) -> Result<usize, SamplerError> {
        (**self).sample(weights, unit)
    }
}

/// SHA-1 bucket sampler.
///
/// The bucket is the first 8 digest bytes read big-endian, shifted right by
/// one hex digit, modulo the bucket count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sha1Sampler {
    buckets: u64,
}

impl Default for Sha1Sampler {
    fn default() -> Self {
        Self {
            buckets: DEFAULT_BUCKETS,
        }
    }
}

impl Sha1Sampler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_buckets(buckets: u64) -> Result<Self, SamplerError> {
        if buckets == 0 {
            return Err(SamplerError::ZeroBuckets);
        }
        Ok(Self { buckets })
    }

    pub fn buckets(&self) -> u64 {
        self.buckets
    }

    /// Hex SHA-1 digest of the unit.
    pub fn digest_hex(unit: &str) -> String {
        hex::encode(Sha1::digest(unit.as_bytes()))
    }

    /// The unit's bucket in `[0, buckets)`.
    pub fn bucket(&self, unit: &str) -> u64 {
        let digest = Sha1::digest(unit.as_bytes());
        let mut lead = [0u8; 8];
        lead.copy_from_slice(&digest[..8]);
        (u64::from_be_bytes(lead) >> 4) % self.buckets
    }

    /// The arm whose share of the bucket range contains `bucket`.
    pub fn index_for_bucket(&self, weights: &[f64], bucket: u64) -> Result<usize, SamplerError> {
        for (arm, &weight) in weights.iter().enumerate() {
            if !weight.is_finite() {
                return Err(SamplerError::NonFiniteWeight { arm, weight });
            }
            if weight < 0.0 {
                return Err(SamplerError::NegativeWeight { arm, weight });
            }
        }
        let sum: f64 = weights.iter().sum();
        if sum <= 0.0 {
            return Err(SamplerError::NonPositiveSum { sum });
        }

        let scale = self.buckets as f64 / sum;
        let target = bucket as f64;
        let mut edge = -1.0;
        for (arm, &weight) in weights.iter().enumerate() {
            edge += weight * scale;
            if edge >= target {
                return Ok(arm);
            }
        }

        // Rounding left the last edge just short of the top bucket.
        let arm = weights
            .iter()
            .rposition(|&w| w > 0.0)
            .ok_or(SamplerError::NonPositiveSum { sum })?;
        warn!(bucket, edge, arm, "bucket past cumulative weight, using last weighted arm");
        Ok(arm)
    }
}

impl Sampler for Sha1Sampler {
    fn sample(&self, weights: &[f64], unit: &str) -> Result<usize, SamplerError> {
        self.index_for_bucket(weights, self.bucket(unit))
    }
}
