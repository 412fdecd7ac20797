//! Runtime objects from a [`BanditConfig`].

use mab_config::{BanditConfig, PolicyConfig, QuadratureConfig, ValidationError};
use mab_math::{EquallySpaced, Quadrature, QuadratureError, Rule};
use thiserror::Error;

use crate::bandit::Bandit;
use crate::policy::{EpsilonGreedy, Policy, PolicyError, Proportional, Thompson, ThompsonMc};
use crate::reward::RewardSource;
use crate::sampler::{SamplerError, Sha1Sampler};

#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ValidationError),
    #[error("quadrature: {0}")]
    Quadrature(#[from] QuadratureError),
    #[error("policy: {0}")]
    Policy(#[from] PolicyError),
    #[error("sampler: {0}")]
    Sampler(#[from] SamplerError),
}

impl From<BuildError> for mab_common::Error {
    fn from(e: BuildError) -> Self {
        match e {
            BuildError::Quadrature(QuadratureError::InvalidTolerance { .. }) => {
                mab_common::Error::InvalidTolerance(e.to_string())
            }
            BuildError::Policy(PolicyError::InvalidEpsilon(eps)) => {
                mab_common::Error::InvalidEpsilon(eps)
            }
            _ => mab_common::Error::Config(e.to_string()),
        }
    }
}

/// The adaptive integrator described by a quadrature section.
pub fn build_quadrature(cfg: &QuadratureConfig) -> Result<Quadrature, QuadratureError> {
    Quadrature::builder()
        .rule(Rule::new(cfg.rule, cfg.degree)?)
        .subdivider(EquallySpaced::new(cfg.subintervals)?)
        .tolerance(cfg.tolerance())
        .max_iterations(cfg.max_iterations)
        .build()
}

/// The configured policy.
pub fn build_policy(cfg: &BanditConfig) -> Result<Box<dyn Policy>, BuildError> {
    let policy: Box<dyn Policy> = match &cfg.policy {
        PolicyConfig::Thompson => {
            Box::new(Thompson::with_integrator(build_quadrature(&cfg.quadrature)?))
        }
        PolicyConfig::EpsilonGreedy { epsilon } => Box::new(EpsilonGreedy::new(*epsilon)?),
        PolicyConfig::Proportional => Box::new(Proportional),
        PolicyConfig::ThompsonMc { iterations, seed } => {
            Box::new(ThompsonMc::new(*iterations, *seed)?)
        }
    };
    Ok(policy)
}

impl Bandit {
    /// Validate `cfg` and build the policy and sampler it describes around
    /// `source`. Decisions are logged with the configuration fingerprint.
    pub fn from_config(
        cfg: &BanditConfig,
        source: impl RewardSource + 'static,
    ) -> Result<Self, BuildError> {
        cfg.validate()?;
        let policy = build_policy(cfg)?;
        let sampler = Sha1Sampler::with_buckets(cfg.sampler.buckets)?;
        Ok(Bandit::from_parts(Box::new(source), policy, Box::new(sampler))
            .with_fingerprint(cfg.fingerprint()))
    }
}
