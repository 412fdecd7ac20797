//! The decision pipeline: rewards → probabilities → arm.

use mab_math::Dist;
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use tracing::{debug, info};

use crate::policy::{Policy, PolicyError};
use crate::reward::{BanditContext, RequestContext, RewardError, RewardSource};
use crate::sampler::{Sampler, SamplerError};

/// Outcome of a decision, filled in stage by stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Decision {
    pub rewards: Vec<Dist>,
    pub probs: Vec<f64>,
    /// `None` until the sampler has run.
    pub arm: Option<usize>,
}

impl Decision {
    /// The selected arm, or −1 when unresolved.
    pub fn arm_index(&self) -> i64 {
        self.arm.and_then(|a| i64::try_from(a).ok()).unwrap_or(-1)
    }
}

/// Pipeline stage, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Rewards,
    Probabilities,
    Sampling,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Rewards => write!(f, "rewards"),
            Stage::Probabilities => write!(f, "probabilities"),
            Stage::Sampling => write!(f, "sampling"),
        }
    }
}

#[derive(Debug, Error)]
pub enum StageError {
    #[error(transparent)]
    Reward(#[from] RewardError),
    #[error(transparent)]
    Policy(#[from] PolicyError),
    #[error(transparent)]
    Sampler(#[from] SamplerError),
}

impl From<StageError> for mab_common::Error {
    fn from(e: StageError) -> Self {
        match e {
            StageError::Reward(e) => e.into(),
            StageError::Policy(e) => e.into(),
            StageError::Sampler(e) => e.into(),
        }
    }
}

/// A failed decision: the stage that failed, what was computed before it,
/// and the stage's error.
#[derive(Debug, Error)]
#[error("{stage} stage failed: {source}")]
pub struct SelectError {
    pub stage: Stage,
    pub partial: Decision,
    #[source]
    pub source: StageError,
}

impl SelectError {
    fn new(stage: Stage, partial: Decision, source: impl Into<StageError>) -> Self {
        Self {
            stage,
            partial,
            source: source.into(),
        }
    }
}

impl From<SelectError> for mab_common::Error {
    fn from(e: SelectError) -> Self {
        e.source.into()
    }
}

/// Reward source, policy, and sampler wired into one pipeline.
///
/// Immutable after construction; one `Bandit` can serve concurrent
/// decisions as long as its parts are reentrant.
pub struct Bandit {
    source: Box<dyn RewardSource>,
    policy: Box<dyn Policy>,
    sampler: Box<dyn Sampler>,
    fingerprint: Option<String>,
}

impl fmt::Debug for Bandit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bandit")
            .field("policy", &self.policy)
            .field("sampler", &self.sampler)
            .field("fingerprint", &self.fingerprint)
            .finish_non_exhaustive()
    }
}

impl Bandit {
    pub fn new(
        source: impl RewardSource + 'static,
        policy: impl Policy + 'static,
        sampler: impl Sampler + 'static,
    ) -> Self {
        Self::from_parts(Box::new(source), Box::new(policy), Box::new(sampler))
    }

    pub fn from_parts(
        source: Box<dyn RewardSource>,
        policy: Box<dyn Policy>,
        sampler: Box<dyn Sampler>,
    ) -> Self {
        Self {
            source,
            policy,
            sampler,
            fingerprint: None,
        }
    }

    /// Tag logged decisions with the configuration they came from.
    pub fn with_fingerprint(mut self, fingerprint: impl Into<String>) -> Self {
        self.fingerprint = Some(fingerprint.into());
        self
    }

    pub fn policy(&self) -> &dyn Policy {
        self.policy.as_ref()
    }

    /// Fetch rewards and compute probabilities without sampling.
    pub fn compute_probs(
        &self,
        ctx: &RequestContext,
        bandit_context: Option<&BanditContext>,
    ) -> Result<Decision, SelectError> {
        let mut decision = Decision::default();

        match self.source.get_rewards(ctx, bandit_context) {
            Ok(rewards) => decision.rewards = rewards,
            Err(e) => return Err(SelectError::new(Stage::Rewards, decision, e)),
        }
        debug!(stage = %Stage::Rewards, arms = decision.rewards.len(), "stage complete");

        match self.policy.compute_probs(&decision.rewards) {
            Ok(probs) => decision.probs = probs,
            Err(e) => return Err(SelectError::new(Stage::Probabilities, decision, e)),
        }
        debug_assert_eq!(decision.probs.len(), decision.rewards.len());
        debug!(
            stage = %Stage::Probabilities,
            policy = self.policy.name(),
            probs = ?decision.probs,
            "stage complete"
        );

        Ok(decision)
    }

    /// Run the full pipeline for `unit`.
    ///
    /// On failure nothing after the failing stage runs, and the error carries
    /// the partially filled decision.
    pub fn select_arm(
        &self,
        ctx: &RequestContext,
        unit: &str,
        bandit_context: Option<&BanditContext>,
    ) -> Result<Decision, SelectError> {
        let mut decision = self.compute_probs(ctx, bandit_context)?;

        match self.sampler.sample(&decision.probs, unit) {
            Ok(arm) => decision.arm = Some(arm),
            Err(e) => return Err(SelectError::new(Stage::Sampling, decision, e)),
        }

        info!(
            unit,
            arm = decision.arm_index(),
            policy = self.policy.name(),
            fingerprint = self.fingerprint.as_deref().unwrap_or("-"),
            "arm selected"
        );
        Ok(decision)
    }
}
