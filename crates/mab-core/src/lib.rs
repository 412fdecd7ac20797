//! Arm selection for multi-armed bandits.
//!
//! A [`Bandit`] composes three pieces, each behind a small trait:
//! - a [`RewardSource`] that yields one reward distribution per arm,
//! - a [`Policy`] that turns distributions into selection probabilities,
//! - a [`Sampler`] that maps probabilities and a unit identity to an arm.
//!
//! Thompson sampling is evaluated exactly by numerical integration (see
//! [`mab_math::numint`]); sampling is a pure function of the unit so the same
//! unit always lands on the same arm for the same probabilities.

pub mod bandit;
pub mod exit_codes;
pub mod factory;
pub mod logging;
pub mod policy;
pub mod reward;
pub mod sampler;

pub use bandit::{Bandit, Decision, SelectError, Stage, StageError};
pub use factory::{build_policy, build_quadrature, BuildError};
pub use policy::{EpsilonGreedy, Policy, PolicyError, Proportional, Thompson, ThompsonMc};
pub use reward::{
    BanditContext, ContextualRewardStub, FileRewardSource, HttpClient, HttpResponse,
    HttpRewardSource, ParseError, RequestContext, RewardError, RewardParser, RewardSource,
    RewardStub,
};
pub use sampler::{Sampler, SamplerError, Sha1Sampler, DEFAULT_BUCKETS};

pub use mab_math::{Dist, RewardDistribution};
