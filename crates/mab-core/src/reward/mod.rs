//! Reward sources: where each arm's current reward distribution comes from.
//!
//! The decision pipeline calls a [`RewardSource`] once per decision. Only
//! reward sources consult the [`RequestContext`]; once rewards are in hand
//! the policy and sampler run to completion.

mod file;
mod http;
mod parse;
mod stub;

pub use file::FileRewardSource;
pub use http::{HttpClient, HttpResponse, HttpRewardSource};
#[cfg(feature = "http")]
pub use http::UreqClient;
pub use parse::{
    beta_from_json, normal_from_json, point_from_json, ParseError, ParseFn, RewardParser,
};
pub use stub::{ContextualRewardStub, RewardStub};

pub use mab_config::WireFamily;

use mab_math::Dist;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Opaque per-decision context passed through to contextual sources.
pub type BanditContext = serde_json::Value;

#[derive(Debug, Error)]
pub enum RewardError {
    #[error("bandit context must be a string, got {0}")]
    UnexpectedContext(String),

    #[error("no rewards for context {0:?}")]
    UnknownContext(String),

    #[error("reward fetch cancelled")]
    Cancelled,

    #[error("reward fetch deadline exceeded")]
    DeadlineExceeded,

    #[error("reward service responded with status {status}")]
    Status { status: u16, body: String },

    #[error("reward transport failed: {0}")]
    Transport(String),

    #[error("failed to encode bandit context: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl From<RewardError> for mab_common::Error {
    fn from(e: RewardError) -> Self {
        use mab_common::Error;
        match e {
            RewardError::UnexpectedContext(got) => {
                Error::UnexpectedContext(format!("expected a string, got {got}"))
            }
            RewardError::Cancelled | RewardError::DeadlineExceeded => Error::Cancelled,
            RewardError::Status { status, .. } => Error::RewardStatus { status },
            RewardError::Parse(p) => Error::InvalidReward(p.to_string()),
            RewardError::Io { source, .. } => Error::Io(source),
            RewardError::Encode(source) => Error::Json(source),
            RewardError::UnknownContext(_) | RewardError::Transport(_) => {
                Error::RewardSource(e.to_string())
            }
        }
    }
}

/// Yields one reward distribution per arm, in arm order.
pub trait RewardSource: Send + Sync {
    fn get_rewards(
        &self,
        ctx: &RequestContext,
        bandit_context: Option<&BanditContext>,
    ) -> Result<Vec<Dist>, RewardError>;
}

impl<S: RewardSource + ?Sized> RewardSource for Box<S> {
    fn get_rewards(
        &self,
        ctx: &RequestContext,
        bandit_context: Option<&BanditContext>,
    ) -> Result<Vec<Dist>, RewardError> {
        (**self).get_rewards(ctx, bandit_context)
    }
}

// ── Request context ─────────────────────────────────────────────────────

/// Caller-owned deadline and cancellation for a single decision.
///
/// Clones share the cancellation flag, so a clone handed to another thread
/// can cancel the in-flight fetch.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    deadline: Option<Instant>,
    cancelled: Arc<AtomicBool>,
}

impl RequestContext {
    /// No deadline, not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
            cancelled: Arc::default(),
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Time left before the deadline; `None` when there is no deadline.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }

    /// Fails if the context was cancelled or its deadline has passed.
    pub fn check(&self) -> Result<(), RewardError> {
        if self.is_cancelled() {
            return Err(RewardError::Cancelled);
        }
        if self.remaining() == Some(Duration::ZERO) {
            return Err(RewardError::DeadlineExceeded);
        }
        Ok(())
    }
}
