use mab_config::WireFamily;
use mab_math::Dist;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{BanditContext, RequestContext, RewardError, RewardParser, RewardSource};

/// Reads a reward payload from disk on every call.
#[derive(Debug, Clone)]
pub struct FileRewardSource<P = WireFamily> {
    path: PathBuf,
    parser: P,
}

impl<P: RewardParser> FileRewardSource<P> {
    pub fn new(path: impl Into<PathBuf>, parser: P) -> Self {
        Self {
            path: path.into(),
            parser,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<P: RewardParser> RewardSource for FileRewardSource<P> {
    fn get_rewards(
        &self,
        ctx: &RequestContext,
        _bandit_context: Option<&BanditContext>,
    ) -> Result<Vec<Dist>, RewardError> {
        ctx.check()?;
        let body = std::fs::read(&self.path).map_err(|source| RewardError::Io {
            path: self.path.clone(),
            source,
        })?;
        let rewards = self.parser.parse(&body)?;
        debug!(path = %self.path.display(), arms = rewards.len(), "read reward file");
        Ok(rewards)
    }
}
