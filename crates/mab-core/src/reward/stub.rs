use mab_math::Dist;
use serde_json::Value;
use std::collections::HashMap;

use super::{BanditContext, RequestContext, RewardError, RewardSource};

/// Fixed rewards, whatever the context.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RewardStub {
    rewards: Vec<Dist>,
}

impl RewardStub {
    pub fn new(rewards: Vec<Dist>) -> Self {
        Self { rewards }
    }
}

impl RewardSource for RewardStub {
    fn get_rewards(
        &self,
        _ctx: &RequestContext,
        _bandit_context: Option<&BanditContext>,
    ) -> Result<Vec<Dist>, RewardError> {
        Ok(self.rewards.clone())
    }
}

/// Rewards keyed by a string bandit context.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContextualRewardStub {
    rewards: HashMap<String, Vec<Dist>>,
}

impl ContextualRewardStub {
    pub fn new(rewards: HashMap<String, Vec<Dist>>) -> Self {
        Self { rewards }
    }

    pub fn insert(&mut self, key: impl Into<String>, rewards: Vec<Dist>) {
        self.rewards.insert(key.into(), rewards);
    }
}

impl RewardSource for ContextualRewardStub {
    fn get_rewards(
        &self,
        _ctx: &RequestContext,
        bandit_context: Option<&BanditContext>,
    ) -> Result<Vec<Dist>, RewardError> {
        let key = match bandit_context {
            Some(Value::String(key)) => key,
            Some(other) => return Err(RewardError::UnexpectedContext(other.to_string())),
            None => return Err(RewardError::UnexpectedContext("nothing".to_string())),
        };
        self.rewards
            .get(key)
            .cloned()
            .ok_or_else(|| RewardError::UnknownContext(key.clone()))
    }
}
