use mab_config::WireFamily;
use mab_math::Dist;
use std::time::Duration;
use tracing::debug;

use super::{BanditContext, RequestContext, RewardError, RewardParser, RewardSource};

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Minimal transport used by [`HttpRewardSource`].
///
/// Non-2xx statuses must come back as a response, not as an error.
pub trait HttpClient: Send + Sync {
    fn post(
        &self,
        url: &str,
        body: Vec<u8>,
        timeout: Option<Duration>,
    ) -> Result<HttpResponse, RewardError>;
}

/// Fetches rewards from a scoring service.
///
/// The bandit context, if any, is POSTed as JSON; without one the body is
/// empty. Any non-2xx status is an error carrying the status and body.
#[derive(Debug, Clone)]
pub struct HttpRewardSource<C, P = WireFamily> {
    client: C,
    url: String,
    parser: P,
}

impl<C: HttpClient, P: RewardParser> HttpRewardSource<C, P> {
    pub fn new(client: C, url: impl Into<String>, parser: P) -> Self {
        Self {
            client,
            url: url.into(),
            parser,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl<C: HttpClient, P: RewardParser> RewardSource for HttpRewardSource<C, P> {
    fn get_rewards(
        &self,
        ctx: &RequestContext,
        bandit_context: Option<&BanditContext>,
    ) -> Result<Vec<Dist>, RewardError> {
        let body = match bandit_context {
            Some(value) => serde_json::to_vec(value).map_err(RewardError::Encode)?,
            None => Vec::new(),
        };

        ctx.check()?;
        debug!(url = %self.url, bytes = body.len(), "requesting rewards");
        let response = self.client.post(&self.url, body, ctx.remaining())?;
        // A result that arrives after cancellation is discarded.
        ctx.check()?;

        if !(200..300).contains(&response.status) {
            return Err(RewardError::Status {
                status: response.status,
                body: String::from_utf8_lossy(&response.body).into_owned(),
            });
        }
        let rewards = self.parser.parse(&response.body)?;
        debug!(url = %self.url, status = response.status, arms = rewards.len(), "rewards received");
        Ok(rewards)
    }
}

/// Blocking [`HttpClient`] backed by `ureq`.
#[cfg(feature = "http")]
#[derive(Debug, Clone)]
pub struct UreqClient {
    agent: ureq::Agent,
}

#[cfg(feature = "http")]
impl Default for UreqClient {
    fn default() -> Self {
        Self {
            agent: ureq::AgentBuilder::new().build(),
        }
    }
}

#[cfg(feature = "http")]
impl UreqClient {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(feature = "http")]
impl HttpClient for UreqClient {
    fn post(
        &self,
        url: &str,
        body: Vec<u8>,
        timeout: Option<Duration>,
    ) -> Result<HttpResponse, RewardError> {
        use std::io::Read;

        let mut request = self
            .agent
            .post(url)
            .set("Content-Type", "application/json");
        if let Some(t) = timeout {
            request = request.timeout(t);
        }
        let response = match request.send_bytes(&body) {
            Ok(r) => r,
            Err(ureq::Error::Status(_, r)) => r,
            Err(e) => return Err(RewardError::Transport(e.to_string())),
        };
        let status = response.status();
        let mut buf = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut buf)
            .map_err(|e| RewardError::Transport(e.to_string()))?;
        Ok(HttpResponse { status, body: buf })
    }
}
