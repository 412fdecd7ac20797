//! HTTP reward source against a recording stub transport.

use mab_core::reward::{ParseFn, RequestContext, WireFamily};
use mab_core::{
    Dist, HttpClient, HttpResponse, HttpRewardSource, ParseError, RewardError, RewardSource,
};
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq)]
struct Call {
    url: String,
    body: Vec<u8>,
    timeout: Option<Duration>,
}

/// Returns a canned response and records every request.
#[derive(Clone)]
struct StubClient {
    status: u16,
    body: &'static str,
    calls: Arc<Mutex<Vec<Call>>>,
    cancel_during: Option<RequestContext>,
}

impl StubClient {
    fn new(status: u16, body: &'static str) -> Self {
        Self {
            status,
            body,
            calls: Arc::default(),
            cancel_during: None,
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

impl HttpClient for StubClient {
    fn post(
        &self,
        url: &str,
        body: Vec<u8>,
        timeout: Option<Duration>,
    ) -> Result<HttpResponse, RewardError> {
        self.calls.lock().unwrap().push(Call {
            url: url.to_string(),
            body,
            timeout,
        });
        if let Some(ctx) = &self.cancel_during {
            ctx.cancel();
        }
        Ok(HttpResponse {
            status: self.status,
            body: self.body.as_bytes().to_vec(),
        })
    }
}

const URL: &str = "http://scores.internal/rewards";

#[test]
fn posts_context_and_parses_betas() {
    let client = StubClient::new(200, r#"[{"alpha": 10, "beta": 20}, {"Alpha": 3, "Beta": 4}]"#);
    let source = HttpRewardSource::new(client.clone(), URL, WireFamily::Beta);

    let context = json!({"country": "nz"});
    let rewards = source
        .get_rewards(&RequestContext::new(), Some(&context))
        .unwrap();
    assert_eq!(
        rewards,
        vec![Dist::beta(10.0, 20.0).unwrap(), Dist::beta(3.0, 4.0).unwrap()]
    );

    let calls = client.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].url, URL);
    let sent: serde_json::Value = serde_json::from_slice(&calls[0].body).unwrap();
    assert_eq!(sent, context);
    assert_eq!(calls[0].timeout, None);
}

#[test]
fn no_context_sends_empty_body() {
    let client = StubClient::new(200, r#"[{"mu": 1.5, "sigma": 0.5}]"#);
    let source = HttpRewardSource::new(client.clone(), URL, WireFamily::Normal);

    let rewards = source.get_rewards(&RequestContext::new(), None).unwrap();
    assert_eq!(rewards, vec![Dist::normal(1.5, 0.5).unwrap()]);
    assert!(client.calls()[0].body.is_empty());
}

#[test]
fn deadline_becomes_transport_timeout() {
    let client = StubClient::new(200, r#"[{"mu": 1}]"#);
    let source = HttpRewardSource::new(client.clone(), URL, WireFamily::Point);

    let ctx = RequestContext::with_timeout(Duration::from_secs(30));
    source.get_rewards(&ctx, None).unwrap();
    let timeout = client.calls()[0].timeout.unwrap();
    assert!(timeout <= Duration::from_secs(30));
    assert!(timeout > Duration::from_secs(20));
}

#[test]
fn non_2xx_is_an_error_with_body() {
    let client = StubClient::new(503, "upstream overloaded");
    let source = HttpRewardSource::new(client, URL, WireFamily::Beta);

    match source.get_rewards(&RequestContext::new(), None) {
        Err(RewardError::Status { status, body }) => {
            assert_eq!(status, 503);
            assert_eq!(body, "upstream overloaded");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[test]
fn malformed_payload_is_a_parse_error() {
    let client = StubClient::new(200, r#"[{"alpha": 10}]"#);
    let source = HttpRewardSource::new(client, URL, WireFamily::Beta);

    let err = source.get_rewards(&RequestContext::new(), None).unwrap_err();
    assert!(matches!(
        err,
        RewardError::Parse(ParseError::Missing { field: "beta", arm: 0 })
    ));
    let common: mab_common::Error = err.into();
    assert_eq!(common.kind(), mab_common::ErrorKind::Data);
}

#[test]
fn cancelled_context_never_sends() {
    let client = StubClient::new(200, "[]");
    let source = HttpRewardSource::new(client.clone(), URL, WireFamily::Beta);

    let ctx = RequestContext::new();
    ctx.cancel();
    let err = source.get_rewards(&ctx, None).unwrap_err();
    assert!(matches!(err, RewardError::Cancelled));
    assert!(client.calls().is_empty());
}

#[test]
fn expired_deadline_never_sends() {
    let client = StubClient::new(200, "[]");
    let source = HttpRewardSource::new(client.clone(), URL, WireFamily::Beta);

    let ctx = RequestContext::with_deadline(Instant::now() - Duration::from_millis(1));
    let err = source.get_rewards(&ctx, None).unwrap_err();
    assert!(matches!(err, RewardError::DeadlineExceeded));
    assert!(client.calls().is_empty());
}

#[test]
fn response_after_cancellation_is_discarded() {
    let ctx = RequestContext::new();
    let mut client = StubClient::new(200, r#"[{"alpha": 1, "beta": 1}]"#);
    client.cancel_during = Some(ctx.clone());
    let source = HttpRewardSource::new(client.clone(), URL, WireFamily::Beta);

    let err = source.get_rewards(&ctx, None).unwrap_err();
    assert!(matches!(err, RewardError::Cancelled));
    assert_eq!(client.calls().len(), 1);
}

#[test]
fn custom_parser_plugs_in() {
    let client = StubClient::new(200, "0.25,0.75");
    let parser = ParseFn(|body: &[u8]| -> Result<Vec<Dist>, ParseError> {
        std::str::from_utf8(body)
            .map_err(|e| ParseError::Json(e.to_string()))?
            .split(',')
            .map(|v| {
                v.trim()
                    .parse::<f64>()
                    .map(Dist::point)
                    .map_err(|e| ParseError::Json(e.to_string()))
            })
            .collect()
    });
    let source = HttpRewardSource::new(client, URL, parser);

    let rewards = source.get_rewards(&RequestContext::new(), None).unwrap();
    assert_eq!(rewards, vec![Dist::point(0.25), Dist::point(0.75)]);
}
