//! The bandit configuration file.
//!
//! Every section is optional; a missing section takes the engine defaults
//! (Thompson policy, 4-point Gauss–Legendre halving for up to 12
//! refinements at 1e-5 absolute and relative tolerance, 1000 sampler buckets).

use mab_math::numint::{DEFAULT_ABS_TOL, DEFAULT_MAX_ITERATIONS, DEFAULT_REL_TOL};
use mab_math::{RuleFamily, Tolerance};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::path::Path;

use crate::validate::{ValidationError, ValidationResult};
use crate::CONFIG_SCHEMA_VERSION;

/// Upper bound on the number of sub-intervals a configuration may reach.
pub const MAX_PIECES: u64 = 1 << 24;

// ── Sections ────────────────────────────────────────────────────────────

/// Selection policy and its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PolicyConfig {
    /// Exact Thompson sampling by numerical integration.
    Thompson,
    EpsilonGreedy {
        epsilon: f64,
    },
    Proportional,
    /// Monte-Carlo Thompson. Slow; for cross-checking only.
    ThompsonMc {
        iterations: usize,
        #[serde(default)]
        seed: u64,
    },
}

impl Default for PolicyConfig {
    fn default() -> Self {
        PolicyConfig::Thompson
    }
}

impl fmt::Display for PolicyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyConfig::Thompson => write!(f, "thompson"),
            PolicyConfig::EpsilonGreedy { epsilon } => write!(f, "epsilon_greedy(ε={epsilon})"),
            PolicyConfig::Proportional => write!(f, "proportional"),
            PolicyConfig::ThompsonMc { iterations, seed } => {
                write!(f, "thompson_mc(iterations={iterations}, seed={seed})")
            }
        }
    }
}

/// Quadrature used by the Thompson policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuadratureConfig {
    pub rule: RuleFamily,
    pub degree: usize,
    /// Pieces each interval is split into per refinement.
    pub subintervals: usize,
    pub max_iterations: usize,
    /// Unset means the bound is ignored. At least one bound must be set.
    pub absolute_tolerance: Option<f64>,
    pub relative_tolerance: Option<f64>,
}

impl Default for QuadratureConfig {
    fn default() -> Self {
        Self {
            rule: RuleFamily::GaussLegendre,
            degree: 4,
            subintervals: 2,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            absolute_tolerance: Some(DEFAULT_ABS_TOL),
            relative_tolerance: Some(DEFAULT_REL_TOL),
        }
    }
}

impl QuadratureConfig {
    /// The configured bounds, with unset ones at `+∞`.
    pub fn tolerance(&self) -> Tolerance {
        Tolerance::both(
            self.absolute_tolerance.unwrap_or(f64::INFINITY),
            self.relative_tolerance.unwrap_or(f64::INFINITY),
        )
    }

    fn check(&self, problems: &mut Vec<String>) {
        if !self.rule.supports(self.degree) {
            let (lo, hi) = self.rule.degrees();
            problems.push(format!(
                "quadrature.degree {} unsupported for {} (expected {lo}..={hi})",
                self.degree, self.rule
            ));
        }
        if self.subintervals < 2 {
            problems.push(format!(
                "quadrature.subintervals must be >= 2, got {}",
                self.subintervals
            ));
        } else {
            let pieces = u32::try_from(self.max_iterations)
                .ok()
                .and_then(|n| (self.subintervals as u64).checked_pow(n));
            if pieces.map_or(true, |p| p > MAX_PIECES) {
                problems.push(format!(
                    "quadrature.max_iterations {} with {} subintervals exceeds {MAX_PIECES} pieces",
                    self.max_iterations, self.subintervals
                ));
            }
        }
        match (self.absolute_tolerance, self.relative_tolerance) {
            (None, None) => {
                problems.push("quadrature needs an absolute or relative tolerance".to_string())
            }
            (abs, rel) => {
                for (name, value) in [("absolute_tolerance", abs), ("relative_tolerance", rel)] {
                    if let Some(v) = value {
                        if !(v > 0.0) {
                            problems.push(format!("quadrature.{name} must be > 0, got {v}"));
                        }
                    }
                }
            }
        }
    }
}

/// Deterministic sampler settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    pub buckets: u64,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self { buckets: 1000 }
    }
}

/// Wire format of reward payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WireFamily {
    /// `{"alpha": .., "beta": ..}`
    Beta,
    /// `{"mu": .., "sigma": ..}`
    Normal,
    /// `{"mu": ..}`
    Point,
}

impl fmt::Display for WireFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireFamily::Beta => write!(f, "beta"),
            WireFamily::Normal => write!(f, "normal"),
            WireFamily::Point => write!(f, "point"),
        }
    }
}

/// Where rewards come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardConfig {
    pub family: WireFamily,
    /// Remote scoring service. Requests are POSTed with the bandit context.
    pub url: Option<String>,
    pub timeout_ms: u64,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            family: WireFamily::Beta,
            url: None,
            timeout_ms: 2_000,
        }
    }
}

// ── Top level ───────────────────────────────────────────────────────────

/// Complete bandit configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BanditConfig {
    pub schema_version: String,
    pub policy: PolicyConfig,
    pub quadrature: QuadratureConfig,
    pub sampler: SamplerConfig,
    pub reward: RewardConfig,
}

impl Default for BanditConfig {
    fn default() -> Self {
        Self {
            schema_version: CONFIG_SCHEMA_VERSION.to_string(),
            policy: PolicyConfig::default(),
            quadrature: QuadratureConfig::default(),
            sampler: SamplerConfig::default(),
            reward: RewardConfig::default(),
        }
    }
}

impl BanditConfig {
    /// Load from a file; `.toml` files are TOML, anything else is JSON.
    pub fn from_file(path: &Path) -> ValidationResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ValidationError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::parse_toml(&content),
            _ => Self::parse_json(&content),
        }
    }

    pub fn parse_json(json: &str) -> ValidationResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| ValidationError::ParseError(format!("Invalid JSON: {}", e)))
    }

    pub fn parse_toml(text: &str) -> ValidationResult<Self> {
        toml::from_str(text).map_err(|e| ValidationError::ParseError(format!("Invalid TOML: {}", e)))
    }

    pub fn to_json_pretty(&self) -> ValidationResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ValidationError::ParseError(format!("Cannot serialize: {}", e)))
    }

    /// Semantic validation. Reports every problem found, not just the first.
    pub fn validate(&self) -> ValidationResult<()> {
        let mut problems = Vec::new();

        if !mab_common::schema::is_compatible(&self.schema_version) {
            problems.push(format!(
                "schema_version {} is not compatible with {CONFIG_SCHEMA_VERSION}",
                self.schema_version
            ));
        }

        match &self.policy {
            PolicyConfig::EpsilonGreedy { epsilon } if !(0.0..=1.0).contains(epsilon) => {
                problems.push(format!("policy.epsilon must be within [0, 1], got {epsilon}"));
            }
            PolicyConfig::ThompsonMc { iterations: 0, .. } => {
                problems.push("policy.iterations must be > 0".to_string());
            }
            _ => {}
        }

        self.quadrature.check(&mut problems);

        if self.sampler.buckets == 0 {
            problems.push("sampler.buckets must be > 0".to_string());
        }

        if self.reward.timeout_ms == 0 {
            problems.push("reward.timeout_ms must be > 0".to_string());
        }
        if let Some(url) = &self.reward.url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                problems.push(format!("reward.url must be http(s), got {url:?}"));
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::Invalid(problems))
        }
    }

    /// SHA-256 hex digest of the canonical JSON serialization.
    pub fn fingerprint(&self) -> String {
        let canonical = serde_json::to_vec(self).unwrap_or_default();
        sha256_hex(&canonical)
    }
}

/// Compute SHA-256 hex digest.
fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}
