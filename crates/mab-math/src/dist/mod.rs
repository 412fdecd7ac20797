//! Reward distributions.
//!
//! Every arm's current reward estimate is a [`Dist`]. Policies only use the
//! capability set in [`RewardDistribution`]: mean, CDF, density, a random
//! draw, and a finite support usable as integration bounds.
//!
//! # Null arms
//!
//! [`Dist::Null`] marks an arm that must never be chosen. It behaves like a
//! point mass at −∞ (mean −∞), but it is a separate variant so policies match
//! on it instead of comparing floating-point sentinels. Its CDF is the
//! constant 1, so it is neutral inside another arm's product of CDFs.

mod beta;
mod normal;
mod point;

pub use beta::Beta;
pub use normal::{Normal, NORMAL_SUPPORT_WIDTH};
pub use point::Point;

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors raised when constructing a distribution.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DistError {
    #[error("{family} parameter {param} must be {requirement}, got {value}")]
    InvalidParameter {
        family: &'static str,
        param: &'static str,
        requirement: &'static str,
        value: f64,
    },
}

/// The capability set every reward distribution provides.
pub trait RewardDistribution {
    /// Expected reward.
    fn mean(&self) -> f64;

    /// Cumulative distribution function evaluated at `x`.
    fn cdf(&self, x: f64) -> f64;

    /// Density (or mass) evaluated at `x`.
    fn density(&self, x: f64) -> f64;

    /// A pseudo-random draw.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64;

    /// Finite bounds outside of which the distribution is treated as zero
    /// for numerical integration.
    fn support(&self) -> (f64, f64);
}

/// One arm's reward estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Dist {
    Normal(Normal),
    Beta(Beta),
    Point(Point),
    Null,
}

impl Dist {
    /// Normal reward estimate, truncated at ±4σ for integration.
    pub fn normal(mu: f64, sigma: f64) -> Result<Self, DistError> {
        Normal::new(mu, sigma).map(Dist::Normal)
    }

    /// Beta reward estimate on [0, 1].
    pub fn beta(alpha: f64, beta: f64) -> Result<Self, DistError> {
        Beta::new(alpha, beta).map(Dist::Beta)
    }

    /// Point estimate. A point at −∞ is the null arm.
    ///
    /// `value` must be finite or −∞; use [`Dist::try_point`] for values that
    /// have not been checked.
    pub fn point(value: f64) -> Self {
        if value == f64::NEG_INFINITY {
            Dist::Null
        } else {
            Dist::Point(Point::new(value))
        }
    }

    /// Point estimate from an unchecked value; NaN and +∞ are rejected.
    pub fn try_point(value: f64) -> Result<Self, DistError> {
        if value.is_nan() || value == f64::INFINITY {
            return Err(DistError::InvalidParameter {
                family: "point",
                param: "value",
                requirement: "finite or -inf",
                value,
            });
        }
        Ok(Dist::point(value))
    }

    /// The arm that must never be chosen.
    pub fn null() -> Self {
        Dist::Null
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Dist::Null)
    }
}

impl RewardDistribution for Dist {
    fn mean(&self) -> f64 {
        match self {
            Dist::Normal(d) => d.mean(),
            Dist::Beta(d) => d.mean(),
            Dist::Point(d) => d.mean(),
            Dist::Null => f64::NEG_INFINITY,
        }
    }

    fn cdf(&self, x: f64) -> f64 {
        match self {
            Dist::Normal(d) => d.cdf(x),
            Dist::Beta(d) => d.cdf(x),
            Dist::Point(d) => d.cdf(x),
            Dist::Null => 1.0,
        }
    }

    fn density(&self, x: f64) -> f64 {
        match self {
            Dist::Normal(d) => d.density(x),
            Dist::Beta(d) => d.density(x),
            Dist::Point(d) => d.density(x),
            Dist::Null => 0.0,
        }
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            Dist::Normal(d) => d.sample(rng),
            Dist::Beta(d) => d.sample(rng),
            Dist::Point(d) => d.sample(rng),
            Dist::Null => f64::NEG_INFINITY,
        }
    }

    fn support(&self) -> (f64, f64) {
        match self {
            Dist::Normal(d) => d.support(),
            Dist::Beta(d) => d.support(),
            Dist::Point(d) => d.support(),
            Dist::Null => (f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }
}

impl fmt::Display for Dist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dist::Normal(d) => write!(f, "Normal({:.6},{:.6})", d.mu(), d.sigma()),
            Dist::Beta(d) => write!(f, "Beta({:.6},{:.6})", d.alpha(), d.beta()),
            Dist::Point(d) => write!(f, "Point({:.6})", d.value()),
            Dist::Null => write!(f, "Null()"),
        }
    }
}

impl From<Normal> for Dist {
    fn from(d: Normal) -> Self {
        Dist::Normal(d)
    }
}

impl From<Beta> for Dist {
    fn from(d: Beta) -> Self {
        Dist::Beta(d)
    }
}

impl From<Point> for Dist {
    fn from(d: Point) -> Self {
        Dist::point(d.value())
    }
}

impl<'de> Deserialize<'de> for Dist {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = DistRepr::deserialize(deserializer)?;
        Dist::try_from(repr).map_err(serde::de::Error::custom)
    }
}

/// Shape used for deserialization so constructors keep validating.
#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum DistRepr {
    Normal { mu: f64, sigma: f64 },
    Beta { alpha: f64, beta: f64 },
    Point { value: f64 },
    Null,
}

impl TryFrom<DistRepr> for Dist {
    type Error = DistError;

    fn try_from(repr: DistRepr) -> Result<Self, Self::Error> {
        match repr {
            DistRepr::Normal { mu, sigma } => Dist::normal(mu, sigma),
            DistRepr::Beta { alpha, beta } => Dist::beta(alpha, beta),
            DistRepr::Point { value } => Dist::try_point(value),
            DistRepr::Null => Ok(Dist::Null),
        }
    }
}
