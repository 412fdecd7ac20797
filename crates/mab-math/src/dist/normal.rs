use rand::Rng;
use rand_distr::Distribution;
use serde::Serialize;
use statrs::function::erf::erfc;
use std::f64::consts::{PI, SQRT_2};

use super::{DistError, RewardDistribution};

/// Number of standard deviations either side of the mean used as the
/// integration support of a normal arm.
pub const NORMAL_SUPPORT_WIDTH: f64 = 4.0;

/// Normal(mu, sigma). A zero sigma is a point mass at `mu`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Normal {
    mu: f64,
    sigma: f64,
}

impl Normal {
    pub fn new(mu: f64, sigma: f64) -> Result<Self, DistError> {
        if !mu.is_finite() {
            return Err(DistError::InvalidParameter {
                family: "normal",
                param: "mu",
                requirement: "finite",
                value: mu,
            });
        }
        if !(sigma.is_finite() && sigma >= 0.0) {
            return Err(DistError::InvalidParameter {
                family: "normal",
                param: "sigma",
                requirement: "finite and >= 0",
                value: sigma,
            });
        }
        Ok(Self { mu, sigma })
    }

    pub fn mu(&self) -> f64 {
        self.mu
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }
}

impl RewardDistribution for Normal {
    fn mean(&self) -> f64 {
        self.mu
    }

    fn cdf(&self, x: f64) -> f64 {
        if self.sigma == 0.0 {
            return if x >= self.mu { 1.0 } else { 0.0 };
        }
        0.5 * erfc(-(x - self.mu) / (self.sigma * SQRT_2))
    }

    fn density(&self, x: f64) -> f64 {
        if self.sigma == 0.0 {
            return if x == self.mu { f64::NAN } else { 0.0 };
        }
        let z = (x - self.mu) / self.sigma;
        (-0.5 * z * z).exp() / (self.sigma * (2.0 * PI).sqrt())
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match rand_distr::Normal::new(self.mu, self.sigma) {
            Ok(d) => d.sample(rng),
            Err(_) => self.mu,
        }
    }

    fn support(&self) -> (f64, f64) {
        let half = NORMAL_SUPPORT_WIDTH * self.sigma;
        (self.mu - half, self.mu + half)
    }
}
