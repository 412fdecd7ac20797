use rand::Rng;
use rand_distr::Distribution;
use serde::Serialize;
use statrs::function::beta::{beta_reg, ln_beta};

use super::{DistError, RewardDistribution};

/// Beta(alpha, beta) on [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Beta {
    alpha: f64,
    beta: f64,
}

impl Beta {
    pub fn new(alpha: f64, beta: f64) -> Result<Self, DistError> {
        for (param, value) in [("alpha", alpha), ("beta", beta)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(DistError::InvalidParameter {
                    family: "beta",
                    param,
                    requirement: "finite and > 0",
                    value,
                });
            }
        }
        Ok(Self { alpha, beta })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Density at an endpoint, where the log form hits `0 * ln(0)`.
    fn edge_density(&self, shape: f64, other: f64) -> f64 {
        if shape < 1.0 {
            f64::INFINITY
        } else if shape > 1.0 {
            0.0
        } else {
            // Beta(1, b) at 0 is b; Beta(a, 1) at 1 is a.
            other
        }
    }
}

impl RewardDistribution for Beta {
    fn mean(&self) -> f64 {
        self.alpha / (self.alpha + self.beta)
    }

    fn cdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            0.0
        } else if x >= 1.0 {
            1.0
        } else {
            beta_reg(self.alpha, self.beta, x)
        }
    }

    fn density(&self, x: f64) -> f64 {
        if !(0.0..=1.0).contains(&x) {
            return 0.0;
        }
        if x == 0.0 {
            return self.edge_density(self.alpha, self.beta);
        }
        if x == 1.0 {
            return self.edge_density(self.beta, self.alpha);
        }
        let log_density = (self.alpha - 1.0) * x.ln() + (self.beta - 1.0) * (-x).ln_1p()
            - ln_beta(self.alpha, self.beta);
        log_density.exp()
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match rand_distr::Beta::new(self.alpha, self.beta) {
            Ok(d) => d.sample(rng),
            Err(_) => self.mean(),
        }
    }

    fn support(&self) -> (f64, f64) {
        (0.0, 1.0)
    }
}
