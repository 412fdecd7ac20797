use rand::Rng;
use serde::Serialize;

use super::RewardDistribution;

/// Degenerate distribution equal to `value` everywhere.
///
/// Useful for reward models that only produce point estimates. It has no
/// continuous density, so it must not be integrated as one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    value: f64,
}

impl Point {
    pub fn new(value: f64) -> Self {
        Self { value }
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

impl RewardDistribution for Point {
    fn mean(&self) -> f64 {
        self.value
    }

    fn cdf(&self, x: f64) -> f64 {
        if x >= self.value {
            1.0
        } else {
            0.0
        }
    }

    fn density(&self, x: f64) -> f64 {
        if x == self.value {
            f64::NAN
        } else {
            0.0
        }
    }

    fn sample<R: Rng + ?Sized>(&self, _rng: &mut R) -> f64 {
        self.value
    }

    fn support(&self) -> (f64, f64) {
        (self.value, self.value)
    }
}
