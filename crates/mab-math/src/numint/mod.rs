//! One-dimensional numerical quadrature.
//!
//! A [`Rule`] is a fixed table of nodes and weights; a [`Quadrature`] applies
//! it adaptively, refining the partition of `[a, b]` with a [`Subdivider`]
//! until two successive composite estimates agree within a [`Tolerance`].
//!
//! ```
//! use mab_math::{Integrator, Quadrature, Tolerance};
//!
//! let q = Quadrature::builder()
//!     .tolerance(Tolerance::absolute(1e-9))
//!     .build()
//!     .unwrap();
//! let v = q.integrate(&|x| x * x, 0.0, 3.0).unwrap();
//! assert!((v - 9.0).abs() < 1e-9);
//! ```

mod error;
mod gauss_legendre;
mod newton_cotes;
mod quadrature;
mod rule;
mod subdivide;

pub use error::QuadratureError;
pub use quadrature::{
    Quadrature, QuadratureBuilder, Tolerance, DEFAULT_ABS_TOL, DEFAULT_MAX_ITERATIONS,
    DEFAULT_REL_TOL,
};
pub use rule::{Rule, RuleFamily};
pub use subdivide::{EquallySpaced, Subdivider};

use serde::{Deserialize, Serialize};

/// Closed interval `[a, b]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub a: f64,
    pub b: f64,
}

impl Interval {
    pub fn new(a: f64, b: f64) -> Self {
        Self { a, b }
    }

    pub fn width(&self) -> f64 {
        self.b - self.a
    }
}

/// Anything that can evaluate a definite integral.
pub trait Integrator: Send + Sync {
    fn integrate(&self, f: &dyn Fn(f64) -> f64, a: f64, b: f64) -> Result<f64, QuadratureError>;
}
