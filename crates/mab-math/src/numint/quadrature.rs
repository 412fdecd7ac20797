use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::trace;

use super::{EquallySpaced, Integrator, Interval, QuadratureError, Rule, Subdivider};

pub const DEFAULT_MAX_ITERATIONS: usize = 12;
pub const DEFAULT_ABS_TOL: f64 = 1e-5;
pub const DEFAULT_REL_TOL: f64 = 1e-5;

// ── Tolerance ───────────────────────────────────────────────────────────

/// Convergence bounds between successive composite estimates.
///
/// An unset bound is `+∞` and never blocks convergence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    absolute: f64,
    relative: f64,
}

impl Tolerance {
    /// Only `|new - prev|` is checked.
    pub fn absolute(tol: f64) -> Self {
        Self {
            absolute: tol,
            relative: f64::INFINITY,
        }
    }

    /// Only `|new - prev| / |new|` is checked.
    pub fn relative(tol: f64) -> Self {
        Self {
            absolute: f64::INFINITY,
            relative: tol,
        }
    }

    /// Both bounds must hold.
    pub fn both(absolute: f64, relative: f64) -> Self {
        Self { absolute, relative }
    }

    pub fn absolute_bound(&self) -> f64 {
        self.absolute
    }

    pub fn relative_bound(&self) -> f64 {
        self.relative
    }

    /// False when no refinement could ever satisfy the bounds.
    pub fn can_converge(&self) -> bool {
        self.absolute > 0.0 && self.relative > 0.0
    }

    fn accepts(&self, prev: f64, next: f64) -> bool {
        let delta = (next - prev).abs();
        let rel = if next != 0.0 {
            delta / next.abs()
        } else if prev != 0.0 {
            delta / prev.abs()
        } else {
            0.0
        };
        delta <= self.absolute && rel <= self.relative
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::both(DEFAULT_ABS_TOL, DEFAULT_REL_TOL)
    }
}

// ── Quadrature ──────────────────────────────────────────────────────────

/// Adaptive composite integrator.
///
/// Starting from the whole interval, every refinement subdivides each piece
/// and re-applies the rule; integration stops once two successive composite
/// estimates agree within the tolerance. Immutable after construction and
/// safe to share between threads.
#[derive(Debug, Clone)]
pub struct Quadrature {
    rule: Rule,
    subdivider: Arc<dyn Subdivider>,
    tolerance: Tolerance,
    max_iterations: usize,
}

impl Quadrature {
    pub fn builder() -> QuadratureBuilder {
        QuadratureBuilder::default()
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    fn composite(
        &self,
        f: &dyn Fn(f64) -> f64,
        intervals: &[Interval],
        iteration: usize,
    ) -> Result<f64, QuadratureError> {
        let estimate: f64 = intervals.iter().map(|iv| self.rule.estimate(f, *iv)).sum();
        if !estimate.is_finite() {
            return Err(QuadratureError::NonFinite {
                iteration,
                estimate,
            });
        }
        Ok(estimate)
    }
}

impl Default for Quadrature {
    /// Gauss–Legendre order 4, halving, 12 refinements, 1e-5 absolute and relative.
    fn default() -> Self {
        Self {
            rule: Rule::default(),
            subdivider: Arc::new(EquallySpaced::default()),
            tolerance: Tolerance::default(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl Integrator for Quadrature {
    fn integrate(&self, f: &dyn Fn(f64) -> f64, a: f64, b: f64) -> Result<f64, QuadratureError> {
        if a == b {
            return Ok(0.0);
        }
        if !(a.is_finite() && b.is_finite()) || a > b {
            return Err(QuadratureError::InvalidInterval { a, b });
        }

        let mut intervals = vec![Interval::new(a, b)];
        let mut estimate = self.composite(f, &intervals, 0)?;
        let mut delta = f64::INFINITY;

        for iteration in 1..=self.max_iterations {
            intervals = self.subdivider.subdivide(&intervals);
            let next = self.composite(f, &intervals, iteration)?;
            delta = (next - estimate).abs();
            let converged = self.tolerance.accepts(estimate, next);
            trace!(
                iteration,
                pieces = intervals.len(),
                estimate = next,
                delta,
                converged,
                "quadrature refinement"
            );
            estimate = next;
            if converged {
                return Ok(estimate);
            }
        }

        Err(QuadratureError::NotConverged {
            iterations: self.max_iterations,
            last_estimate: estimate,
            delta,
        })
    }
}

// ── Builder ─────────────────────────────────────────────────────────────

/// Validated construction of a [`Quadrature`].
#[derive(Debug, Clone)]
pub struct QuadratureBuilder {
    rule: Rule,
    subdivider: Arc<dyn Subdivider>,
    tolerance: Tolerance,
    max_iterations: usize,
}

impl Default for QuadratureBuilder {
    fn default() -> Self {
        let q = Quadrature::default();
        Self {
            rule: q.rule,
            subdivider: q.subdivider,
            tolerance: q.tolerance,
            max_iterations: q.max_iterations,
        }
    }
}

impl QuadratureBuilder {
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rule = rule;
        self
    }

    pub fn subdivider(mut self, subdivider: impl Subdivider + 'static) -> Self {
        self.subdivider = Arc::new(subdivider);
        self
    }

    pub fn tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Rejects tolerances that can never be met.
    pub fn build(self) -> Result<Quadrature, QuadratureError> {
        if !self.tolerance.can_converge() {
            return Err(QuadratureError::InvalidTolerance {
                absolute: self.tolerance.absolute,
                relative: self.tolerance.relative,
            });
        }
        Ok(Quadrature {
            rule: self.rule,
            subdivider: self.subdivider,
            tolerance: self.tolerance,
            max_iterations: self.max_iterations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn degenerate_interval_skips_evaluation() {
        let calls = Cell::new(0usize);
        let f = |x: f64| {
            calls.set(calls.get() + 1);
            x
        };
        let q = Quadrature::default();
        assert_eq!(q.integrate(&f, 3.0, 3.0), Ok(0.0));
        assert_eq!(q.integrate(&f, f64::NEG_INFINITY, f64::NEG_INFINITY), Ok(0.0));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn rejects_impossible_tolerances_before_use() {
        for tol in [
            Tolerance::absolute(0.0),
            Tolerance::relative(-1e-3),
            Tolerance::both(1e-6, f64::NAN),
        ] {
            let err = Quadrature::builder().tolerance(tol).build().unwrap_err();
            assert!(matches!(err, QuadratureError::InvalidTolerance { .. }));
        }
    }

    #[test]
    fn zero_iterations_is_a_convergence_error() {
        let q = Quadrature::builder()
            .tolerance(Tolerance::absolute(1e-12))
            .max_iterations(0)
            .build()
            .unwrap();
        match q.integrate(&|x| x, 0.0, 1.0) {
            Err(QuadratureError::NotConverged {
                iterations,
                last_estimate,
                ..
            }) => {
                assert_eq!(iterations, 0);
                assert!((last_estimate - 0.5).abs() < 1e-12);
            }
            other => panic!("expected NotConverged, got {other:?}"),
        }
    }

    #[test]
    fn rejects_reversed_and_unbounded_intervals() {
        let q = Quadrature::default();
        assert!(matches!(
            q.integrate(&|x| x, 1.0, 0.0),
            Err(QuadratureError::InvalidInterval { .. })
        ));
        assert!(matches!(
            q.integrate(&|x| x, 0.0, f64::INFINITY),
            Err(QuadratureError::InvalidInterval { .. })
        ));
    }

    #[test]
    fn non_finite_integrand_is_reported() {
        let q = Quadrature::builder()
            .rule(Rule::newton_cotes_closed(1).unwrap())
            .build()
            .unwrap();
        let err = q.integrate(&|x: f64| 1.0 / x, 0.0, 1.0).unwrap_err();
        assert!(matches!(err, QuadratureError::NonFinite { iteration: 0, .. }));
    }

    #[test]
    fn relative_bound_uses_magnitude() {
        let tol = Tolerance::relative(1e-3);
        assert!(tol.accepts(-1.0, -1.0005));
        assert!(!tol.accepts(-1.0, -1.01));
        assert!(tol.accepts(0.0, 0.0));
    }

    #[test]
    fn trapezoid_with_thirds_converges() {
        let q = Quadrature::builder()
            .rule(Rule::newton_cotes_closed(1).unwrap())
            .subdivider(EquallySpaced::new(3).unwrap())
            .tolerance(Tolerance::absolute(1e-8))
            .max_iterations(14)
            .build()
            .unwrap();
        let v = q.integrate(&|x: f64| x.exp(), 0.0, 1.0).unwrap();
        assert!((v - (std::f64::consts::E - 1.0)).abs() < 1e-7);
    }
}
