use thiserror::Error;

/// Failures of the quadrature engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuadratureError {
    #[error("tolerances cannot converge: absolute={absolute}, relative={relative} (both must be > 0)")]
    InvalidTolerance { absolute: f64, relative: f64 },

    #[error("invalid integration interval [{a}, {b}]")]
    InvalidInterval { a: f64, b: f64 },

    #[error("{family} rules are defined for degree {min}..={max}, got {degree}")]
    UnsupportedDegree {
        family: &'static str,
        degree: usize,
        min: usize,
        max: usize,
    },

    #[error("invalid rule table: {0}")]
    InvalidRule(String),

    #[error("a subdivider must split each interval into at least 2 pieces, got {0}")]
    InvalidSubdivision(usize),

    #[error("composite estimate became non-finite ({estimate}) at refinement {iteration}")]
    NonFinite { iteration: usize, estimate: f64 },

    #[error(
        "failed to converge after {iterations} refinements (last estimate {last_estimate}, last change {delta})"
    )]
    NotConverged {
        iterations: usize,
        last_estimate: f64,
        delta: f64,
    },
}
