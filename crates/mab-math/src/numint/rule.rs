use serde::{Deserialize, Serialize};
use std::fmt;

use super::{gauss_legendre, newton_cotes, Interval, QuadratureError};

/// Built-in rule families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleFamily {
    GaussLegendre,
    NewtonCotesClosed,
    NewtonCotesOpen,
}

impl RuleFamily {
    /// Inclusive range of degrees with a tabulated rule.
    pub fn degrees(self) -> (usize, usize) {
        match self {
            RuleFamily::GaussLegendre => (1, gauss_legendre::MAX_ORDER),
            RuleFamily::NewtonCotesClosed => newton_cotes::CLOSED_DEGREES,
            RuleFamily::NewtonCotesOpen => newton_cotes::OPEN_DEGREES,
        }
    }

    pub fn supports(self, degree: usize) -> bool {
        let (lo, hi) = self.degrees();
        (lo..=hi).contains(&degree)
    }

    pub fn name(self) -> &'static str {
        match self {
            RuleFamily::GaussLegendre => "gauss_legendre",
            RuleFamily::NewtonCotesClosed => "newton_cotes_closed",
            RuleFamily::NewtonCotesOpen => "newton_cotes_open",
        }
    }
}

impl fmt::Display for RuleFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An immutable quadrature rule: nodes and weights on a canonical domain,
/// rescaled to each interval it is applied to.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    nodes: Vec<f64>,
    weights: Vec<f64>,
    domain: Interval,
}

impl Rule {
    /// Look up a built-in rule.
    pub fn new(family: RuleFamily, degree: usize) -> Result<Self, QuadratureError> {
        let table = match family {
            RuleFamily::GaussLegendre => gauss_legendre::table(degree),
            RuleFamily::NewtonCotesClosed => newton_cotes::closed(degree),
            RuleFamily::NewtonCotesOpen => newton_cotes::open(degree),
        };
        let (nodes, weights) = table.ok_or_else(|| {
            let (min, max) = family.degrees();
            QuadratureError::UnsupportedDegree {
                family: family.name(),
                degree,
                min,
                max,
            }
        })?;
        let domain = match family {
            RuleFamily::GaussLegendre => Interval::new(-1.0, 1.0),
            _ => Interval::new(0.0, 1.0),
        };
        Ok(Self {
            nodes,
            weights,
            domain,
        })
    }

    /// Gauss–Legendre rule with `order` nodes (exact for polynomials of
    /// degree `2 * order - 1`).
    pub fn gauss_legendre(order: usize) -> Result<Self, QuadratureError> {
        Self::new(RuleFamily::GaussLegendre, order)
    }

    pub fn newton_cotes_closed(degree: usize) -> Result<Self, QuadratureError> {
        Self::new(RuleFamily::NewtonCotesClosed, degree)
    }

    pub fn newton_cotes_open(degree: usize) -> Result<Self, QuadratureError> {
        Self::new(RuleFamily::NewtonCotesOpen, degree)
    }

    /// A caller-supplied table on `domain`.
    pub fn from_table(
        nodes: Vec<f64>,
        weights: Vec<f64>,
        domain: Interval,
    ) -> Result<Self, QuadratureError> {
        if nodes.is_empty() {
            return Err(QuadratureError::InvalidRule("no nodes".into()));
        }
        if nodes.len() != weights.len() {
            return Err(QuadratureError::InvalidRule(format!(
                "{} nodes but {} weights",
                nodes.len(),
                weights.len()
            )));
        }
        if nodes.iter().chain(&weights).any(|v| !v.is_finite()) {
            return Err(QuadratureError::InvalidRule(
                "nodes and weights must be finite".into(),
            ));
        }
        if !(domain.a.is_finite() && domain.b.is_finite() && domain.a < domain.b) {
            return Err(QuadratureError::InvalidRule(format!(
                "canonical domain [{}, {}] must be finite with a < b",
                domain.a, domain.b
            )));
        }
        Ok(Self {
            nodes,
            weights,
            domain,
        })
    }

    /// Number of function evaluations per interval.
    pub fn order(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> &[f64] {
        &self.nodes
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn domain(&self) -> Interval {
        self.domain
    }

    /// Sampling points and weights rescaled to `iv`.
    pub fn points(&self, iv: Interval) -> impl Iterator<Item = (f64, f64)> + '_ {
        let scale = iv.width() / self.domain.width();
        self.nodes
            .iter()
            .zip(&self.weights)
            .map(move |(t, w)| (iv.a + (t - self.domain.a) * scale, w * scale))
    }

    /// `∑ wᵢ f(xᵢ)` over a single interval.
    pub fn estimate(&self, f: &dyn Fn(f64) -> f64, iv: Interval) -> f64 {
        self.points(iv).map(|(x, w)| w * f(x)).sum()
    }
}

impl Default for Rule {
    /// Gauss–Legendre with 4 nodes.
    fn default() -> Self {
        let (nodes, weights) = gauss_legendre::table(4).unwrap_or_default();
        Self {
            nodes,
            weights,
            domain: Interval::new(-1.0, 1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn gauss_legendre_is_exact_to_its_degree() {
        for order in 1..=12 {
            let rule = Rule::gauss_legendre(order).unwrap();
            let p = (2 * order - 1) as i32;
            // ∫_0^2 x^p dx = 2^(p+1) / (p+1)
            let est = rule.estimate(&|x: f64| x.powi(p), Interval::new(0.0, 2.0));
            let exact = 2f64.powi(p + 1) / f64::from(p + 1);
            assert!(approx_eq(est, exact, 1e-9 * exact), "order {order}: {est} vs {exact}");
        }
    }

    #[test]
    fn simpson_integrates_cubics_exactly() {
        let rule = Rule::newton_cotes_closed(2).unwrap();
        let est = rule.estimate(&|x: f64| x * x * x - x, Interval::new(1.0, 3.0));
        assert!(approx_eq(est, 16.0, 1e-12));
    }

    #[test]
    fn open_rules_avoid_endpoints() {
        let rule = Rule::newton_cotes_open(4).unwrap();
        let pts: Vec<f64> = rule.points(Interval::new(0.0, 4.0)).map(|(x, _)| x).collect();
        assert_eq!(pts, vec![1.0, 2.0, 3.0]);
        let est = rule.estimate(&|x: f64| 1.0 / x.sqrt(), Interval::new(0.0, 1.0));
        assert!(est.is_finite());
    }

    #[test]
    fn unsupported_degree_names_the_family() {
        let err = Rule::newton_cotes_closed(9).unwrap_err();
        assert_eq!(
            err,
            QuadratureError::UnsupportedDegree {
                family: "newton_cotes_closed",
                degree: 9,
                min: 1,
                max: 5
            }
        );
        assert!(Rule::gauss_legendre(0).is_err());
    }

    #[test]
    fn from_table_validates() {
        let unit = Interval::new(0.0, 1.0);
        assert!(Rule::from_table(vec![], vec![], unit).is_err());
        assert!(Rule::from_table(vec![0.5], vec![1.0, 2.0], unit).is_err());
        assert!(Rule::from_table(vec![f64::NAN], vec![1.0], unit).is_err());
        assert!(Rule::from_table(vec![0.5], vec![1.0], Interval::new(1.0, 1.0)).is_err());

        let midpoint = Rule::from_table(vec![0.5], vec![1.0], unit).unwrap();
        let est = midpoint.estimate(&|x| x, Interval::new(2.0, 4.0));
        assert!(approx_eq(est, 6.0, 1e-12));
    }

    #[test]
    fn default_is_four_point_gauss_legendre() {
        assert_eq!(Rule::default(), Rule::gauss_legendre(4).unwrap());
    }
}
