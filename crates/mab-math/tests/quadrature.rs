//! Reference integrals for the adaptive quadrature engine.

use mab_math::{
    Dist, EquallySpaced, Integrator, Quadrature, QuadratureError, RewardDistribution, Rule,
    RuleFamily, Tolerance,
};
use proptest::prelude::*;

const TOL: f64 = 1e-6;

fn strict() -> Quadrature {
    Quadrature::builder()
        .tolerance(Tolerance::absolute(TOL))
        .build()
        .expect("valid quadrature")
}

fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() < tol,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn identity_over_unit_interval() {
    let v = strict().integrate(&|x| x, 0.0, 1.0).unwrap();
    assert_close(v, 0.5, TOL);
}

#[test]
fn arctangent_derivative() {
    let v = strict().integrate(&|x| 1.0 / (1.0 + x * x), 0.0, 1.0).unwrap();
    assert_close(v, std::f64::consts::FRAC_PI_4, TOL);
}

#[test]
fn inverse_hyperbolic_sine() {
    let v = strict().integrate(&f64::asinh, -0.5, 1.0).unwrap();
    assert_close(v, 0.344588, TOL);
}

#[test]
fn oscillating_integrand() {
    let v = strict().integrate(&|x: f64| x * (x * x).cos(), 1.0, 5.0).unwrap();
    assert_close(v, -0.486911, TOL);
}

#[test]
fn beta_density_integrates_to_one() {
    let d = Dist::beta(10.0, 20.0).unwrap();
    let (lo, hi) = d.support();
    let v = strict().integrate(&|x| d.density(x), lo, hi).unwrap();
    assert_close(v, 1.0, TOL);
}

#[test]
fn wide_normal_density_integrates_to_one() {
    let d = Dist::normal(10.0, 20.0).unwrap();
    let v = strict().integrate(&|x| d.density(x), -700.0, 900.0).unwrap();
    assert_close(v, 1.0, TOL);
}

#[test]
fn default_configuration_handles_peaked_beta() {
    let d = Dist::beta(1989.0, 21290.0).unwrap();
    let v = Quadrature::default()
        .integrate(&|x| d.density(x), 0.0, 1.0)
        .unwrap();
    assert_close(v, 1.0, 1e-4);
}

#[test]
fn every_rule_family_converges_on_smooth_integrand() {
    for family in [
        RuleFamily::GaussLegendre,
        RuleFamily::NewtonCotesClosed,
        RuleFamily::NewtonCotesOpen,
    ] {
        let (lo, hi) = family.degrees();
        for degree in lo..=hi {
            let q = Quadrature::builder()
                .rule(Rule::new(family, degree).unwrap())
                .subdivider(EquallySpaced::new(2).unwrap())
                .tolerance(Tolerance::both(1e-7, 1e-7))
                .max_iterations(20)
                .build()
                .unwrap();
            let v = q
                .integrate(&|x: f64| x.sin(), 0.0, std::f64::consts::PI)
                .unwrap_or_else(|e| panic!("{family} degree {degree}: {e}"));
            assert_close(v, 2.0, 1e-5);
        }
    }
}

#[test]
fn strict_tolerance_without_budget_fails_loudly() {
    let q = Quadrature::builder()
        .tolerance(Tolerance::both(1e-15, 1e-15))
        .max_iterations(1)
        .build()
        .unwrap();
    let err = q
        .integrate(&|x: f64| (10.0 * x).sin().abs(), 0.0, 3.0)
        .unwrap_err();
    assert!(matches!(err, QuadratureError::NotConverged { iterations: 1, .. }));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn beta_densities_are_normalized(alpha in 1.0f64..60.0, beta in 1.0f64..60.0) {
        let d = Dist::beta(alpha, beta).unwrap();
        let v = Quadrature::default().integrate(&|x| d.density(x), 0.0, 1.0).unwrap();
        prop_assert!((v - 1.0).abs() < 1e-4, "Beta({alpha},{beta}) integrated to {v}");
    }

    #[test]
    fn integration_is_additive(split in 0.05f64..0.95) {
        let q = strict();
        let f = |x: f64| (3.0 * x).exp() * x;
        let whole = q.integrate(&f, 0.0, 1.0).unwrap();
        let left = q.integrate(&f, 0.0, split).unwrap();
        let right = q.integrate(&f, split, 1.0).unwrap();
        prop_assert!((whole - (left + right)).abs() < 1e-5);
    }
}
