//! Thompson sampling against known probability vectors.
//!
//! Expected values are integrals with the default quadrature settings; the
//! Monte-Carlo policy provides an independent cross-check.

use mab_core::{Dist, Policy, Thompson, ThompsonMc};

fn beta(a: f64, b: f64) -> Dist {
    Dist::beta(a, b).unwrap()
}

fn normal(mu: f64, sigma: f64) -> Dist {
    Dist::normal(mu, sigma).unwrap()
}

fn assert_close(expected: &[f64], actual: &[f64], tol: f64) {
    assert_eq!(expected.len(), actual.len(), "length mismatch: {actual:?}");
    for (i, (e, a)) in expected.iter().zip(actual).enumerate() {
        assert!(
            (e - a).abs() <= tol,
            "arm {i}: expected {e}, got {a} (all: {actual:?})"
        );
    }
}

fn probs(rewards: &[Dist]) -> Vec<f64> {
    Thompson::new().compute_probs(rewards).unwrap()
}

fn ad_campaign() -> Vec<Dist> {
    vec![
        beta(1989.0, 21290.0),
        beta(40.0, 474.0),
        beta(64.0, 730.0),
        beta(71.0, 818.0),
        beta(52.0, 659.0),
        beta(59.0, 718.0),
    ]
}

#[test]
fn empty_rewards_give_empty_probs() {
    assert!(probs(&[]).is_empty());
}

#[test]
fn single_arm_takes_everything() {
    assert_close(&[1.0], &probs(&[normal(0.0, 1.0)]), 1e-3);
}

#[test]
fn identical_arms_split_evenly() {
    assert_close(
        &[0.5, 0.5],
        &probs(&[normal(0.0, 1.0), normal(0.0, 1.0)]),
        1e-3,
    );
}

#[test]
fn only_nulls_give_zeros() {
    assert_eq!(probs(&[Dist::null()]), vec![0.0]);
    assert_eq!(
        probs(&[Dist::null(), Dist::null(), Dist::null()]),
        vec![0.0; 3]
    );
}

#[test]
fn lone_live_arm_among_nulls() {
    let rewards = [Dist::null(), Dist::null(), beta(10.0, 20.0), Dist::null()];
    assert_close(&[0.0, 0.0, 1.0, 0.0], &probs(&rewards), 1e-3);
}

#[test]
fn ad_campaign_reference() {
    assert_close(
        &[0.2963, 0.1760, 0.2034, 0.1690, 0.0614, 0.0939],
        &probs(&ad_campaign()),
        1e-3,
    );
}

#[test]
fn normals_reference() {
    let rewards = vec![
        normal(1.0, 0.5),
        normal(0.8, 0.44),
        normal(2.0, 4.5),
        normal(-1.5, 0.8),
        normal(0.0, 0.8),
        normal(4.0, 0.01),
    ];
    let expected = [0.0, 0.0, 0.328329, 0.0, 0.0, 0.671596];
    assert_close(&expected, &probs(&rewards), 1e-3);

    // Nulls are neutral: inserting them only inserts zeros.
    let mut with_nulls = rewards.clone();
    with_nulls.insert(2, Dist::null());
    with_nulls.push(Dist::null());
    assert_close(
        &[0.0, 0.0, 0.0, 0.328329, 0.0, 0.0, 0.671596, 0.0],
        &probs(&with_nulls),
        1e-3,
    );
}

#[test]
fn betas_reference() {
    let rewards = vec![
        beta(100.0, 50.0),
        beta(30.0, 100.0),
        beta(5.0, 5.0),
        beta(10.0, 5.0),
        beta(20.0, 200.0),
    ];
    let expected = [0.4136, 0.0, 0.0987, 0.4877, 0.0];
    assert_close(&expected, &probs(&rewards), 1e-3);

    let mut with_null = rewards;
    with_null.insert(0, Dist::null());
    let mut shifted = vec![0.0];
    shifted.extend_from_slice(&expected);
    assert_close(&shifted, &probs(&with_null), 1e-3);
}

#[test]
fn two_live_arms_among_many_nulls() {
    let mut rewards = vec![Dist::null(); 16];
    rewards[8] = beta(30.0, 20.0);
    rewards[15] = beta(300.0, 300.0);
    let mut expected = vec![0.0; 16];
    expected[8] = 0.915956;
    expected[15] = 0.084430;
    assert_close(&expected, &probs(&rewards), 1e-3);
}

#[test]
fn fractional_beta_parameters() {
    let rewards = vec![
        beta(1988.9969421012, 21290.29165727936),
        beta(50.513724206539536, 694.8915442828242),
        beta(40.22907217881993, 474.05635888115313),
        beta(63.51183105653544, 727.0899538364148),
        beta(31.261111088044935, 411.1179082444311),
        beta(21.92459706142498, 357.99764835992886),
        beta(71.24351745432674, 818.4214002728952),
        beta(52.28986733645648, 659.2207151426613),
        beta(58.626012977120325, 718.5085688230059),
        beta(27.76180147538136, 391.16613861489384),
    ];
    let expected = [
        0.234487, 0.015319, 0.170178, 0.176669, 0.066561, 0.008850, 0.157376, 0.058618,
        0.076513, 0.035422,
    ];
    assert_close(&expected, &probs(&rewards), 1e-3);
}

#[test]
fn monte_carlo_agrees_with_quadrature() {
    let rewards = ad_campaign();
    let exact = probs(&rewards);
    let mc = ThompsonMc::new(100_000, 2024)
        .unwrap()
        .compute_probs(&rewards)
        .unwrap();
    assert_close(&exact, &mc, 0.01);
}

#[test]
fn monte_carlo_is_reproducible_for_a_seed() {
    let rewards = vec![beta(10.0, 20.0), beta(10.0, 5.0)];
    let policy = ThompsonMc::new(20_000, 7).unwrap();
    let first = policy.compute_probs(&rewards).unwrap();
    assert_eq!(first, policy.compute_probs(&rewards).unwrap());
    assert_close(&[0.014662, 0.985338], &first, 0.01);
}
