//! Criterion benchmarks for Thompson probability computation.
//!
//! Ten Beta arms with fractional posteriors, as seen when serving an ad
//! campaign, swept across integration tolerances; plus the Monte-Carlo
//! policy at a comparable accuracy for contrast.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mab_core::{Dist, Policy, Sampler, Sha1Sampler, Thompson, ThompsonMc};
use mab_math::{Quadrature, Tolerance};

fn campaign() -> Vec<Dist> {
    [
        (1988.9969421012, 21290.29165727936),
        (50.513724206539536, 694.8915442828242),
        (40.22907217881993, 474.05635888115313),
        (63.51183105653544, 727.0899538364148),
        (31.261111088044935, 411.1179082444311),
        (21.92459706142498, 357.99764835992886),
        (71.24351745432674, 818.4214002728952),
        (52.28986733645648, 659.2207151426613),
        (58.626012977120325, 718.5085688230059),
        (27.76180147538136, 391.16613861489384),
    ]
    .into_iter()
    .map(|(a, b)| Dist::beta(a, b).unwrap())
    .collect()
}

fn bench_thompson_tolerance(c: &mut Criterion) {
    let rewards = campaign();
    let mut group = c.benchmark_group("thompson/tolerance");

    for tol in [1e-1, 1e-2, 1e-3, 1e-5] {
        let quadrature = Quadrature::builder()
            .tolerance(Tolerance::both(tol, tol))
            .build()
            .unwrap();
        let policy = Thompson::with_integrator(quadrature);
        group.bench_with_input(BenchmarkId::from_parameter(tol), &rewards, |b, r| {
            b.iter(|| policy.compute_probs(black_box(r)).unwrap())
        });
    }

    group.finish();
}

fn bench_thompson_mc(c: &mut Criterion) {
    let rewards = campaign();
    let mut group = c.benchmark_group("thompson_mc/iterations");
    group.sample_size(10);

    for iterations in [1_000usize, 10_000] {
        let policy = ThompsonMc::new(iterations, 1).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(iterations), &rewards, |b, r| {
            b.iter(|| policy.compute_probs(black_box(r)).unwrap())
        });
    }

    group.finish();
}

fn bench_sampler(c: &mut Criterion) {
    let sampler = Sha1Sampler::new();
    let weights = Thompson::new().compute_probs(&campaign()).unwrap();

    c.bench_function("sampler/sha1", |b| {
        b.iter(|| sampler.sample(black_box(&weights), black_box("user-1234567")).unwrap())
    });
}

criterion_group!(benches, bench_thompson_tolerance, bench_thompson_mc, bench_sampler);
criterion_main!(benches);
